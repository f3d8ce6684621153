//! Interface description parsing and structural validation.

use serde_json::Value;
use thiserror::Error;

use crate::domain::FunctionDescriptor;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("interface text required")]
    EmptyInput,
    #[error("malformed interface syntax")]
    MalformedSyntax,
    #[error("interface must be a list of entries")]
    NotAList,
    #[error("interface must declare at least one entry")]
    NoEntries,
    #[error("entry {index} missing type field")]
    MissingType { index: usize },
    #[error("entry {index} is not a valid function declaration: {reason}")]
    BadFunctionEntry { index: usize, reason: String },
}

/// Validate a raw interface description and return its callable function set.
///
/// Non-function entries (constructors, events, errors) validate fine but are
/// not actionable by the call form, so they are dropped from the result.
/// Order is preserved.
pub fn validate_interface(raw: &str) -> Result<Vec<FunctionDescriptor>, ValidationError> {
    if raw.trim().is_empty() {
        return Err(ValidationError::EmptyInput);
    }

    let parsed: Value =
        serde_json::from_str(raw).map_err(|_| ValidationError::MalformedSyntax)?;
    let entries = parsed.as_array().ok_or(ValidationError::NotAList)?;
    if entries.is_empty() {
        return Err(ValidationError::NoEntries);
    }

    for (idx, entry) in entries.iter().enumerate() {
        if entry.get("type").and_then(Value::as_str).is_none() {
            return Err(ValidationError::MissingType { index: idx + 1 });
        }
    }

    let mut functions = Vec::new();
    for (idx, entry) in entries.iter().enumerate() {
        if entry.get("type").and_then(Value::as_str) != Some("function") {
            continue;
        }
        let descriptor: FunctionDescriptor = serde_json::from_value(entry.clone())
            .map_err(|e| ValidationError::BadFunctionEntry {
                index: idx + 1,
                reason: e.to_string(),
            })?;
        // A function without a name cannot be selected or invoked.
        if descriptor.name.is_empty() {
            return Err(ValidationError::BadFunctionEntry {
                index: idx + 1,
                reason: "missing function name".to_owned(),
            });
        }
        functions.push(descriptor);
    }
    Ok(functions)
}
