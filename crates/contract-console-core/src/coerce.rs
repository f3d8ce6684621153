//! Type coercion: declared parameter type + raw form text -> typed value.
//!
//! The rules mirror what a human-editable call form can express: the scalar
//! primitives plus single-dimension arrays of them. Everything the engine
//! does not recognize passes through as a plain string and is validated by
//! the downstream call executor instead.

use alloy::primitives::{Address, I256};
use thiserror::Error;

use crate::domain::ParamValue;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot interpret '{raw}' as {ty}")]
pub struct CoercionError {
    pub ty: String,
    pub raw: String,
}

impl CoercionError {
    fn new(ty: &str, raw: &str) -> Self {
        Self {
            ty: ty.to_owned(),
            raw: raw.to_owned(),
        }
    }
}

/// Coerce `raw` into the typed value `ty` calls for.
///
/// An empty `raw` always coerces to an empty string rather than failing;
/// required-field rejection happens in the dispatcher before this runs.
pub fn coerce(ty: &str, raw: &str) -> Result<ParamValue, CoercionError> {
    if raw.is_empty() {
        return Ok(ParamValue::String(String::new()));
    }

    if let Some(elem_ty) = ty.strip_suffix("[]") {
        let mut items = Vec::new();
        for elem in raw.split(',') {
            let elem = elem.trim();
            // Element failures surface the outer type and the whole raw
            // input so the user can see which field broke.
            let value = coerce(elem_ty, elem).map_err(|_| CoercionError::new(ty, raw))?;
            items.push(value);
        }
        return Ok(ParamValue::Array(items));
    }

    coerce_scalar(ty, raw)
}

fn coerce_scalar(ty: &str, raw: &str) -> Result<ParamValue, CoercionError> {
    if ty == "bytes" {
        // Literal text, byte-encoded. Deliberately not hex decoding; the
        // fixed-width bytesN branch below is the hex-style passthrough.
        return Ok(ParamValue::Bytes(raw.as_bytes().to_vec()));
    }
    if ty.starts_with("bytes") {
        return Ok(ParamValue::String(raw.to_owned()));
    }

    match ty {
        "uint256" | "uint" | "int256" | "int" => raw
            .parse::<I256>()
            .map(ParamValue::Int)
            .map_err(|_| CoercionError::new(ty, raw)),
        "address" => raw
            .parse::<Address>()
            .map(ParamValue::Address)
            .map_err(|_| CoercionError::new(ty, raw)),
        // Permissive by policy: anything that is not "true" is false.
        "bool" => Ok(ParamValue::Bool(raw.eq_ignore_ascii_case("true"))),
        _ => Ok(ParamValue::String(raw.to_owned())),
    }
}

/// Short placeholder text for an input field of type `ty`.
pub fn type_hint(ty: &str) -> &'static str {
    if ty.ends_with("[]") {
        return "comma-separated values";
    }
    match ty {
        "uint256" | "uint" | "int256" | "int" => "enter an integer",
        "address" => "enter a 0x-prefixed address",
        "bool" => "enter true or false",
        "string" => "enter a string",
        "bytes" => "enter a hex string",
        _ => "enter the parameter value",
    }
}

/// One-line helper text shown under an input field of type `ty`.
pub fn type_description(ty: &str) -> &'static str {
    if ty.ends_with("[]") {
        return "array, separate elements with commas";
    }
    match ty {
        "uint256" | "uint" => "unsigned integer, e.g. 123",
        "int256" | "int" => "signed integer, e.g. -123",
        "address" => "Ethereum address, e.g. 0x1234...",
        "bool" => "boolean: true or false",
        "string" => "UTF-8 string",
        "bytes" => "byte data, hex format",
        _ => "enter a value matching the declared type",
    }
}
