use std::fmt;

use alloy::primitives::{hex, Address, I256};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One parameter slot of a callable function, as declared by the interface
/// description. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamDescriptor {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    /// Nested members for tuple-style types. Carried through verbatim; the
    /// coercion engine does not descend into them.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<ParamDescriptor>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mutability {
    Pure,
    View,
    #[default]
    NonPayable,
    Payable,
}

impl Mutability {
    pub fn is_read_only(self) -> bool {
        matches!(self, Mutability::Pure | Mutability::View)
    }
}

impl fmt::Display for Mutability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Mutability::Pure => "pure",
            Mutability::View => "view",
            Mutability::NonPayable => "nonpayable",
            Mutability::Payable => "payable",
        };
        f.write_str(label)
    }
}

/// Validated in-memory form of one `"type": "function"` interface entry.
/// Created by the validator, discarded wholesale when a new interface loads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionDescriptor {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub inputs: Vec<ParamDescriptor>,
    #[serde(default)]
    pub outputs: Vec<ParamDescriptor>,
    #[serde(rename = "stateMutability", default)]
    pub mutability: Mutability,
}

/// A coerced argument value. One tag per primitive category the form can
/// express, plus one recursive array wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParamValue {
    Int(I256),
    Address(Address),
    Bool(bool),
    Bytes(Vec<u8>),
    String(String),
    Array(Vec<ParamValue>),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(v) => write!(f, "{v}"),
            ParamValue::Address(a) => write!(f, "{a}"),
            ParamValue::Bool(b) => write!(f, "{b}"),
            ParamValue::Bytes(b) => f.write_str(&hex::encode_prefixed(b)),
            ParamValue::String(s) => f.write_str(s),
            ParamValue::Array(items) => {
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxStatus {
    Success,
    Failed,
}

/// One confirmed state-changing call. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub function_name: String,
    pub params: Vec<ParamValue>,
    pub tx_hash: String,
    pub status: TxStatus,
    /// ISO-8601 confirmation time from the clock port.
    pub timestamp: String,
}

/// Outcome of one dispatch. Only the most recent one is retained outside the
/// ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CallResult {
    Value {
        value: Value,
        tx_hash: Option<String>,
    },
    Error {
        message: String,
    },
}

impl CallResult {
    pub fn is_error(&self) -> bool {
        matches!(self, CallResult::Error { .. })
    }

    pub fn tx_hash(&self) -> Option<&str> {
        match self {
            CallResult::Value { tx_hash, .. } => tx_hash.as_deref(),
            CallResult::Error { .. } => None,
        }
    }
}
