use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::trace;

/// ABI parse failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AbiError {
    #[error("ABI must be a JSON array")]
    NotAList,

    #[error("ABI entry {index} is not an object")]
    NotAnObject { index: usize },

    #[error("ABI entry {index} is invalid: {reason}")]
    InvalidFragment { index: usize, reason: String },
}

/// One entry of a contract ABI, keyed by its `type` field.
///
/// Only the shape is checked: argument lists are kept as raw JSON and their
/// Solidity types are not decoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AbiFragment {
    Function(FunctionFragment),
    Event(EventFragment),
    Constructor {},
    Fallback {},
    Receive {},
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionFragment {
    pub name: String,
    pub inputs: Vec<Value>,
    pub outputs: Vec<Value>,
    pub state_mutability: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventFragment {
    pub name: String,
    pub inputs: Vec<Value>,
    pub anonymous: bool,
}

impl AbiFragment {
    pub fn kind(&self) -> &'static str {
        match self {
            AbiFragment::Function(_) => "function",
            AbiFragment::Event(_) => "event",
            AbiFragment::Constructor {} => "constructor",
            AbiFragment::Fallback {} => "fallback",
            AbiFragment::Receive {} => "receive",
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            AbiFragment::Function(f) => Some(&f.name),
            AbiFragment::Event(e) => Some(&e.name),
            AbiFragment::Constructor {} | AbiFragment::Fallback {} | AbiFragment::Receive {} => None,
        }
    }
}

/// Parse a JSON ABI into typed fragments; the first bad entry fails the list.
pub fn parse_abi(abi: &Value) -> Result<Vec<AbiFragment>, AbiError> {
    let entries = abi.as_array().ok_or(AbiError::NotAList)?;

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            // Internally tagged enums would also accept a sequence here.
            if !entry.is_object() {
                return Err(AbiError::NotAnObject { index });
            }
            AbiFragment::deserialize(entry).map_err(|e| AbiError::InvalidFragment {
                index,
                reason: e.to_string(),
            })
        })
        .collect()
}

/// Validate ABI interface format
pub fn is_valid_abi(abi: &Value) -> bool {
    match parse_abi(abi) {
        Ok(_) => true,
        Err(e) => {
            trace!(error = %e, "ABI rejected");
            false
        }
    }
}
