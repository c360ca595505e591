use alloy::primitives::U256;
use chrono::{DateTime, Utc};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::common::formatting::{
    AddressFormatOptions, GasFormatOptions, NumberFormatOptions, TransactionDataFormatOptions,
};
use crate::common::time::TimestampFormatOptions;

/// Blockchain protocol family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChainFamily {
    #[serde(rename = "EVM")]
    Evm,
    #[serde(rename = "COSMOS")]
    Cosmos,
    #[serde(rename = "SOLANA")]
    Solana,
}

impl ChainFamily {
    pub const ALL: [ChainFamily; 3] = [ChainFamily::Evm, ChainFamily::Cosmos, ChainFamily::Solana];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChainFamily::Evm => "EVM",
            ChainFamily::Cosmos => "COSMOS",
            ChainFamily::Solana => "SOLANA",
        }
    }
}

impl fmt::Display for ChainFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChainFamily {
    type Err = UnsupportedOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "EVM" => Ok(ChainFamily::Evm),
            "COSMOS" => Ok(ChainFamily::Cosmos),
            "SOLANA" => Ok(ChainFamily::Solana),
            _ => Err(UnsupportedOption::new("chain family", s)),
        }
    }
}

/// Raw numeric value as handed over by a caller.
///
/// Every variant renders to a decimal (or `0x` hex) string; magnitudes are
/// never pushed through floating point by this crate.
#[derive(Debug, Clone, PartialEq)]
pub enum NumericInput {
    Text(String),
    Unsigned(u128),
    Signed(i128),
    Float(f64),
    Big(U256),
}

impl NumericInput {
    pub fn to_numeric_string(&self) -> String {
        match self {
            NumericInput::Text(s) => s.clone(),
            NumericInput::Unsigned(n) => n.to_string(),
            NumericInput::Signed(n) => n.to_string(),
            NumericInput::Float(n) => n.to_string(),
            NumericInput::Big(n) => n.to_string(),
        }
    }
}

impl fmt::Display for NumericInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_numeric_string())
    }
}

impl From<&str> for NumericInput {
    fn from(value: &str) -> Self {
        NumericInput::Text(value.to_string())
    }
}

impl From<String> for NumericInput {
    fn from(value: String) -> Self {
        NumericInput::Text(value)
    }
}

impl From<&String> for NumericInput {
    fn from(value: &String) -> Self {
        NumericInput::Text(value.clone())
    }
}

impl From<u32> for NumericInput {
    fn from(value: u32) -> Self {
        NumericInput::Unsigned(value.into())
    }
}

impl From<u64> for NumericInput {
    fn from(value: u64) -> Self {
        NumericInput::Unsigned(value.into())
    }
}

impl From<u128> for NumericInput {
    fn from(value: u128) -> Self {
        NumericInput::Unsigned(value)
    }
}

impl From<i32> for NumericInput {
    fn from(value: i32) -> Self {
        NumericInput::Signed(value.into())
    }
}

impl From<i64> for NumericInput {
    fn from(value: i64) -> Self {
        NumericInput::Signed(value.into())
    }
}

impl From<f64> for NumericInput {
    fn from(value: f64) -> Self {
        NumericInput::Float(value)
    }
}

impl From<U256> for NumericInput {
    fn from(value: U256) -> Self {
        NumericInput::Big(value)
    }
}

impl From<&BigUint> for NumericInput {
    fn from(value: &BigUint) -> Self {
        NumericInput::Text(value.to_string())
    }
}

/// Instant handed to timestamp formatting
#[derive(Debug, Clone, PartialEq)]
pub enum TimestampInput {
    /// Milliseconds since the Unix epoch
    Millis(i64),
    /// RFC 3339 text or a digit string of epoch milliseconds
    Text(String),
    Instant(DateTime<Utc>),
}

impl fmt::Display for TimestampInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimestampInput::Millis(ms) => write!(f, "{}", ms),
            TimestampInput::Text(s) => f.write_str(s),
            TimestampInput::Instant(dt) => f.write_str(&dt.to_rfc3339()),
        }
    }
}

impl From<i64> for TimestampInput {
    fn from(value: i64) -> Self {
        TimestampInput::Millis(value)
    }
}

impl From<&str> for TimestampInput {
    fn from(value: &str) -> Self {
        TimestampInput::Text(value.to_string())
    }
}

impl From<String> for TimestampInput {
    fn from(value: String) -> Self {
        TimestampInput::Text(value)
    }
}

impl From<DateTime<Utc>> for TimestampInput {
    fn from(value: DateTime<Utc>) -> Self {
        TimestampInput::Instant(value)
    }
}

/// Display category of a formatting call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormatCategory {
    Number,
    Ether,
    Address,
    Timestamp,
    TransactionData,
    Gas,
}

impl fmt::Display for FormatCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FormatCategory::Number => "number",
            FormatCategory::Ether => "ether value",
            FormatCategory::Address => "address",
            FormatCategory::Timestamp => "timestamp",
            FormatCategory::TransactionData => "transaction data",
            FormatCategory::Gas => "gas value",
        };
        f.write_str(name)
    }
}

/// Snapshot of the options a failed formatting call was made with
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum FormatOptions {
    Number(NumberFormatOptions),
    Ether { native_decimals: u32, decimals: u32 },
    Address(AddressFormatOptions),
    Timestamp(TimestampFormatOptions),
    TransactionData(TransactionDataFormatOptions),
    Gas(GasFormatOptions),
}

/// Failure of a Formatter operation, with the input and options it was given
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("Failed to format {category}: {message} (input: {raw:?})")]
pub struct FormattingError {
    pub category: FormatCategory,
    pub message: String,
    pub raw: String,
    pub options: FormatOptions,
}

impl FormattingError {
    pub fn new(
        category: FormatCategory,
        message: impl Into<String>,
        raw: impl Into<String>,
        options: FormatOptions,
    ) -> Self {
        Self {
            category,
            message: message.into(),
            raw: raw.into(),
            options,
        }
    }
}

/// Unknown value for an enumerated option given as text
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Unsupported {option}: {value}")]
pub struct UnsupportedOption {
    pub option: &'static str,
    pub value: String,
}

impl UnsupportedOption {
    pub fn new(option: &'static str, value: &str) -> Self {
        Self {
            option,
            value: value.to_string(),
        }
    }
}

/// Result type alias
pub type FormatResult<T> = Result<T, FormattingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_family_parsing() {
        assert_eq!("evm".parse::<ChainFamily>().unwrap(), ChainFamily::Evm);
        assert_eq!("COSMOS".parse::<ChainFamily>().unwrap(), ChainFamily::Cosmos);
        assert_eq!("Solana".parse::<ChainFamily>().unwrap(), ChainFamily::Solana);

        let err = "BITCOIN".parse::<ChainFamily>().unwrap_err();
        assert_eq!(err.option, "chain family");
        assert_eq!(err.value, "BITCOIN");
    }

    #[test]
    fn test_chain_family_names_round_trip() {
        for family in ChainFamily::ALL {
            assert_eq!(family.as_str().parse::<ChainFamily>().unwrap(), family);
            assert_eq!(family.to_string(), family.as_str());
        }
    }

    #[test]
    fn test_chain_family_serde_names() {
        let json = serde_json::to_string(&ChainFamily::Cosmos).unwrap();
        assert_eq!(json, "\"COSMOS\"");
        let family: ChainFamily = serde_json::from_str("\"SOLANA\"").unwrap();
        assert_eq!(family, ChainFamily::Solana);
        assert!(serde_json::from_str::<ChainFamily>("\"TRON\"").is_err());
    }

    #[test]
    fn test_numeric_input_rendering() {
        assert_eq!(NumericInput::from(1_234_567u64).to_string(), "1234567");
        assert_eq!(NumericInput::from(-5i64).to_string(), "-5");
        assert_eq!(NumericInput::from(1.5f64).to_string(), "1.5");
        assert_eq!(NumericInput::from(U256::MAX).to_string(), U256::MAX.to_string());
        assert_eq!(NumericInput::from("0x1f").to_string(), "0x1f");
    }

    #[test]
    fn test_formatting_error_message() {
        let err = FormattingError::new(
            FormatCategory::Gas,
            "invalid digit",
            "abc",
            FormatOptions::Gas(GasFormatOptions::default()),
        );
        assert_eq!(err.to_string(), "Failed to format gas value: invalid digit (input: \"abc\")");
    }
}
