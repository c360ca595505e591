//! Exact decimal-string arithmetic used by validation and formatting.
//!
//! Magnitudes routinely exceed 128 bits (wei amounts, gas prices), so values
//! are kept as digit strings or big integers and never converted to `f64`.

use alloy::primitives::U256;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::types::UnsupportedOption;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DecimalError {
    #[error("empty numeric value")]
    Empty,

    #[error("negative values are not supported: {0}")]
    Negative(String),

    #[error("invalid numeric value: {0}")]
    InvalidDigit(String),

    #[error("fractional value where an integer is required: {0}")]
    Fractional(String),
}

/// How a fraction longer than the requested precision is shortened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RoundingMode {
    /// Half-up at the cutoff digit
    #[default]
    Round,
    Truncate,
    /// Up whenever a discarded digit is non-zero
    Ceil,
    Floor,
}

impl FromStr for RoundingMode {
    type Err = UnsupportedOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ROUND" => Ok(RoundingMode::Round),
            "TRUNCATE" => Ok(RoundingMode::Truncate),
            "CEIL" => Ok(RoundingMode::Ceil),
            "FLOOR" => Ok(RoundingMode::Floor),
            _ => Err(UnsupportedOption::new("rounding mode", s)),
        }
    }
}

/// Non-negative decimal number split into its digit strings.
///
/// `integer` has no leading zeros (except a lone `0`) and is never empty;
/// `fraction` holds the digits after the separator, possibly empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecimalParts {
    integer: String,
    fraction: String,
}

impl DecimalParts {
    /// Parse `123`, `123.45`, `.5`, `5.` or a `0x` hex integer.
    pub fn parse(value: &str) -> Result<Self, DecimalError> {
        if value.is_empty() {
            return Err(DecimalError::Empty);
        }
        if value.starts_with('-') {
            return Err(DecimalError::Negative(value.to_string()));
        }
        if let Some(hex_digits) = strip_hex_prefix(value) {
            let parsed = parse_hex_biguint(hex_digits)
                .ok_or_else(|| DecimalError::InvalidDigit(value.to_string()))?;
            return Ok(Self::from_integer(parsed.to_string()));
        }

        let (integer, fraction) = match value.split_once('.') {
            Some((i, f)) => (i, f),
            None => (value, ""),
        };
        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(integer) || !all_digits(fraction) || (integer.is_empty() && fraction.is_empty()) {
            return Err(DecimalError::InvalidDigit(value.to_string()));
        }

        Ok(Self {
            integer: normalize_integer(integer),
            fraction: fraction.to_string(),
        })
    }

    pub fn from_integer(integer: impl Into<String>) -> Self {
        Self {
            integer: normalize_integer(&integer.into()),
            fraction: String::new(),
        }
    }

    /// `value / 10^decimals`, exact. Trailing fraction zeros are trimmed but
    /// at least one fraction digit is kept when `decimals > 0` (`1.0`).
    pub fn from_scaled(value: &BigUint, decimals: u32) -> Self {
        let digits = value.to_string();
        let decimals = decimals as usize;
        if decimals == 0 {
            return Self::from_integer(digits);
        }

        let padded = format!("{:0>width$}", digits, width = decimals + 1);
        let (integer, fraction) = padded.split_at(padded.len() - decimals);
        let trimmed = fraction.trim_end_matches('0');

        Self {
            integer: normalize_integer(integer),
            fraction: if trimmed.is_empty() { "0".to_string() } else { trimmed.to_string() },
        }
    }

    pub fn integer(&self) -> &str {
        &self.integer
    }

    pub fn fraction(&self) -> &str {
        &self.fraction
    }

    pub fn has_nonzero_fraction(&self) -> bool {
        self.fraction.bytes().any(|b| b != b'0')
    }

    /// Shorten the fraction to `decimals` digits. A round-up carries into the
    /// integer part (`999.996` at 2 places becomes `1000.00`).
    pub fn round(&self, decimals: usize, mode: RoundingMode) -> Self {
        if self.fraction.len() <= decimals {
            return self.clone();
        }

        let (kept, discarded) = self.fraction.split_at(decimals);
        let round_up = match mode {
            RoundingMode::Round => discarded.as_bytes()[0] >= b'5',
            RoundingMode::Ceil => discarded.bytes().any(|b| b != b'0'),
            RoundingMode::Truncate | RoundingMode::Floor => false,
        };

        if !round_up {
            return Self {
                integer: self.integer.clone(),
                fraction: kept.to_string(),
            };
        }

        let bumped = increment_digits(&format!("{}{}", self.integer, kept));
        let (integer, fraction) = bumped.split_at(bumped.len() - decimals);
        Self {
            integer: normalize_integer(integer),
            fraction: fraction.to_string(),
        }
    }

    /// Right-pad the fraction with zeros up to `decimals` digits.
    pub fn pad(&self, decimals: usize) -> Self {
        Self {
            integer: self.integer.clone(),
            fraction: format!("{:0<width$}", self.fraction, width = decimals),
        }
    }
}

impl fmt::Display for DecimalParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.fraction.is_empty() {
            f.write_str(&self.integer)
        } else {
            write!(f, "{}.{}", self.integer, self.fraction)
        }
    }
}

/// Parse a non-negative integer given in decimal or `0x` hex, unbounded.
pub fn parse_unsigned_integer(value: &str) -> Result<BigUint, DecimalError> {
    let parts = DecimalParts::parse(value)?;
    if parts.has_nonzero_fraction() {
        return Err(DecimalError::Fractional(value.to_string()));
    }
    BigUint::parse_bytes(parts.integer.as_bytes(), 10)
        .ok_or_else(|| DecimalError::InvalidDigit(value.to_string()))
}

/// Parse a decimal or `0x` hex integer into a U256; `None` on anything
/// malformed, fractional, negative or wider than 256 bits.
pub fn parse_u256(value: &str) -> Option<U256> {
    if let Some(hex_digits) = strip_hex_prefix(value) {
        if hex_digits.is_empty() || !hex_digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        return U256::from_str_radix(hex_digits, 16).ok();
    }
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    U256::from_str_radix(value, 10).ok()
}

/// Insert `separator` every three digits from the right.
pub fn group_digits(integer: &str, separator: &str) -> String {
    let len = integer.len();
    let mut grouped = String::with_capacity(len + separator.len() * (len / 3));
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push_str(separator);
        }
        grouped.push(ch);
    }
    grouped
}

fn strip_hex_prefix(value: &str) -> Option<&str> {
    value.strip_prefix("0x").or_else(|| value.strip_prefix("0X"))
}

fn parse_hex_biguint(digits: &str) -> Option<BigUint> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    BigUint::parse_bytes(digits.as_bytes(), 16)
}

fn normalize_integer(integer: &str) -> String {
    let trimmed = integer.trim_start_matches('0');
    if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Add one to a string of ASCII digits, growing it on overflow.
fn increment_digits(digits: &str) -> String {
    let mut bytes = digits.as_bytes().to_vec();
    for b in bytes.iter_mut().rev() {
        if *b == b'9' {
            *b = b'0';
        } else {
            *b += 1;
            return String::from_utf8_lossy(&bytes).into_owned();
        }
    }
    bytes.insert(0, b'1');
    String::from_utf8_lossy(&bytes).into_owned()
}
