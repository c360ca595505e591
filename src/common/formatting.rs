//! Display formatting for numbers, native amounts, addresses, payloads and gas.

use alloy::primitives::Address;
use bech32::primitives::decode::CheckedHrpstring;
use bech32::Bech32;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

use crate::common::math::{group_digits, parse_unsigned_integer, DecimalParts, RoundingMode};
use crate::constants::{
    DEFAULT_DECIMAL_SEPARATOR, DEFAULT_ETHER_DECIMALS, DEFAULT_GAS_DECIMALS, DEFAULT_GROUP_SEPARATOR,
    DEFAULT_NUMBER_DECIMALS, DEFAULT_TRUNCATE_LENGTH, ETHER_DECIMALS, EVM_ADDRESS_HEX_LEN,
    GWEI_DECIMALS, MAX_DISPLAY_DECIMALS, TRUNCATION_MARKER,
};
use crate::types::{
    ChainFamily, FormatCategory, FormatOptions, FormatResult, FormattingError, NumericInput,
    UnsupportedOption,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NumberFormatOptions {
    pub decimals: u32,
    pub group_separator: String,
    pub decimal_separator: String,
    pub prefix: String,
    pub suffix: String,
    pub pad_decimals: bool,
    pub rounding_mode: RoundingMode,
}

impl Default for NumberFormatOptions {
    fn default() -> Self {
        Self {
            decimals: DEFAULT_NUMBER_DECIMALS,
            group_separator: DEFAULT_GROUP_SEPARATOR.to_string(),
            decimal_separator: DEFAULT_DECIMAL_SEPARATOR.to_string(),
            prefix: String::new(),
            suffix: String::new(),
            pad_decimals: false,
            rounding_mode: RoundingMode::Round,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AddressFormatOptions {
    pub family: ChainFamily,
    pub truncate: bool,
    pub truncate_length: usize,
    /// EIP-55 mixed case for EVM addresses; lowercase otherwise
    pub checksum: bool,
}

impl Default for AddressFormatOptions {
    fn default() -> Self {
        Self {
            family: ChainFamily::Evm,
            truncate: false,
            truncate_length: DEFAULT_TRUNCATE_LENGTH,
            checksum: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DataFormat {
    #[default]
    Hex,
    Bytes,
    Utf8,
}

impl FromStr for DataFormat {
    type Err = UnsupportedOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "HEX" => Ok(DataFormat::Hex),
            "BYTES" => Ok(DataFormat::Bytes),
            "UTF8" => Ok(DataFormat::Utf8),
            _ => Err(UnsupportedOption::new("data format", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransactionDataFormatOptions {
    pub format: DataFormat,
    /// Re-add `0x` to HEX and BYTES output
    pub prefix: bool,
    /// HEX only
    pub uppercase: bool,
}

impl Default for TransactionDataFormatOptions {
    fn default() -> Self {
        Self {
            format: DataFormat::Hex,
            prefix: true,
            uppercase: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GasFormat {
    #[default]
    Gwei,
    Wei,
}

impl GasFormat {
    pub fn unit(&self) -> &'static str {
        match self {
            GasFormat::Gwei => "gwei",
            GasFormat::Wei => "wei",
        }
    }
}

impl FromStr for GasFormat {
    type Err = UnsupportedOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GWEI" => Ok(GasFormat::Gwei),
            "WEI" => Ok(GasFormat::Wei),
            _ => Err(UnsupportedOption::new("gas format", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GasFormatOptions {
    pub format: GasFormat,
    pub decimals: u32,
    pub include_unit: bool,
}

impl Default for GasFormatOptions {
    fn default() -> Self {
        Self {
            format: GasFormat::Gwei,
            decimals: DEFAULT_GAS_DECIMALS,
            include_unit: true,
        }
    }
}

/// Build a `FormattingError` and log it
pub(crate) fn formatting_failure(
    category: FormatCategory,
    message: impl Into<String>,
    raw: impl Into<String>,
    options: FormatOptions,
) -> FormattingError {
    let err = FormattingError::new(category, message, raw, options);
    debug!(category = %err.category, raw = %err.raw, reason = %err.message, "formatting failed");
    err
}

/// Format a non-negative number with grouping, rounding and optional padding
pub fn format_number(value: impl Into<NumericInput>, options: &NumberFormatOptions) -> FormatResult<String> {
    let raw = value.into().to_numeric_string();
    let fail = |message: String| {
        formatting_failure(FormatCategory::Number, message, raw.as_str(), FormatOptions::Number(options.clone()))
    };
    check_decimals("decimals", options.decimals).map_err(fail)?;
    let parts = DecimalParts::parse(&raw).map_err(|e| fail(e.to_string()))?;
    Ok(render_number(&parts, options))
}

// At most as many places as U256::MAX has digits.
fn check_decimals(name: &str, decimals: u32) -> Result<(), String> {
    if decimals > MAX_DISPLAY_DECIMALS {
        return Err(format!("{} must be at most {} (got {})", name, MAX_DISPLAY_DECIMALS, decimals));
    }
    Ok(())
}

fn render_number(parts: &DecimalParts, options: &NumberFormatOptions) -> String {
    let decimals = options.decimals as usize;
    let mut shaped = parts.round(decimals, options.rounding_mode);
    if options.pad_decimals {
        shaped = shaped.pad(decimals);
    }

    let integer = group_digits(shaped.integer(), &options.group_separator);
    let body = if shaped.fraction().is_empty() {
        integer
    } else {
        format!("{}{}{}", integer, options.decimal_separator, shaped.fraction())
    };

    format!("{}{}{}", options.prefix, body, options.suffix)
}

/// Format a smallest-unit amount of a native currency with `native_decimals`
/// places (18 for ETH, 9 for SOL, 6 for ATOM) to `decimals` display places
pub fn format_native_amount(
    value: impl Into<NumericInput>,
    native_decimals: u32,
    decimals: u32,
) -> FormatResult<String> {
    let raw = value.into().to_numeric_string();
    let fail = |message: String| {
        formatting_failure(
            FormatCategory::Ether,
            message,
            raw.as_str(),
            FormatOptions::Ether { native_decimals, decimals },
        )
    };
    check_decimals("native decimals", native_decimals).map_err(fail)?;
    check_decimals("decimals", decimals).map_err(fail)?;
    let units = parse_unsigned_integer(&raw).map_err(|e| fail(e.to_string()))?;

    let whole = DecimalParts::from_scaled(&units, native_decimals);
    let options = NumberFormatOptions {
        decimals,
        ..Default::default()
    };
    Ok(render_number(&whole, &options))
}

/// Format wei amount to ETH with specified decimals
pub fn format_ether(wei: impl Into<NumericInput>, decimals: u32) -> FormatResult<String> {
    format_native_amount(wei, ETHER_DECIMALS, decimals)
}

/// `format_ether` with 6 display decimals
pub fn format_ether_default(wei: impl Into<NumericInput>) -> FormatResult<String> {
    format_ether(wei, DEFAULT_ETHER_DECIMALS)
}

/// Format gas from wei, either in gwei or as a whole wei count
pub fn format_gas(value: impl Into<NumericInput>, options: &GasFormatOptions) -> FormatResult<String> {
    let raw = value.into().to_numeric_string();
    let fail = |message: String| {
        formatting_failure(FormatCategory::Gas, message, raw.as_str(), FormatOptions::Gas(options.clone()))
    };
    check_decimals("decimals", options.decimals).map_err(fail)?;
    let wei = parse_unsigned_integer(&raw).map_err(|e| fail(e.to_string()))?;

    let formatted = match options.format {
        GasFormat::Gwei => render_number(
            &DecimalParts::from_scaled(&wei, GWEI_DECIMALS),
            &NumberFormatOptions {
                decimals: options.decimals,
                pad_decimals: true,
                ..Default::default()
            },
        ),
        GasFormat::Wei => render_number(
            &DecimalParts::from_integer(wei.to_string()),
            &NumberFormatOptions {
                decimals: 0,
                ..Default::default()
            },
        ),
    };

    if options.include_unit {
        Ok(format!("{} {}", formatted, options.format.unit()))
    } else {
        Ok(formatted)
    }
}

/// Format a blockchain address according to its chain family
pub fn format_address(address: &str, options: &AddressFormatOptions) -> FormatResult<String> {
    let canonical = match options.family {
        ChainFamily::Evm => canonical_evm_address(address, options.checksum),
        ChainFamily::Cosmos => canonical_cosmos_address(address),
        ChainFamily::Solana => Ok(address.to_string()),
    }
    .map_err(|message| {
        formatting_failure(FormatCategory::Address, message, address, FormatOptions::Address(options.clone()))
    })?;

    if options.truncate {
        Ok(truncate_address(&canonical, options.truncate_length))
    } else {
        Ok(canonical)
    }
}

/// Shorten to `head...tail` with `length` characters on each side. Inputs
/// that would not get shorter are returned unchanged.
pub fn truncate_address(address: &str, length: usize) -> String {
    let count = address.chars().count();
    if count <= length * 2 + TRUNCATION_MARKER.len() {
        return address.to_string();
    }

    let head: String = address.chars().take(length).collect();
    let tail: String = address.chars().skip(count - length).collect();
    format!("{}{}{}", head, TRUNCATION_MARKER, tail)
}

fn canonical_evm_address(address: &str, checksum: bool) -> Result<String, String> {
    let hex_part = address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))
        .unwrap_or(address);
    if hex_part.len() != EVM_ADDRESS_HEX_LEN || !hex_part.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err("invalid EVM address".to_string());
    }

    let bytes = hex::decode(hex_part).map_err(|e| e.to_string())?;
    let checksummed = Address::from_slice(&bytes).to_checksum(None);

    // Mixed-case input claims to be checksummed and must match.
    let has_lower = hex_part.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = hex_part.bytes().any(|b| b.is_ascii_uppercase());
    if has_lower && has_upper && checksummed[2..] != *hex_part {
        return Err("bad address checksum".to_string());
    }

    if checksum {
        Ok(checksummed)
    } else {
        Ok(format!("0x{}", hex_part.to_ascii_lowercase()))
    }
}

// Classic Bech32 only; a Bech32m checksum is an error, not something to rewrite.
fn canonical_cosmos_address(address: &str) -> Result<String, String> {
    let checked = CheckedHrpstring::new::<Bech32>(address).map_err(|e| e.to_string())?;
    let data: Vec<u8> = checked.byte_iter().collect();
    bech32::encode::<Bech32>(checked.hrp(), &data).map_err(|e| e.to_string())
}

/// Format hex transaction data as hex, spaced bytes or UTF-8 text
pub fn format_transaction_data(data: &str, options: &TransactionDataFormatOptions) -> FormatResult<String> {
    let fail = |message: String| {
        formatting_failure(
            FormatCategory::TransactionData,
            message,
            data,
            FormatOptions::TransactionData(options.clone()),
        )
    };

    let body = data.strip_prefix("0x").unwrap_or(data);
    if !body.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(fail("transaction data is not hex".to_string()));
    }

    let formatted = match options.format {
        DataFormat::Hex => {
            if options.uppercase {
                body.to_ascii_uppercase()
            } else {
                body.to_ascii_lowercase()
            }
        }
        DataFormat::Bytes => body
            .as_bytes()
            .chunks(2)
            .map(|pair| String::from_utf8_lossy(pair).into_owned())
            .collect::<Vec<_>>()
            .join(" "),
        DataFormat::Utf8 => {
            let bytes = hex::decode(body).map_err(|e| fail(e.to_string()))?;
            return Ok(String::from_utf8_lossy(&bytes).into_owned());
        }
    };

    if options.prefix {
        Ok(format!("0x{}", formatted))
    } else {
        Ok(formatted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::U256;

    fn number(value: impl Into<NumericInput>, options: NumberFormatOptions) -> String {
        format_number(value, &options).unwrap()
    }

    #[test]
    fn test_format_number_grouping() {
        let whole = NumberFormatOptions {
            decimals: 0,
            ..Default::default()
        };
        assert_eq!(number(1_234_567u64, whole.clone()), "1,234,567");
        assert_eq!(number("999", whole.clone()), "999");
        assert_eq!(number(0u64, whole), "0");
        assert_eq!(number("1234.5", NumberFormatOptions::default()), "1,234.5");
    }

    #[test]
    fn test_format_number_custom_separators() {
        let options = NumberFormatOptions {
            decimals: 2,
            group_separator: ".".to_string(),
            decimal_separator: ",".to_string(),
            prefix: "€ ".to_string(),
            suffix: " EUR".to_string(),
            pad_decimals: true,
            ..Default::default()
        };
        assert_eq!(number("1234567.891", options), "€ 1.234.567,89 EUR");
    }

    #[test]
    fn test_format_number_rounding_carry() {
        assert_eq!(number("999.996", NumberFormatOptions::default()), "1,000.00");
        let ceil = NumberFormatOptions {
            rounding_mode: RoundingMode::Ceil,
            ..Default::default()
        };
        assert_eq!(number("1.001", ceil), "1.01");
        let truncate = NumberFormatOptions {
            rounding_mode: RoundingMode::Truncate,
            ..Default::default()
        };
        assert_eq!(number("1.009", truncate), "1.00");
        let whole = NumberFormatOptions {
            decimals: 0,
            ..Default::default()
        };
        assert_eq!(number("1999.5", whole), "2,000");
    }

    #[test]
    fn test_format_number_padding_length() {
        for decimals in 0..6u32 {
            let options = NumberFormatOptions {
                decimals,
                pad_decimals: true,
                group_separator: String::new(),
                ..Default::default()
            };
            for value in ["0", "12", "3.1", "45.678901", "100.99999"] {
                let formatted = number(value, options.clone());
                let fraction_len = formatted.split('.').nth(1).map_or(0, str::len);
                assert_eq!(fraction_len, decimals as usize, "{value} -> {formatted}");
            }
        }
    }

    #[test]
    fn test_format_number_integer_round_trip() {
        let options = NumberFormatOptions {
            decimals: 4,
            pad_decimals: true,
            ..Default::default()
        };
        let values = [U256::ZERO, U256::from(1_234_567_890u64), U256::MAX];
        for value in values {
            let formatted = number(value, options.clone());
            let integer: String = formatted.split('.').next().unwrap().replace(',', "");
            assert_eq!(integer, value.to_string());
        }
    }

    #[test]
    fn test_format_number_rejects_garbage() {
        let err = format_number("12abc", &NumberFormatOptions::default()).unwrap_err();
        assert_eq!(err.category, FormatCategory::Number);
        assert_eq!(err.raw, "12abc");
        assert_eq!(err.options, FormatOptions::Number(NumberFormatOptions::default()));

        assert!(format_number(-3i64, &NumberFormatOptions::default()).is_err());
        assert!(format_number("", &NumberFormatOptions::default()).is_err());
        assert!(format_number(f64::INFINITY, &NumberFormatOptions::default()).is_err());
    }

    #[test]
    fn test_format_number_hex_input() {
        let whole = NumberFormatOptions {
            decimals: 0,
            ..Default::default()
        };
        assert_eq!(number("0xf4240", whole), "1,000,000");
    }

    #[test]
    fn test_format_ether() {
        assert_eq!(format_ether_default("1000000000000000000").unwrap(), "1.0");
        assert_eq!(format_ether_default(1_234_567_890_123_456_789u64).unwrap(), "1.234568");
        assert_eq!(format_ether("1500000000000000000000", 2).unwrap(), "1,500.0");
        assert_eq!(format_ether(1u64, 6).unwrap(), "0.000000");

        let err = format_ether("1.5", 6).unwrap_err();
        assert_eq!(err.category, FormatCategory::Ether);
        assert_eq!(err.options, FormatOptions::Ether { native_decimals: 18, decimals: 6 });
    }

    #[test]
    fn test_format_native_amount() {
        assert_eq!(format_native_amount(2_500_000u64, 6, 2).unwrap(), "2.5");
        assert_eq!(format_native_amount(1_000_000_000u64, 9, 4).unwrap(), "1.0");
        assert_eq!(format_native_amount(5u64, 0, 2).unwrap(), "5");

        assert!(format_native_amount(5u64, 78, 2).is_err());
        let err = format_native_amount(5u64, 18, u32::MAX).unwrap_err();
        assert_eq!(err.options, FormatOptions::Ether { native_decimals: 18, decimals: u32::MAX });
    }

    #[test]
    fn test_decimals_are_capped() {
        let padded = NumberFormatOptions {
            decimals: u32::MAX,
            pad_decimals: true,
            ..Default::default()
        };
        let err = format_number("1", &padded).unwrap_err();
        assert_eq!(err.category, FormatCategory::Number);
        assert!(err.message.contains("at most 77"));

        let widest = NumberFormatOptions {
            decimals: MAX_DISPLAY_DECIMALS,
            pad_decimals: true,
            ..Default::default()
        };
        assert_eq!(format_number("1", &widest).unwrap(), format!("1.{}", "0".repeat(77)));

        let gas = GasFormatOptions {
            decimals: 78,
            ..Default::default()
        };
        assert_eq!(format_gas(1u64, &gas).unwrap_err().category, FormatCategory::Gas);
    }

    #[test]
    fn test_format_gas() {
        let gwei = GasFormatOptions::default();
        assert_eq!(format_gas(1_500_000_000u64, &gwei).unwrap(), "1.50 gwei");
        assert_eq!(format_gas("30000000000", &gwei).unwrap(), "30.00 gwei");
        assert_eq!(format_gas(1u64, &gwei).unwrap(), "0.00 gwei");

        let wei = GasFormatOptions {
            format: GasFormat::Wei,
            ..Default::default()
        };
        assert_eq!(format_gas(21_000u64, &wei).unwrap(), "21,000 wei");

        let bare = GasFormatOptions {
            include_unit: false,
            decimals: 3,
            ..Default::default()
        };
        assert_eq!(format_gas(1_234_567_890u64, &bare).unwrap(), "1.235");

        let err = format_gas("lots", &gwei).unwrap_err();
        assert_eq!(err.category, FormatCategory::Gas);
        assert_eq!(err.options, FormatOptions::Gas(gwei));
    }

    #[test]
    fn test_format_evm_address() {
        let lower = "0x7a250d5630b4cf539739df2c5dacb4c659f2488d";
        let checksummed = "0x7a250d5630B4cF539739dF2C5dAcb4c659F2488D";

        let options = AddressFormatOptions::default();
        assert_eq!(format_address(lower, &options).unwrap(), checksummed);
        assert_eq!(format_address(checksummed, &options).unwrap(), checksummed);
        assert_eq!(format_address(&lower[2..], &options).unwrap(), checksummed);

        let no_checksum = AddressFormatOptions {
            checksum: false,
            ..Default::default()
        };
        assert_eq!(format_address(checksummed, &no_checksum).unwrap(), lower);

        let truncated = AddressFormatOptions {
            truncate: true,
            ..Default::default()
        };
        assert_eq!(format_address(lower, &truncated).unwrap(), "0x7a25...F2488D");
    }

    #[test]
    fn test_format_evm_address_rejects_bad_input() {
        let options = AddressFormatOptions::default();
        let bad_checksum = "0x7A250d5630B4cF539739dF2C5dAcb4c659F2488D";
        let err = format_address(bad_checksum, &options).unwrap_err();
        assert_eq!(err.category, FormatCategory::Address);
        assert_eq!(err.raw, bad_checksum);

        assert!(format_address("0x1234", &options).is_err());
        assert!(format_address("", &options).is_err());
    }

    #[test]
    fn test_format_cosmos_address() {
        let cosmos = AddressFormatOptions {
            family: ChainFamily::Cosmos,
            ..Default::default()
        };
        let address = "cosmos1qypqxpq9qcrsszg2pvxq6rs0zqg3yyc5lzv7xu";
        assert_eq!(format_address(address, &cosmos).unwrap(), address);
        assert_eq!(format_address(&address.to_uppercase(), &cosmos).unwrap(), address);

        let truncated = AddressFormatOptions {
            truncate: true,
            truncate_length: 8,
            ..cosmos.clone()
        };
        assert_eq!(format_address(address, &truncated).unwrap(), "cosmos1q...c5lzv7xu");

        assert!(format_address("cosmos1qypqxpq9qcrsszg2pvxq6rs0zqg3yyc5lzv7xx", &cosmos).is_err());
        assert!(format_address("not-bech32", &cosmos).is_err());

        // same payload under a Bech32m checksum
        let hrp = bech32::Hrp::parse("cosmos").unwrap();
        let payload: Vec<u8> = (0u8..20).collect();
        let classic = bech32::encode::<Bech32>(hrp, &payload).unwrap();
        let modern = bech32::encode::<bech32::Bech32m>(hrp, &payload).unwrap();
        assert_eq!(format_address(&classic, &cosmos).unwrap(), classic);
        let err = format_address(&modern, &cosmos).unwrap_err();
        assert_eq!(err.category, FormatCategory::Address);
        assert_eq!(err.raw, modern);
    }

    #[test]
    fn test_format_solana_address() {
        let solana = AddressFormatOptions {
            family: ChainFamily::Solana,
            truncate: true,
            truncate_length: 4,
            ..Default::default()
        };
        assert_eq!(
            format_address("4sGjMW1sUnHzSxGspuhpqLDx6wiyjNtZ", &solana).unwrap(),
            "4sGj...jNtZ"
        );
        let passthrough = AddressFormatOptions {
            family: ChainFamily::Solana,
            ..Default::default()
        };
        assert_eq!(format_address("anything", &passthrough).unwrap(), "anything");
    }

    #[test]
    fn test_truncate_address_idempotent() {
        let address = "0x7a250d5630B4cF539739dF2C5dAcb4c659F2488D";
        for length in 0..=6 {
            let once = truncate_address(address, length);
            assert_eq!(truncate_address(&once, length), once);
        }
        assert_eq!(truncate_address("short", 6), "short");
        assert_eq!(truncate_address(address, 0), "...");
    }

    #[test]
    fn test_format_transaction_data() {
        let bytes = TransactionDataFormatOptions {
            format: DataFormat::Bytes,
            ..Default::default()
        };
        assert_eq!(format_transaction_data("0xAABB", &bytes).unwrap(), "0xAA BB");
        assert_eq!(format_transaction_data("aabbc", &bytes).unwrap(), "0xaa bb c");

        let hex = TransactionDataFormatOptions::default();
        assert_eq!(format_transaction_data("0xa9059cbb", &hex).unwrap(), "0xA9059CBB");

        let lower = TransactionDataFormatOptions {
            uppercase: false,
            prefix: false,
            ..Default::default()
        };
        assert_eq!(format_transaction_data("0xA9059CBB", &lower).unwrap(), "a9059cbb");

        let utf8 = TransactionDataFormatOptions {
            format: DataFormat::Utf8,
            ..Default::default()
        };
        assert_eq!(format_transaction_data("0x68656c6c6f", &utf8).unwrap(), "hello");
        assert_eq!(format_transaction_data("0xff", &utf8).unwrap(), "\u{FFFD}");
    }

    #[test]
    fn test_format_transaction_data_errors() {
        let err = format_transaction_data("0xzz", &TransactionDataFormatOptions::default()).unwrap_err();
        assert_eq!(err.category, FormatCategory::TransactionData);
        assert_eq!(err.raw, "0xzz");

        let utf8 = TransactionDataFormatOptions {
            format: DataFormat::Utf8,
            ..Default::default()
        };
        assert!(format_transaction_data("0xabc", &utf8).is_err());
    }

    #[test]
    fn test_option_enums_from_str() {
        assert_eq!("bytes".parse::<DataFormat>().unwrap(), DataFormat::Bytes);
        assert_eq!("WEI".parse::<GasFormat>().unwrap(), GasFormat::Wei);
        assert_eq!("BASE64".parse::<DataFormat>().unwrap_err().option, "data format");
        assert!("ETHER".parse::<GasFormat>().is_err());
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let options: NumberFormatOptions =
            serde_json::from_str(r#"{"decimals": 4, "roundingMode": "CEIL"}"#).unwrap();
        assert_eq!(options.decimals, 4);
        assert_eq!(options.rounding_mode, RoundingMode::Ceil);
        assert_eq!(options.group_separator, ",");

        assert!(serde_json::from_str::<NumberFormatOptions>(r#"{"roundingMode": "BANKERS"}"#).is_err());

        let address: AddressFormatOptions = serde_json::from_str(r#"{"family": "COSMOS"}"#).unwrap();
        assert_eq!(address.family, ChainFamily::Cosmos);
        assert_eq!(address.truncate_length, 6);
    }
}
