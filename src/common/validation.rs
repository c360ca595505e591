//! Family-aware validity predicates.
//!
//! Every predicate is total: malformed, negative, overflowing or empty input
//! yields `false` and never an error.

use alloy::primitives::U256;
use tracing::trace;

use crate::common::math::{parse_u256, DecimalParts};
use crate::constants::{
    COSMOS_ADDRESS_BODY_LEN, COSMOS_TX_HASH_HEX_LEN, DEFAULT_MAX_AMOUNT_DECIMALS, EVM_ADDRESS_HEX_LEN,
    EVM_TX_HASH_HEX_LEN, MAX_CHAIN_ID, MAX_GAS_LIMIT, MAX_GAS_PRICE, MAX_SAFE_VALUE,
    SOLANA_KEY_MAX_LEN, SOLANA_KEY_MIN_LEN, SOLANA_SIGNATURE_MAX_LEN, SOLANA_SIGNATURE_MIN_LEN,
};
use crate::types::{ChainFamily, NumericInput};

pub use crate::common::abi::is_valid_abi;

/// Validate Ethereum address format (`0x` + 40 hex digits, any case)
pub fn is_valid_ethereum_address(address: &str) -> bool {
    match address.strip_prefix("0x") {
        Some(hex_part) => is_hex_of_len(hex_part, EVM_ADDRESS_HEX_LEN),
        None => false,
    }
}

/// Validate a bech32-shaped Cosmos address for the given human-readable prefix
pub fn is_valid_cosmos_address(address: &str, prefix: &str) -> bool {
    if address.is_empty() || prefix.is_empty() {
        return false;
    }

    let body = match address.strip_prefix(prefix).and_then(|rest| rest.strip_prefix('1')) {
        Some(body) => body,
        None => return false,
    };
    body.len() == COSMOS_ADDRESS_BODY_LEN && body.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// Validate a Solana public key by its base58-shaped length; the checksum is not verified
pub fn is_valid_solana_public_key(public_key: &str) -> bool {
    (SOLANA_KEY_MIN_LEN..=SOLANA_KEY_MAX_LEN).contains(&public_key.len())
        && public_key.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// Validate an address for any family. Cosmos needs the chain's prefix.
pub fn is_valid_address(address: &str, family: ChainFamily, prefix: Option<&str>) -> bool {
    match family {
        ChainFamily::Evm => is_valid_ethereum_address(address),
        ChainFamily::Cosmos => match prefix {
            Some(prefix) => is_valid_cosmos_address(address, prefix),
            None => {
                trace!("cosmos address check without a prefix");
                false
            }
        },
        ChainFamily::Solana => is_valid_solana_public_key(address),
    }
}

/// Validate transaction hash format
pub fn is_valid_transaction_hash(hash: &str, family: ChainFamily) -> bool {
    match family {
        ChainFamily::Evm => match hash.strip_prefix("0x") {
            Some(hex_part) => is_hex_of_len(hex_part, EVM_TX_HASH_HEX_LEN),
            None => false,
        },
        ChainFamily::Cosmos => {
            hash.len() == COSMOS_TX_HASH_HEX_LEN
                && hash.bytes().all(|b| b.is_ascii_digit() || (b'A'..=b'F').contains(&b))
        }
        ChainFamily::Solana => {
            (SOLANA_SIGNATURE_MIN_LEN..=SOLANA_SIGNATURE_MAX_LEN).contains(&hash.len())
                && hash.bytes().all(|b| b.is_ascii_alphanumeric())
        }
    }
}

/// Check that an amount is an unsigned decimal with at most `max_decimals`
/// fraction digits and a magnitude within `[0, MAX_SAFE_VALUE]`
pub fn is_valid_amount(amount: impl Into<NumericInput>, max_decimals: usize) -> bool {
    let amount = amount.into().to_numeric_string();

    // Decimal notation only; hex literals are not amounts.
    if amount.starts_with("0x") || amount.starts_with("0X") {
        trace!(%amount, "amount rejected: hex literal");
        return false;
    }

    let parts = match DecimalParts::parse(&amount) {
        Ok(parts) => parts,
        Err(e) => {
            trace!(%amount, error = %e, "amount rejected");
            return false;
        }
    };

    if parts.fraction().len() > max_decimals {
        trace!(%amount, max_decimals, "amount rejected: too many decimal places");
        return false;
    }

    match parse_u256(parts.integer()) {
        Some(integer) if integer == MAX_SAFE_VALUE => !parts.has_nonzero_fraction(),
        Some(_) => true,
        None => {
            trace!(%amount, "amount rejected: exceeds 2^256 - 1");
            false
        }
    }
}

/// `is_valid_amount` with the default 18 decimal places
pub fn is_valid_amount_default(amount: impl Into<NumericInput>) -> bool {
    is_valid_amount(amount, DEFAULT_MAX_AMOUNT_DECIMALS)
}

/// Validate gas parameters; an absent parameter is valid
pub fn is_valid_gas_params(gas_limit: Option<NumericInput>, gas_price: Option<NumericInput>) -> bool {
    if let Some(limit) = gas_limit {
        if !is_positive_within(&limit, MAX_GAS_LIMIT) {
            trace!(gas_limit = %limit, "gas limit rejected");
            return false;
        }
    }

    if let Some(price) = gas_price {
        if !is_positive_within(&price, MAX_GAS_PRICE) {
            trace!(gas_price = %price, "gas price rejected");
            return false;
        }
    }

    true
}

/// Validate chain ID is an integer in `(0, MAX_CHAIN_ID]`
pub fn is_valid_chain_id(chain_id: impl Into<NumericInput>) -> bool {
    is_positive_within(&chain_id.into(), MAX_CHAIN_ID)
}

/// Validate contract bytecode (`0x` prefix, even length, hex body)
pub fn is_valid_bytecode(bytecode: &str) -> bool {
    match bytecode.strip_prefix("0x") {
        Some(body) => bytecode.len() % 2 == 0 && body.bytes().all(|b| b.is_ascii_hexdigit()),
        None => false,
    }
}

/// Validate a method signature such as `transfer(address,uint256)`
pub fn is_valid_method_signature(signature: &str) -> bool {
    let (name, rest) = match signature.split_once('(') {
        Some(split) => split,
        None => return false,
    };
    let args = match rest.strip_suffix(')') {
        Some(args) => args,
        None => return false,
    };
    if !is_identifier(name) {
        return false;
    }
    if args.is_empty() {
        return true;
    }

    // Whitespace may pad the list and the commas, but a list of only
    // whitespace is not an empty argument list.
    let trimmed = args.trim();
    if trimmed.is_empty() {
        return false;
    }
    trimmed.split(',').all(|arg| {
        let arg = arg.trim();
        let base = arg.strip_suffix("[]").unwrap_or(arg);
        is_identifier(base)
    })
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

fn is_hex_of_len(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| b.is_ascii_hexdigit())
}

fn is_positive_within(value: &NumericInput, max: U256) -> bool {
    match parse_u256(&value.to_numeric_string()) {
        Some(n) => !n.is_zero() && n <= max,
        None => false,
    }
}
