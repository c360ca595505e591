use alloy::primitives::U256;

// Numeric bounds
pub const MAX_SAFE_VALUE: U256 = U256::MAX; // 2^256 - 1
pub const MAX_GAS_LIMIT: U256 = U256::from_limbs([u64::MAX, 0, 0, 0]); // 2^64 - 1
pub const MAX_GAS_PRICE: U256 = U256::MAX;
pub const MAX_CHAIN_ID: U256 = U256::MAX;

// Unit scales
pub const ETHER_DECIMALS: u32 = 18;
pub const GWEI_DECIMALS: u32 = 9;

/// Largest decimal exponent that still fits a U256 (10^77 < 2^256 < 10^78).
pub const MAX_DISPLAY_DECIMALS: u32 = 77;

// Validator defaults
pub const DEFAULT_MAX_AMOUNT_DECIMALS: usize = 18;

// Address shapes
pub const EVM_ADDRESS_HEX_LEN: usize = 40;
pub const COSMOS_ADDRESS_BODY_LEN: usize = 38;
pub const SOLANA_KEY_MIN_LEN: usize = 32;
pub const SOLANA_KEY_MAX_LEN: usize = 44;

// Transaction hash shapes
pub const EVM_TX_HASH_HEX_LEN: usize = 64;
pub const COSMOS_TX_HASH_HEX_LEN: usize = 64;
pub const SOLANA_SIGNATURE_MIN_LEN: usize = 87;
pub const SOLANA_SIGNATURE_MAX_LEN: usize = 88;

// Formatter defaults
pub const DEFAULT_NUMBER_DECIMALS: u32 = 2;
pub const DEFAULT_ETHER_DECIMALS: u32 = 6;
pub const DEFAULT_GAS_DECIMALS: u32 = 2;
pub const DEFAULT_TRUNCATE_LENGTH: usize = 6;
pub const DEFAULT_GROUP_SEPARATOR: &str = ",";
pub const DEFAULT_DECIMAL_SEPARATOR: &str = ".";
pub const DEFAULT_TIMEZONE: &str = "UTC";
pub const DEFAULT_LOCALE: &str = "en-US";

pub const TRUNCATION_MARKER: &str = "...";
