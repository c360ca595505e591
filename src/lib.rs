// chainfmt: multi-chain validation and display formatting

pub mod common;
pub mod config;
pub mod registry;

// Core types
pub mod constants;
pub mod types;

// Re-exports for convenience
pub use crate::config::Settings;
pub use registry::{format_address_for_chain, validate_address_for_chain, ChainConfig, ChainRegistry, RegistryError};
pub use types::{ChainFamily, FormatResult, FormattingError, NumericInput, TimestampInput, UnsupportedOption};

// Re-export common functionality
pub use common::abi::*;
pub use common::formatting::*;
pub use common::math::*;
pub use common::time::*;
pub use common::validation::*;
