//! 체인 설정 레지스트리
//!
//! 지원 네트워크의 패밀리, 네이티브 통화, RPC/익스플로러 URL 및
//! 주소 접두사를 보관합니다. 생성 후에는 읽기 전용입니다.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::common::formatting::{format_address, formatting_failure, truncate_address, AddressFormatOptions};
use crate::common::validation::is_valid_address;
use crate::constants::MAX_DISPLAY_DECIMALS;
use crate::types::{ChainFamily, FormatCategory, FormatOptions, FormatResult};

/// Key of the explorer every chain must define
pub const DEFAULT_EXPLORER: &str = "default";

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Chain configuration not found for chainId: {0}")]
    ChainNotFound(String),

    #[error("No RPC URLs configured for chainId: {0}")]
    NoRpcUrls(String),

    #[error("Explorer not found for chainId: {chain}, key: {key}")]
    ExplorerNotFound { chain: String, key: String },

    #[error("Invalid configuration for chain {chain}: {reason}")]
    InvalidChain { chain: String, reason: String },

    #[error("Failed to parse chain registry: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to read chain registry {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Numeric EVM chain id or a string id such as `cosmoshub-4`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChainId {
    Number(u64),
    Text(String),
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainId::Number(n) => write!(f, "{}", n),
            ChainId::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainConfig {
    pub id: ChainId,
    pub name: String,
    #[serde(rename = "type")]
    pub chain_type: ChainFamily,
    pub native_currency: TokenConfig,
    pub rpc_urls: Vec<String>,
    #[serde(default)]
    pub rest_urls: Vec<String>,
    pub block_explorers: BTreeMap<String, ExplorerConfig>,
    pub network_parameters: NetworkParameters,
    #[serde(default)]
    pub ibc_configuration: Option<IbcConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenConfig {
    pub name: String,
    pub symbol: String,
    pub decimals: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplorerConfig {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub standard: Option<ExplorerStandard>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExplorerStandard {
    #[serde(rename = "EIP3091")]
    Eip3091,
    #[serde(rename = "none")]
    None,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NetworkParameters {
    /// Seconds
    pub average_block_time: f64,
    pub chain_id: Option<String>,
    pub network_id: Option<u64>,
    pub address_prefix: Option<String>,
    pub validator_prefix: Option<String>,
    pub gas_price: Option<GasPriceConfig>,
    pub slots_per_epoch: Option<u64>,
    pub staking_enabled: Option<bool>,
    pub maximum_transaction_size: Option<u64>,
}

/// Gas prices in wei, kept as decimal strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GasPriceConfig {
    pub default: String,
    #[serde(default)]
    pub max: Option<String>,
    #[serde(default)]
    pub priority_fee: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IbcConfig {
    pub enabled: bool,
    pub timeout_height: u64,
    pub timeout_timestamp: u64,
    pub max_tx_size: u64,
    #[serde(default)]
    pub channels: Vec<IbcChannelConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IbcChannelConfig {
    pub channel_id: String,
    pub port_id: String,
    pub counterparty_chain_id: String,
    pub counterparty_channel_id: String,
    pub counterparty_port_id: String,
    pub ordering: ChannelOrdering,
    pub version: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChannelOrdering {
    Ordered,
    Unordered,
}

impl ChainConfig {
    pub fn family(&self) -> ChainFamily {
        self.chain_type
    }

    /// Bech32 human-readable prefix, Cosmos chains only
    pub fn address_prefix(&self) -> Option<&str> {
        self.network_parameters.address_prefix.as_deref()
    }

    pub fn native_decimals(&self) -> u32 {
        self.native_currency.decimals
    }

    pub fn default_explorer(&self) -> Option<&ExplorerConfig> {
        self.block_explorers.get(DEFAULT_EXPLORER)
    }

    fn check(&self, key: &str) -> Result<(), RegistryError> {
        let invalid = |reason: &str| RegistryError::InvalidChain {
            chain: key.to_string(),
            reason: reason.to_string(),
        };

        if self.name.trim().is_empty() {
            return Err(invalid("name cannot be empty"));
        }
        if self.default_explorer().is_none() {
            return Err(invalid("a \"default\" block explorer is required"));
        }
        if self.native_decimals() > MAX_DISPLAY_DECIMALS {
            return Err(invalid("native currency decimals out of range"));
        }
        if self.family() == ChainFamily::Cosmos && self.address_prefix().map_or(true, str::is_empty) {
            return Err(invalid("cosmos chains need an address prefix"));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct RegistryFile {
    chains: BTreeMap<String, ChainConfig>,
}

/// Immutable map of chain key to chain configuration
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChainRegistry {
    chains: BTreeMap<String, ChainConfig>,
}

impl ChainRegistry {
    pub fn new(chains: BTreeMap<String, ChainConfig>) -> Self {
        Self { chains }
    }

    /// Parse a `[chains.<key>]` TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, RegistryError> {
        let file: RegistryFile = toml::from_str(content)?;
        for (key, chain) in &file.chains {
            chain.check(key)?;
        }
        debug!(chains = file.chains.len(), "chain registry parsed");
        Ok(Self::new(file.chains))
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let registry = Self::from_toml_str(&content)?;
        info!("📚 체인 레지스트리 로드: {} ({}개 체인)", path.display(), registry.len());
        Ok(registry)
    }

    /// Look a chain up by registry key, then by the chain's own id
    pub fn resolve(&self, identifier: &str) -> Result<&ChainConfig, RegistryError> {
        self.chains
            .get(identifier)
            .or_else(|| self.chains.values().find(|chain| chain.id.to_string() == identifier))
            .ok_or_else(|| RegistryError::ChainNotFound(identifier.to_string()))
    }

    pub fn is_supported(&self, identifier: &str) -> bool {
        self.resolve(identifier).is_ok()
    }

    pub fn chains_by_family(&self, family: ChainFamily) -> Vec<&ChainConfig> {
        self.chains.values().filter(|chain| chain.family() == family).collect()
    }

    /// RPC URL at `index`, wrapping around the configured list
    pub fn rpc_url(&self, identifier: &str, index: usize) -> Result<&str, RegistryError> {
        let chain = self.resolve(identifier)?;
        if chain.rpc_urls.is_empty() {
            return Err(RegistryError::NoRpcUrls(identifier.to_string()));
        }
        Ok(&chain.rpc_urls[index % chain.rpc_urls.len()])
    }

    pub fn explorer_url(&self, identifier: &str, key: &str) -> Result<&str, RegistryError> {
        let chain = self.resolve(identifier)?;
        chain
            .block_explorers
            .get(key)
            .map(|explorer| explorer.url.as_str())
            .ok_or_else(|| RegistryError::ExplorerNotFound {
                chain: identifier.to_string(),
                key: key.to_string(),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ChainConfig)> {
        self.chains.iter().map(|(key, chain)| (key.as_str(), chain))
    }

    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    /// Networks known out of the box
    pub fn builtin() -> Self {
        let chains = [
            (
                "ethereum-mainnet",
                evm_chain(
                    1,
                    "Ethereum Mainnet",
                    &[
                        "https://mainnet.infura.io/v3/${INFURA_API_KEY}",
                        "https://eth-mainnet.alchemyapi.io/v2/${ALCHEMY_API_KEY}",
                    ],
                    ("Etherscan", "https://etherscan.io"),
                    NetworkParameters {
                        average_block_time: 12.0,
                        chain_id: Some("0x1".to_string()),
                        network_id: Some(1),
                        gas_price: Some(GasPriceConfig {
                            default: "30000000000".to_string(),
                            max: Some("100000000000".to_string()),
                            priority_fee: None,
                        }),
                        ..Default::default()
                    },
                ),
            ),
            (
                "arbitrum-one",
                evm_chain(
                    42161,
                    "Arbitrum One",
                    &[
                        "https://arb1.arbitrum.io/rpc",
                        "https://arbitrum-mainnet.infura.io/v3/${INFURA_API_KEY}",
                    ],
                    ("Arbiscan", "https://arbiscan.io"),
                    NetworkParameters {
                        average_block_time: 0.25,
                        chain_id: Some("0xa4b1".to_string()),
                        network_id: Some(42161),
                        ..Default::default()
                    },
                ),
            ),
            (
                "cosmos-hub",
                cosmos_chain(
                    "cosmoshub-4",
                    "Cosmos Hub",
                    ("Atom", "ATOM"),
                    "cosmos",
                    "https://www.mintscan.io/cosmos",
                    6.85,
                    &["https://rpc.cosmos.network", "https://cosmos-rpc.polkachu.com"],
                    &["https://api.cosmos.network", "https://cosmos-api.polkachu.com"],
                ),
            ),
            (
                "osmosis",
                cosmos_chain(
                    "osmosis-1",
                    "Osmosis",
                    ("Osmosis", "OSMO"),
                    "osmo",
                    "https://www.mintscan.io/osmosis",
                    6.0,
                    &["https://rpc.osmosis.zone", "https://osmosis-rpc.polkachu.com"],
                    &["https://lcd.osmosis.zone", "https://osmosis-api.polkachu.com"],
                ),
            ),
            (
                "solana-mainnet",
                ChainConfig {
                    id: ChainId::Text("4sGjMW1sUnHzSxGspuhpqLDx6wiyjNtZ".to_string()),
                    name: "Solana Mainnet".to_string(),
                    chain_type: ChainFamily::Solana,
                    native_currency: token("Solana", "SOL", 9),
                    rpc_urls: strings(&[
                        "https://api.mainnet-beta.solana.com",
                        "https://solana-api.projectserum.com",
                    ]),
                    rest_urls: Vec::new(),
                    block_explorers: default_explorer("Solana Explorer", "https://explorer.solana.com"),
                    network_parameters: NetworkParameters {
                        average_block_time: 0.4,
                        slots_per_epoch: Some(432_000),
                        staking_enabled: Some(true),
                        maximum_transaction_size: Some(1232),
                        ..Default::default()
                    },
                    ibc_configuration: None,
                },
            ),
        ];

        Self::new(
            chains
                .into_iter()
                .map(|(key, chain)| (key.to_string(), chain))
                .collect(),
        )
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn token(name: &str, symbol: &str, decimals: u32) -> TokenConfig {
    TokenConfig {
        name: name.to_string(),
        symbol: symbol.to_string(),
        decimals,
    }
}

fn default_explorer(name: &str, url: &str) -> BTreeMap<String, ExplorerConfig> {
    BTreeMap::from([(
        DEFAULT_EXPLORER.to_string(),
        ExplorerConfig {
            name: name.to_string(),
            url: url.to_string(),
            api_url: None,
            standard: None,
        },
    )])
}

fn evm_chain(
    id: u64,
    name: &str,
    rpc_urls: &[&str],
    explorer: (&str, &str),
    network_parameters: NetworkParameters,
) -> ChainConfig {
    ChainConfig {
        id: ChainId::Number(id),
        name: name.to_string(),
        chain_type: ChainFamily::Evm,
        native_currency: token("Ether", "ETH", 18),
        rpc_urls: strings(rpc_urls),
        rest_urls: Vec::new(),
        block_explorers: default_explorer(explorer.0, explorer.1),
        network_parameters,
        ibc_configuration: None,
    }
}

fn cosmos_chain(
    id: &str,
    name: &str,
    currency: (&str, &str),
    prefix: &str,
    explorer_url: &str,
    average_block_time: f64,
    rpc_urls: &[&str],
    rest_urls: &[&str],
) -> ChainConfig {
    ChainConfig {
        id: ChainId::Text(id.to_string()),
        name: name.to_string(),
        chain_type: ChainFamily::Cosmos,
        native_currency: token(currency.0, currency.1, 6),
        rpc_urls: strings(rpc_urls),
        rest_urls: strings(rest_urls),
        block_explorers: default_explorer("Mintscan", explorer_url),
        network_parameters: NetworkParameters {
            average_block_time,
            chain_id: Some(id.to_string()),
            address_prefix: Some(prefix.to_string()),
            validator_prefix: Some(format!("{}valoper", prefix)),
            ..Default::default()
        },
        ibc_configuration: Some(IbcConfig {
            enabled: true,
            timeout_height: 1000,
            timeout_timestamp: 1800,
            max_tx_size: 2_097_152,
            channels: Vec::new(),
        }),
    }
}

/// Validate an address against the family and prefix of a registered chain
pub fn validate_address_for_chain(
    registry: &ChainRegistry,
    chain: &str,
    address: &str,
) -> Result<bool, RegistryError> {
    let config = registry.resolve(chain)?;
    Ok(is_valid_address(address, config.family(), config.address_prefix()))
}

/// Format an address with the family of a registered chain. Cosmos addresses
/// must carry the chain's prefix.
pub fn format_address_for_chain(
    registry: &ChainRegistry,
    chain: &str,
    address: &str,
    options: &AddressFormatOptions,
) -> FormatResult<String> {
    let config = registry.resolve(chain).map_err(|e| {
        formatting_failure(FormatCategory::Address, e.to_string(), address, FormatOptions::Address(options.clone()))
    })?;
    let chain_options = AddressFormatOptions {
        family: config.family(),
        ..options.clone()
    };

    let canonical = format_address(
        address,
        &AddressFormatOptions {
            truncate: false,
            ..chain_options.clone()
        },
    )?;

    if let Some(prefix) = config.address_prefix() {
        if !canonical.starts_with(&format!("{}1", prefix)) {
            return Err(formatting_failure(
                FormatCategory::Address,
                format!("address prefix does not match chain {}", chain),
                address,
                FormatOptions::Address(chain_options),
            ));
        }
    }

    if chain_options.truncate {
        Ok(truncate_address(&canonical, chain_options.truncate_length))
    } else {
        Ok(canonical)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const COSMOS_ADDRESS: &str = "cosmos1qypqxpq9qcrsszg2pvxq6rs0zqg3yyc5lzv7xu";
    const SAMPLE_TOML: &str = r#"
[chains.sepolia]
id = 11155111
name = "Sepolia"
type = "EVM"
rpcUrls = ["https://rpc.sepolia.org"]
nativeCurrency = { name = "Sepolia Ether", symbol = "ETH", decimals = 18 }
networkParameters = { averageBlockTime = 12.0, chainId = "0xaa36a7" }

[chains.sepolia.blockExplorers.default]
name = "Etherscan"
url = "https://sepolia.etherscan.io"
standard = "EIP3091"

[chains.juno]
id = "juno-1"
name = "Juno"
type = "COSMOS"
rpcUrls = []
nativeCurrency = { name = "Juno", symbol = "JUNO", decimals = 6 }
networkParameters = { averageBlockTime = 6.0, addressPrefix = "juno" }
blockExplorers = { default = { name = "Mintscan", url = "https://www.mintscan.io/juno" } }
"#;

    #[test]
    fn test_builtin_table() {
        let registry = ChainRegistry::builtin();
        assert_eq!(registry.len(), 5);
        for (key, chain) in registry.iter() {
            chain.check(key).unwrap();
        }

        let hub = registry.resolve("cosmos-hub").unwrap();
        assert_eq!(hub.address_prefix(), Some("cosmos"));
        assert_eq!(hub.native_decimals(), 6);
        assert_eq!(registry.explorer_url("cosmos-hub", "default").unwrap(), "https://www.mintscan.io/cosmos");
        assert_eq!(registry.explorer_url("osmosis", "default").unwrap(), "https://www.mintscan.io/osmosis");
        assert_eq!(registry.resolve("solana-mainnet").unwrap().native_decimals(), 9);
    }

    #[test]
    fn test_resolve_by_key_or_id() {
        let registry = ChainRegistry::builtin();
        assert_eq!(registry.resolve("1").unwrap().name, "Ethereum Mainnet");
        assert_eq!(registry.resolve("42161").unwrap().name, "Arbitrum One");
        assert_eq!(registry.resolve("osmosis-1").unwrap().name, "Osmosis");
        assert!(registry.is_supported("ethereum-mainnet"));
        assert!(!registry.is_supported("polygon"));
        assert!(matches!(registry.resolve("polygon"), Err(RegistryError::ChainNotFound(id)) if id == "polygon"));
    }

    #[test]
    fn test_chains_by_family() {
        let registry = ChainRegistry::builtin();
        let names: Vec<_> = registry
            .chains_by_family(ChainFamily::Evm)
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["Arbitrum One", "Ethereum Mainnet"]);
        assert_eq!(registry.chains_by_family(ChainFamily::Cosmos).len(), 2);
        assert!(ChainRegistry::default().chains_by_family(ChainFamily::Solana).is_empty());
    }

    #[test]
    fn test_rpc_url_wraps() {
        let registry = ChainRegistry::builtin();
        assert_eq!(registry.rpc_url("arbitrum-one", 0).unwrap(), "https://arb1.arbitrum.io/rpc");
        assert_eq!(registry.rpc_url("arbitrum-one", 2).unwrap(), "https://arb1.arbitrum.io/rpc");
        assert_eq!(registry.rpc_url("42161", 3).unwrap(), "https://arbitrum-mainnet.infura.io/v3/${INFURA_API_KEY}");
    }

    #[test]
    fn test_explorer_not_found() {
        let registry = ChainRegistry::builtin();
        match registry.explorer_url("1", "blockscout") {
            Err(RegistryError::ExplorerNotFound { chain, key }) => {
                assert_eq!(chain, "1");
                assert_eq!(key, "blockscout");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_from_toml_str() {
        let registry = ChainRegistry::from_toml_str(SAMPLE_TOML).unwrap();
        let sepolia = registry.resolve("11155111").unwrap();
        assert_eq!(sepolia.family(), ChainFamily::Evm);
        assert_eq!(sepolia.default_explorer().unwrap().standard, Some(ExplorerStandard::Eip3091));
        assert_eq!(registry.resolve("juno-1").unwrap().address_prefix(), Some("juno"));
        assert!(matches!(registry.rpc_url("juno", 0), Err(RegistryError::NoRpcUrls(_))));
    }

    #[test]
    fn test_from_toml_rejects_bad_chains() {
        let no_default = SAMPLE_TOML.replace("blockExplorers = { default", "blockExplorers = { mintscan");
        assert!(matches!(
            ChainRegistry::from_toml_str(&no_default),
            Err(RegistryError::InvalidChain { chain, .. }) if chain == "juno"
        ));

        let no_prefix = SAMPLE_TOML.replace(", addressPrefix = \"juno\"", "");
        assert!(matches!(ChainRegistry::from_toml_str(&no_prefix), Err(RegistryError::InvalidChain { .. })));

        let bad_family = SAMPLE_TOML.replace("type = \"EVM\"", "type = \"UTXO\"");
        assert!(matches!(ChainRegistry::from_toml_str(&bad_family), Err(RegistryError::Parse(_))));
    }

    #[test]
    fn test_from_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE_TOML.as_bytes()).unwrap();

        let registry = ChainRegistry::from_toml_file(file.path()).unwrap();
        assert_eq!(registry.len(), 2);

        let missing = ChainRegistry::from_toml_file("/nonexistent/chains.toml");
        assert!(matches!(missing, Err(RegistryError::Io { .. })));
    }

    #[test]
    fn test_validate_address_for_chain() {
        let registry = ChainRegistry::builtin();
        assert!(validate_address_for_chain(&registry, "cosmos-hub", COSMOS_ADDRESS).unwrap());
        assert!(!validate_address_for_chain(&registry, "osmosis", COSMOS_ADDRESS).unwrap());
        assert!(validate_address_for_chain(&registry, "1", "0x742d35Cc6634C0532925a3b844Bc454e4438f44e").unwrap());
        assert!(validate_address_for_chain(&registry, "unknown", COSMOS_ADDRESS).is_err());
    }

    #[test]
    fn test_format_address_for_chain() {
        let registry = ChainRegistry::builtin();
        let options = AddressFormatOptions::default();

        assert_eq!(
            format_address_for_chain(&registry, "ethereum-mainnet", "0x742d35cc6634c0532925a3b844bc454e4438f44e", &options)
                .unwrap(),
            "0x742d35Cc6634C0532925a3b844Bc454e4438f44e"
        );

        // Family comes from the chain, not the options.
        let truncated = AddressFormatOptions {
            truncate: true,
            truncate_length: 8,
            ..options.clone()
        };
        assert_eq!(
            format_address_for_chain(&registry, "cosmos-hub", COSMOS_ADDRESS, &truncated).unwrap(),
            "cosmos1q...c5lzv7xu"
        );

        let err = format_address_for_chain(&registry, "osmosis", COSMOS_ADDRESS, &options).unwrap_err();
        assert_eq!(err.category, FormatCategory::Address);

        let err = format_address_for_chain(&registry, "polygon", COSMOS_ADDRESS, &options).unwrap_err();
        assert!(err.message.contains("polygon"));
    }
}
