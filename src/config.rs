use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::common::formatting::{
    AddressFormatOptions, GasFormatOptions, NumberFormatOptions, TransactionDataFormatOptions,
};
use crate::common::math::RoundingMode;
use crate::common::time::{parse_timezone, Locale, TimestampFormat, TimestampFormatOptions};
use crate::constants::{
    DEFAULT_DECIMAL_SEPARATOR, DEFAULT_ETHER_DECIMALS, DEFAULT_GAS_DECIMALS, DEFAULT_GROUP_SEPARATOR,
    DEFAULT_LOCALE, DEFAULT_NUMBER_DECIMALS, DEFAULT_TIMEZONE, DEFAULT_TRUNCATE_LENGTH,
    MAX_DISPLAY_DECIMALS,
};
use crate::registry::ChainRegistry;

/// 환경 변수 접두사 (`CHAINFMT__FORMATTING__TIMEZONE=+09:00`)
pub const ENV_PREFIX: &str = "CHAINFMT";
pub const ENV_SEPARATOR: &str = "__";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub registry: RegistrySettings,
    pub logging: LoggingSettings,
    pub formatting: FormattingSettings,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrySettings {
    /// 체인 레지스트리 TOML 파일 (없으면 내장 테이블 사용)
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// 포맷팅 기본값
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormattingSettings {
    pub number_decimals: u32,
    pub ether_decimals: u32,
    pub gas_decimals: u32,
    pub rounding_mode: RoundingMode,
    pub group_separator: String,
    pub decimal_separator: String,
    pub truncate_length: usize,
    pub checksum: bool,
    pub timezone: String,
    pub locale: String,
}

impl Default for FormattingSettings {
    fn default() -> Self {
        Self {
            number_decimals: DEFAULT_NUMBER_DECIMALS,
            ether_decimals: DEFAULT_ETHER_DECIMALS,
            gas_decimals: DEFAULT_GAS_DECIMALS,
            rounding_mode: RoundingMode::Round,
            group_separator: DEFAULT_GROUP_SEPARATOR.to_string(),
            decimal_separator: DEFAULT_DECIMAL_SEPARATOR.to_string(),
            truncate_length: DEFAULT_TRUNCATE_LENGTH,
            checksum: true,
            timezone: DEFAULT_TIMEZONE.to_string(),
            locale: DEFAULT_LOCALE.to_string(),
        }
    }
}

impl Settings {
    /// 설정 파일(선택)과 `CHAINFMT__*` 환경 변수를 순서대로 병합
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, Environment::with_prefix(ENV_PREFIX))
    }

    fn load_with_env(path: Option<&Path>, env: Environment) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            let file = path
                .to_str()
                .with_context(|| format!("Config path is not valid UTF-8: {}", path.display()))?;
            builder = builder.add_source(File::new(file, FileFormat::Toml).required(true));
        }

        let settings: Settings = builder
            .add_source(env.prefix_separator(ENV_SEPARATOR).separator(ENV_SEPARATOR))
            .build()
            .context("Failed to load settings")?
            .try_deserialize()
            .context("Failed to parse settings")?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        let formatting = &self.formatting;

        if self.logging.level.parse::<tracing::Level>().is_err() {
            return Err(anyhow::anyhow!("Unknown log level: {}", self.logging.level));
        }

        for (name, decimals) in [
            ("number_decimals", formatting.number_decimals),
            ("ether_decimals", formatting.ether_decimals),
            ("gas_decimals", formatting.gas_decimals),
        ] {
            if decimals > MAX_DISPLAY_DECIMALS {
                return Err(anyhow::anyhow!(
                    "{} must be at most {} (got {})",
                    name,
                    MAX_DISPLAY_DECIMALS,
                    decimals
                ));
            }
        }

        if formatting.truncate_length == 0 {
            return Err(anyhow::anyhow!("truncate_length must be greater than 0"));
        }

        if formatting.decimal_separator.is_empty() {
            return Err(anyhow::anyhow!("decimal_separator cannot be empty"));
        }

        if parse_timezone(&formatting.timezone).is_none() {
            return Err(anyhow::anyhow!("Unsupported timezone: {}", formatting.timezone));
        }

        Locale::from_str(&formatting.locale)?;

        if let Some(path) = &self.registry.path {
            if !path.exists() {
                return Err(anyhow::anyhow!("Chain registry file not found: {}", path.display()));
            }
        }

        Ok(())
    }

    /// 설정된 레지스트리 파일 또는 내장 체인 테이블
    pub fn chain_registry(&self) -> Result<ChainRegistry> {
        match &self.registry.path {
            Some(path) => ChainRegistry::from_toml_file(path)
                .with_context(|| format!("Failed to load chain registry from {}", path.display())),
            None => Ok(ChainRegistry::builtin()),
        }
    }

    pub fn number_options(&self) -> NumberFormatOptions {
        NumberFormatOptions {
            decimals: self.formatting.number_decimals,
            group_separator: self.formatting.group_separator.clone(),
            decimal_separator: self.formatting.decimal_separator.clone(),
            rounding_mode: self.formatting.rounding_mode,
            ..Default::default()
        }
    }

    pub fn address_options(&self) -> AddressFormatOptions {
        AddressFormatOptions {
            truncate_length: self.formatting.truncate_length,
            checksum: self.formatting.checksum,
            ..Default::default()
        }
    }

    pub fn timestamp_options(&self, format: TimestampFormat) -> TimestampFormatOptions {
        TimestampFormatOptions {
            format,
            timezone: self.formatting.timezone.clone(),
            locale: self.formatting.locale.clone(),
        }
    }

    pub fn gas_options(&self) -> GasFormatOptions {
        GasFormatOptions {
            decimals: self.formatting.gas_decimals,
            ..Default::default()
        }
    }

    pub fn data_options(&self) -> TransactionDataFormatOptions {
        TransactionDataFormatOptions::default()
    }
}
