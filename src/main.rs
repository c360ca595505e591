use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::Path;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chainfmt::common::formatting::{
    format_address, format_gas, format_native_amount, format_number, format_transaction_data, DataFormat,
    GasFormat,
};
use chainfmt::common::math::RoundingMode;
use chainfmt::common::time::{format_timestamp, TimestampFormat};
use chainfmt::common::validation::{
    is_valid_abi, is_valid_address, is_valid_amount, is_valid_bytecode, is_valid_chain_id, is_valid_gas_params,
    is_valid_method_signature, is_valid_transaction_hash,
};
use chainfmt::constants::{DEFAULT_MAX_AMOUNT_DECIMALS, ETHER_DECIMALS};
use chainfmt::registry::format_address_for_chain;
use chainfmt::types::{ChainFamily, NumericInput};
use chainfmt::{ChainRegistry, Settings};

fn main() -> Result<()> {
    // .env 파일은 선택 사항
    dotenvy::dotenv().ok();

    let matches = cli().get_matches();

    let config_path = matches.get_one::<String>("config").map(Path::new);
    let settings = Settings::load(config_path)?;

    // 로깅 초기화 (RUST_LOG > --log-level > 설정 파일)
    let log_filter = matches
        .get_one::<String>("log-level")
        .cloned()
        .unwrap_or_else(|| settings.logging.level.clone());
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    debug!("📋 설정 로드 완료: {:?}", settings);
    let registry = settings.chain_registry()?;

    match matches.subcommand() {
        Some(("validate", sub)) => {
            let valid = run_validate(sub, &registry)?;
            println!("{}", if valid { "valid" } else { "invalid" });
            if !valid {
                std::process::exit(1);
            }
        }
        Some(("format", sub)) => {
            println!("{}", run_format(sub, &settings, &registry)?);
        }
        Some(("chains", sub)) => run_chains(sub, &registry)?,
        _ => return Err(anyhow::anyhow!("No subcommand given")),
    }

    Ok(())
}

fn cli() -> Command {
    Command::new("chainfmt")
        .version(env!("CARGO_PKG_VERSION"))
        .about("멀티체인 주소/금액/페이로드 검증 및 표시 포맷팅")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .global(true)
                .help("설정 파일 경로 (TOML)"),
        )
        .arg(
            Arg::new("log-level")
                .short('l')
                .long("log-level")
                .value_name("LEVEL")
                .global(true)
                .help("로그 레벨 (trace, debug, info, warn, error)"),
        )
        .subcommand(
            Command::new("validate")
                .about("값이 해당 형식에 맞는지 검사 (유효하지 않으면 종료 코드 1)")
                .arg(
                    Arg::new("category")
                        .required(true)
                        .value_parser([
                            "address", "tx-hash", "amount", "gas", "chain-id", "bytecode", "abi", "signature",
                        ]),
                )
                .arg(Arg::new("value").required(true).help("검사할 값 (abi는 JSON 또는 @파일)"))
                .arg(family_arg())
                .arg(chain_arg())
                .arg(
                    Arg::new("prefix")
                        .long("prefix")
                        .value_name("PREFIX")
                        .help("Cosmos 주소 접두사"),
                )
                .arg(
                    Arg::new("max-decimals")
                        .long("max-decimals")
                        .value_name("N")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("18"),
                )
                .arg(
                    Arg::new("gas-price")
                        .long("gas-price")
                        .value_name("WEI")
                        .help("가스 가격 (gas 검사 시)"),
                ),
        )
        .subcommand(
            Command::new("format")
                .about("값을 표시용 문자열로 포맷")
                .arg(
                    Arg::new("category")
                        .required(true)
                        .value_parser(["number", "ether", "address", "timestamp", "data", "gas"]),
                )
                .arg(Arg::new("value").required(true))
                .arg(family_arg())
                .arg(chain_arg())
                .arg(
                    Arg::new("decimals")
                        .short('d')
                        .long("decimals")
                        .value_name("N")
                        .value_parser(clap::value_parser!(u32)),
                )
                .arg(Arg::new("rounding").long("rounding").value_name("MODE").help("ROUND, TRUNCATE, CEIL, FLOOR"))
                .arg(Arg::new("pad").long("pad").action(ArgAction::SetTrue).help("소수 자릿수 채우기"))
                .arg(Arg::new("truncate").long("truncate").action(ArgAction::SetTrue).help("주소 축약"))
                .arg(
                    Arg::new("no-checksum")
                        .long("no-checksum")
                        .action(ArgAction::SetTrue)
                        .help("EVM 주소를 소문자로 출력"),
                )
                .arg(
                    Arg::new("style")
                        .long("style")
                        .value_name("STYLE")
                        .help("FULL, DATE_ONLY, TIME_ONLY, RELATIVE"),
                )
                .arg(Arg::new("timezone").long("timezone").value_name("TZ"))
                .arg(Arg::new("locale").long("locale").value_name("LOCALE"))
                .arg(Arg::new("data-format").long("data-format").value_name("FORMAT").help("HEX, BYTES, UTF8"))
                .arg(Arg::new("lowercase").long("lowercase").action(ArgAction::SetTrue))
                .arg(Arg::new("no-prefix").long("no-prefix").action(ArgAction::SetTrue))
                .arg(Arg::new("unit").long("unit").value_name("UNIT").help("GWEI, WEI"))
                .arg(Arg::new("no-unit").long("no-unit").action(ArgAction::SetTrue)),
        )
        .subcommand(Command::new("chains").about("등록된 체인 목록").arg(family_arg()))
}

fn family_arg() -> Arg {
    Arg::new("family")
        .short('f')
        .long("family")
        .value_name("FAMILY")
        .help("체인 패밀리 (EVM, COSMOS, SOLANA)")
}

fn chain_arg() -> Arg {
    Arg::new("chain")
        .long("chain")
        .value_name("KEY")
        .conflicts_with("family")
        .help("레지스트리 체인 키 또는 체인 ID")
}

fn parse_opt<T>(matches: &ArgMatches, name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    matches
        .get_one::<String>(name)
        .map(|value| value.parse::<T>())
        .transpose()
        .with_context(|| format!("Invalid --{}", name))
}

/// Family from `--chain` (with its address prefix) or `--family`, EVM by default
fn resolve_family<'a>(
    matches: &'a ArgMatches,
    registry: &'a ChainRegistry,
) -> Result<(ChainFamily, Option<&'a str>)> {
    if let Some(chain) = matches.get_one::<String>("chain") {
        let config = registry.resolve(chain)?;
        return Ok((config.family(), config.address_prefix()));
    }
    let family = parse_opt::<ChainFamily>(matches, "family")?.unwrap_or(ChainFamily::Evm);
    Ok((family, None))
}

fn run_validate(matches: &ArgMatches, registry: &ChainRegistry) -> Result<bool> {
    let category = matches.get_one::<String>("category").map(String::as_str).unwrap_or_default();
    let value = matches.get_one::<String>("value").map(String::as_str).unwrap_or_default();
    info!("🔍 {} 검사: {}", category, value);

    let valid = match category {
        "address" => {
            let (family, chain_prefix) = resolve_family(matches, registry)?;
            let prefix = matches.get_one::<String>("prefix").map(String::as_str).or(chain_prefix);
            is_valid_address(value, family, prefix)
        }
        "tx-hash" => {
            let (family, _) = resolve_family(matches, registry)?;
            is_valid_transaction_hash(value, family)
        }
        "amount" => {
            let max_decimals = matches
                .get_one::<usize>("max-decimals")
                .copied()
                .unwrap_or(DEFAULT_MAX_AMOUNT_DECIMALS);
            is_valid_amount(value, max_decimals)
        }
        "gas" => {
            let price = matches.get_one::<String>("gas-price").map(NumericInput::from);
            is_valid_gas_params(Some(NumericInput::from(value)), price)
        }
        "chain-id" => is_valid_chain_id(value),
        "bytecode" => is_valid_bytecode(value),
        "abi" => {
            let json = match value.strip_prefix('@') {
                Some(path) => std::fs::read_to_string(path).with_context(|| format!("Failed to read ABI file {}", path))?,
                None => value.to_string(),
            };
            match serde_json::from_str::<serde_json::Value>(&json) {
                Ok(abi) => is_valid_abi(&abi),
                Err(e) => {
                    debug!("ABI is not JSON: {}", e);
                    false
                }
            }
        }
        "signature" => is_valid_method_signature(value),
        other => return Err(anyhow::anyhow!("Unknown validation category: {}", other)),
    };

    Ok(valid)
}

fn run_format(matches: &ArgMatches, settings: &Settings, registry: &ChainRegistry) -> Result<String> {
    let category = matches.get_one::<String>("category").map(String::as_str).unwrap_or_default();
    let value = matches.get_one::<String>("value").map(String::as_str).unwrap_or_default();
    let decimals = matches.get_one::<u32>("decimals").copied();

    let formatted = match category {
        "number" => {
            let mut options = settings.number_options();
            if let Some(decimals) = decimals {
                options.decimals = decimals;
            }
            if let Some(mode) = parse_opt::<RoundingMode>(matches, "rounding")? {
                options.rounding_mode = mode;
            }
            options.pad_decimals = matches.get_flag("pad");
            format_number(value, &options)?
        }
        "ether" => {
            let native_decimals = match matches.get_one::<String>("chain") {
                Some(chain) => registry.resolve(chain)?.native_decimals(),
                None => ETHER_DECIMALS,
            };
            let decimals = decimals.unwrap_or(settings.formatting.ether_decimals);
            format_native_amount(value, native_decimals, decimals)?
        }
        "address" => {
            let mut options = settings.address_options();
            options.truncate = matches.get_flag("truncate");
            if matches.get_flag("no-checksum") {
                options.checksum = false;
            }
            match matches.get_one::<String>("chain") {
                Some(chain) => format_address_for_chain(registry, chain, value, &options)?,
                None => {
                    if let Some(family) = parse_opt::<ChainFamily>(matches, "family")? {
                        options.family = family;
                    }
                    format_address(value, &options)?
                }
            }
        }
        "timestamp" => {
            let style = parse_opt::<TimestampFormat>(matches, "style")?.unwrap_or_default();
            let mut options = settings.timestamp_options(style);
            if let Some(timezone) = matches.get_one::<String>("timezone") {
                options.timezone = timezone.clone();
            }
            if let Some(locale) = matches.get_one::<String>("locale") {
                options.locale = locale.clone();
            }
            format_timestamp(value, &options)?
        }
        "data" => {
            let mut options = settings.data_options();
            if let Some(format) = parse_opt::<DataFormat>(matches, "data-format")? {
                options.format = format;
            }
            options.uppercase = !matches.get_flag("lowercase");
            options.prefix = !matches.get_flag("no-prefix");
            format_transaction_data(value, &options)?
        }
        "gas" => {
            let mut options = settings.gas_options();
            if let Some(decimals) = decimals {
                options.decimals = decimals;
            }
            if let Some(unit) = parse_opt::<GasFormat>(matches, "unit")? {
                options.format = unit;
            }
            options.include_unit = !matches.get_flag("no-unit");
            format_gas(value, &options)?
        }
        other => return Err(anyhow::anyhow!("Unknown format category: {}", other)),
    };

    Ok(formatted)
}

fn run_chains(matches: &ArgMatches, registry: &ChainRegistry) -> Result<()> {
    let families = match parse_opt::<ChainFamily>(matches, "family")? {
        Some(family) => vec![family],
        None => ChainFamily::ALL.to_vec(),
    };

    for line in chain_listing(registry, &families) {
        println!("{}", line);
    }

    Ok(())
}

/// One line per chain, grouped by family in the given order
fn chain_listing(registry: &ChainRegistry, families: &[ChainFamily]) -> Vec<String> {
    families
        .iter()
        .flat_map(|family| registry.iter().filter(move |(_, chain)| chain.family() == *family))
        .map(|(key, chain)| {
            format!(
                "{:<18} {:<34} {:<7} {} ({})",
                key,
                chain.id,
                chain.family(),
                chain.name,
                chain.native_currency.symbol
            )
        })
        .collect()
}
