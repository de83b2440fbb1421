//! Configuration loader

use config::{Config, Environment, File};
use std::path::Path;

use super::types::{AppConfig, AppSettings, ExchangeConfig, TradingConfig, DEFAULT_LEVERAGE};
use crate::common::errors::{ClientError, Result};

/// Load configuration from file and environment variables
///
/// Priority (highest to lowest):
/// 1. `BINANCE_API_KEY` / `BINANCE_API_SECRET`
/// 2. Environment variables (prefixed with APP__, e.g. `APP__TRADING__BASE_PAIRS=BTCUSDT,ETHUSDT`)
/// 3. Configuration file (TOML format)
/// 4. Default values
pub fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    let mut builder = Config::builder();

    if let Some(path) = config_path {
        if Path::new(path).exists() {
            builder = builder.add_source(File::with_name(path).required(false));
        }
    }

    builder = builder.add_source(
        Environment::with_prefix("APP")
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("trading.base_pairs"),
    );

    // Credentials never live in the config file if the environment has them
    builder = builder
        .set_override_option("exchange.api_key", std::env::var("BINANCE_API_KEY").ok())?
        .set_override_option("exchange.api_secret", std::env::var("BINANCE_API_SECRET").ok())?;

    let config: AppConfig = builder.build()?.try_deserialize()?;

    Ok(normalize(config))
}

/// Load configuration from environment variables only
///
/// Reads `BINANCE_API_KEY`, `BINANCE_API_SECRET`, `BINANCE_FUTURES_URL`,
/// `BASE_PAIRS` (comma-separated) and `LEVERAGE`, after loading `.env`.
pub fn load_from_env() -> Result<AppConfig> {
    dotenvy::dotenv().ok();
    load_from_vars(|key| std::env::var(key).ok())
}

fn load_from_vars(var: impl Fn(&str) -> Option<String>) -> Result<AppConfig> {
    let exchange = ExchangeConfig {
        api_key: var("BINANCE_API_KEY"),
        api_secret: var("BINANCE_API_SECRET"),
        base_url: var("BINANCE_FUTURES_URL").unwrap_or_else(|| ExchangeConfig::default().base_url),
        ..Default::default()
    };

    let leverage = match var("LEVERAGE") {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| ClientError::Configuration(format!("Invalid LEVERAGE {:?}: {}", raw, e)))?,
        None => DEFAULT_LEVERAGE,
    };

    let trading = TradingConfig {
        base_pairs: var("BASE_PAIRS")
            .map(|s| s.split(',').map(|p| p.to_string()).collect())
            .unwrap_or_default(),
        leverage,
    };

    Ok(normalize(AppConfig {
        exchange,
        trading,
        settings: AppSettings::default(),
    }))
}

/// Upper-case and de-blank the base pairs, trim the base URL
fn normalize(mut config: AppConfig) -> AppConfig {
    config.trading.base_pairs = config
        .trading
        .base_pairs
        .iter()
        .map(|p| p.trim().to_uppercase())
        .filter(|p| !p.is_empty())
        .collect();
    config.exchange.base_url = config.exchange.base_url.trim().to_string();
    config
}
