//! Configuration types

use serde::{Deserialize, Serialize};

/// Default leverage applied to every base pair on refresh
pub const DEFAULT_LEVERAGE: u32 = 20;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Exchange endpoint and credentials
    #[serde(default)]
    pub exchange: ExchangeConfig,
    /// Watch-list and leverage
    #[serde(default)]
    pub trading: TradingConfig,
    /// General application settings
    #[serde(default)]
    pub settings: AppSettings,
}

/// Binance USD-M futures configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeConfig {
    /// API key for signed requests
    #[serde(default)]
    pub api_key: Option<String>,
    /// API secret for signing requests
    #[serde(default)]
    pub api_secret: Option<String>,
    /// Base URL for the futures REST API
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Validity window for signed requests in milliseconds
    #[serde(default = "default_recv_window")]
    pub recv_window_ms: u64,
    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_secret: None,
            base_url: default_base_url(),
            recv_window_ms: default_recv_window(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

impl ExchangeConfig {
    /// Credentials, if both key and secret are present and non-empty
    pub fn credentials(&self) -> Option<ApiCredentials> {
        match (&self.api_key, &self.api_secret) {
            (Some(key), Some(secret)) if !key.is_empty() && !secret.is_empty() => {
                Some(ApiCredentials::new(key.clone(), secret.clone()))
            }
            _ => None,
        }
    }
}

fn default_base_url() -> String {
    "https://fapi.binance.com".to_string()
}

fn default_recv_window() -> u64 {
    5000
}

fn default_request_timeout() -> u64 {
    30
}

/// Trading watch-list configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradingConfig {
    /// Symbols whose leverage is configured on every metadata refresh
    #[serde(default)]
    pub base_pairs: Vec<String>,
    /// Leverage multiplier applied to each base pair
    #[serde(default = "default_leverage")]
    pub leverage: u32,
}

impl Default for TradingConfig {
    fn default() -> Self {
        Self {
            base_pairs: Vec::new(),
            leverage: default_leverage(),
        }
    }
}

fn default_leverage() -> u32 {
    DEFAULT_LEVERAGE
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// API credentials for signed requests
#[derive(Clone)]
pub struct ApiCredentials {
    pub api_key: String,
    pub api_secret: String,
}

impl ApiCredentials {
    pub fn new(api_key: String, api_secret: String) -> Self {
        Self {
            api_key,
            api_secret,
        }
    }
}

impl std::fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}
