//! Error types for the application

use thiserror::Error;

/// Result type alias using our ClientError
pub type Result<T> = std::result::Result<T, ClientError>;

/// Main error type for exchange operations
///
/// Every variant returned across the [`ExchangeAdapter`](crate::common::traits::ExchangeAdapter)
/// boundary means "the remote call failed". Callers in this crate never branch
/// on the variant; they only decide whether to log-and-continue or log-and-default.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request errors
    #[error("HTTP request error: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// Authentication errors (missing or rejected credentials)
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Rate limiting errors
    #[error("Rate limit exceeded: {message}, retry after {retry_after_seconds:?} seconds")]
    RateLimit {
        message: String,
        retry_after_seconds: Option<u64>,
    },

    /// Error body returned by the venue (`{"code": .., "msg": ..}`)
    #[error("Exchange API error {code}: {message}")]
    Api { code: i64, message: String },

    /// Invalid API response
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// Malformed base URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<config::ConfigError> for ClientError {
    fn from(err: config::ConfigError) -> Self {
        ClientError::Configuration(err.to_string())
    }
}
