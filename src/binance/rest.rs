//! REST API client for Binance USD-M futures

use chrono::Utc;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument, warn};
use url::Url;

use super::auth::{signed_query, SignedQuery};
use super::messages::*;
use crate::common::errors::{ClientError, Result};
use crate::config::types::ApiCredentials;

/// Venue error codes that mean the key, signature or timestamp was rejected
const AUTH_ERROR_CODES: [i64; 4] = [-1021, -1022, -2014, -2015];

/// REST API client for Binance USD-M futures
#[derive(Debug, Clone)]
pub struct BinanceRestClient {
    /// HTTP client
    client: Client,
    /// Base URL for the futures API
    base_url: String,
    /// Optional API credentials for signed endpoints
    credentials: Option<ApiCredentials>,
    /// `recvWindow` sent with signed requests
    recv_window_ms: u64,
}

impl BinanceRestClient {
    /// Create a new REST client (unauthenticated)
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, Duration::from_secs(30))
    }

    /// Create a new REST client with custom timeout
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let parsed = Url::parse(base_url.trim())
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::InvalidUrl(format!(
                "{}: unsupported scheme {}",
                base_url,
                parsed.scheme()
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Internal(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            credentials: None,
            recv_window_ms: 5000,
        })
    }

    /// Set API credentials for signed requests
    pub fn with_credentials(mut self, credentials: ApiCredentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set the `recvWindow` for signed requests
    pub fn with_recv_window(mut self, recv_window_ms: u64) -> Self {
        self.recv_window_ms = recv_window_ms;
        self
    }

    /// Base URL every request is sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check if signed endpoints can be called
    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// Sign `params` with the configured credentials
    fn sign(&self, params: &[(&str, String)]) -> Result<SignedQuery> {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or_else(|| ClientError::Authentication("missing API credentials".to_string()))?;

        signed_query(
            credentials,
            params,
            self.recv_window_ms,
            Utc::now().timestamp_millis(),
        )
    }

    // ========================================================================
    // Public Endpoints (No Authentication Required)
    // ========================================================================

    /// Test connectivity
    #[instrument(skip(self))]
    pub async fn ping(&self) -> Result<()> {
        let url = format!("{}/fapi/v1/ping", self.base_url);
        let response = self.client.get(&url).send().await?;

        let _: serde_json::Value = handle_response(response).await?;
        Ok(())
    }

    /// Get server time in milliseconds
    #[instrument(skip(self))]
    pub async fn get_server_time(&self) -> Result<i64> {
        let url = format!("{}/fapi/v1/time", self.base_url);
        let response = self.client.get(&url).send().await?;

        let time: ServerTimeResponse = handle_response(response).await?;
        Ok(time.server_time)
    }

    /// Get trading rules for every symbol
    #[instrument(skip(self))]
    pub async fn get_exchange_info(&self) -> Result<ExchangeInfoResponse> {
        let url = format!("{}/fapi/v1/exchangeInfo", self.base_url);
        debug!("Fetching exchange info from: {}", url);

        let response = self.client.get(&url).send().await?;
        handle_response(response).await
    }

    // ========================================================================
    // Signed Endpoints
    // ========================================================================

    /// Get account totals and per-asset balances
    #[instrument(skip(self))]
    pub async fn get_account(&self) -> Result<AccountResponse> {
        let signed = self.sign(&[])?;
        let url = format!("{}/fapi/v2/account?{}", self.base_url, signed.query);
        debug!("Fetching account from: {}/fapi/v2/account", self.base_url);

        let response = signed.apply_to_request(self.client.get(&url)).send().await?;
        handle_response(response).await
    }

    /// Change initial leverage for a symbol
    ///
    /// # Arguments
    /// * `symbol` - Upper-case venue symbol
    /// * `leverage` - Target multiplier (1 to 125, venue-dependent)
    #[instrument(skip(self))]
    pub async fn change_leverage(&self, symbol: &str, leverage: u32) -> Result<LeverageResponse> {
        let signed = self.sign(&[
            ("symbol", symbol.to_string()),
            ("leverage", leverage.to_string()),
        ])?;
        let url = format!("{}/fapi/v1/leverage?{}", self.base_url, signed.query);

        let response = signed.apply_to_request(self.client.post(&url)).send().await?;
        handle_response(response).await
    }
}

/// Decode a successful response or map a failed one to a [`ClientError`]
async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();

    if status.is_success() {
        let body = response.text().await?;
        return serde_json::from_str(&body).map_err(|e| {
            ClientError::InvalidResponse(format!("Failed to decode response body: {}", e))
        });
    }

    let retry_after = response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok());
    let body = response.text().await.unwrap_or_default();

    let error = error_from_status(status, retry_after, &body);
    warn!(status = %status, error = %error, "Binance request failed");
    Err(error)
}

/// Map a non-2xx status and body to a [`ClientError`]
fn error_from_status(status: StatusCode, retry_after: Option<u64>, body: &str) -> ClientError {
    let api_error = serde_json::from_str::<ApiErrorResponse>(body).ok();

    if status == StatusCode::TOO_MANY_REQUESTS || status.as_u16() == 418 {
        return ClientError::RateLimit {
            message: api_error
                .map(|e| e.msg)
                .unwrap_or_else(|| format!("Server returned status {}", status)),
            retry_after_seconds: retry_after,
        };
    }

    match api_error {
        Some(e) if AUTH_ERROR_CODES.contains(&e.code) => {
            ClientError::Authentication(format!("{} ({})", e.msg, e.code))
        }
        Some(e) => {
            if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
                ClientError::Authentication(format!("{} ({})", e.msg, e.code))
            } else {
                ClientError::Api {
                    code: e.code,
                    message: e.msg,
                }
            }
        }
        None if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN => {
            ClientError::Authentication(format!("Server returned status {}", status))
        }
        None => ClientError::InvalidResponse(format!(
            "Server returned status {}: {}",
            status, body
        )),
    }
}
