//! Request signing for Binance signed endpoints

use hmac::{Hmac, Mac};
use sha2::Sha256;
use url::form_urlencoded;

use crate::common::errors::{ClientError, Result};
use crate::config::types::ApiCredentials;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the API key on every signed request
pub const API_KEY_HEADER: &str = "X-MBX-APIKEY";

/// Generate the HMAC-SHA256 signature of a query string
///
/// # Arguments
/// * `secret` - API secret key (raw, not encoded)
/// * `query` - The exact URL-encoded query string sent to the venue
pub fn sign_query(secret: &str, query: &str) -> Result<String> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| ClientError::Authentication(format!("Failed to create HMAC: {}", e)))?;
    mac.update(query.as_bytes());

    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Build a URL-encoded query string, preserving parameter order
pub fn build_query(params: &[(&str, String)]) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in params {
        serializer.append_pair(key, value);
    }
    serializer.finish()
}

/// Build the full signed query for a request
///
/// Appends `recvWindow` and `timestamp` to `params`, signs the result and
/// appends `signature` last, as Binance requires.
pub fn signed_query(
    credentials: &ApiCredentials,
    params: &[(&str, String)],
    recv_window_ms: u64,
    timestamp_ms: i64,
) -> Result<SignedQuery> {
    let mut all: Vec<(&str, String)> = params.to_vec();
    all.push(("recvWindow", recv_window_ms.to_string()));
    all.push(("timestamp", timestamp_ms.to_string()));

    let query = build_query(&all);
    let signature = sign_query(&credentials.api_secret, &query)?;

    Ok(SignedQuery {
        api_key: credentials.api_key.clone(),
        query: format!("{}&signature={}", query, signature),
    })
}

/// A signed query string plus the key header to send with it
#[derive(Debug, Clone)]
pub struct SignedQuery {
    pub api_key: String,
    pub query: String,
}

impl SignedQuery {
    /// Add the API key header to a reqwest RequestBuilder
    pub fn apply_to_request(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request.header(API_KEY_HEADER, &self.api_key)
    }
}
