//! Common test utilities and fixtures
#![allow(dead_code)]

use futures_rules::config::types::ExchangeConfig;
use futures_rules::BinanceFuturesClient;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_API_KEY: &str = "test_api_key";
pub const TEST_API_SECRET: &str = "test_api_secret";

/// Exchange config pointing at the mock server
pub fn exchange_config(server: &MockServer, with_credentials: bool) -> ExchangeConfig {
    ExchangeConfig {
        api_key: with_credentials.then(|| TEST_API_KEY.to_string()),
        api_secret: with_credentials.then(|| TEST_API_SECRET.to_string()),
        base_url: server.uri(),
        recv_window_ms: 5000,
        request_timeout_seconds: 5,
    }
}

/// Binance client talking to the mock server
pub fn client_for(server: &MockServer, with_credentials: bool) -> BinanceFuturesClient {
    BinanceFuturesClient::new(&exchange_config(server, with_credentials))
        .expect("Failed to create Binance client")
}

/// JSON response with the given status and body
pub fn json_response(status: u16, body: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_raw(body.to_string(), "application/json")
}

pub async fn mount_exchange_info(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/fapi/v1/exchangeInfo"))
        .respond_with(json_response(200, api_responses::EXCHANGE_INFO))
        .mount(server)
        .await;
}

pub async fn mount_leverage_ok(server: &MockServer, symbol: &str) {
    let body = format!(
        r#"{{"leverage": 20, "maxNotionalValue": "1000000", "symbol": "{}"}}"#,
        symbol
    );
    Mock::given(method("POST"))
        .and(path("/fapi/v1/leverage"))
        .and(query_param("symbol", symbol))
        .respond_with(json_response(200, &body))
        .mount(server)
        .await;
}

pub async fn mount_leverage_rejected(server: &MockServer, symbol: &str) {
    Mock::given(method("POST"))
        .and(path("/fapi/v1/leverage"))
        .and(query_param("symbol", symbol))
        .respond_with(json_response(400, api_responses::INVALID_LEVERAGE))
        .mount(server)
        .await;
}

/// Sample API responses for testing
pub mod api_responses {
    /// Exchange info with BTCUSDT, ETHUSDT and a symbol without sizing filters
    pub const EXCHANGE_INFO: &str = r#"{
        "timezone": "UTC",
        "serverTime": 1700000000000,
        "futuresType": "U_MARGINED",
        "rateLimits": [],
        "exchangeFilters": [],
        "symbols": [
            {
                "symbol": "BTCUSDT",
                "pair": "BTCUSDT",
                "contractType": "PERPETUAL",
                "status": "TRADING",
                "baseAsset": "BTC",
                "quoteAsset": "USDT",
                "marginAsset": "USDT",
                "pricePrecision": 2,
                "quantityPrecision": 3,
                "filters": [
                    {"filterType": "PRICE_FILTER", "minPrice": "556.80", "maxPrice": "4529764", "tickSize": "0.10"},
                    {"filterType": "LOT_SIZE", "stepSize": "0.001", "maxQty": "1000", "minQty": "0.001"},
                    {"filterType": "MARKET_LOT_SIZE", "stepSize": "0.001", "maxQty": "120", "minQty": "0.001"},
                    {"filterType": "MAX_NUM_ORDERS", "limit": 200},
                    {"filterType": "MIN_NOTIONAL", "notional": "100"},
                    {"filterType": "PERCENT_PRICE", "multiplierUp": "1.0500", "multiplierDown": "0.9500", "multiplierDecimal": "4"}
                ],
                "orderTypes": ["LIMIT", "MARKET"],
                "timeInForce": ["GTC", "IOC"]
            },
            {
                "symbol": "ETHUSDT",
                "pair": "ETHUSDT",
                "contractType": "PERPETUAL",
                "status": "TRADING",
                "baseAsset": "ETH",
                "quoteAsset": "USDT",
                "pricePrecision": 2,
                "quantityPrecision": 3,
                "filters": [
                    {"filterType": "PRICE_FILTER", "minPrice": "39.86", "maxPrice": "306177", "tickSize": "0.01"},
                    {"filterType": "LOT_SIZE", "stepSize": "0.001", "maxQty": "10000", "minQty": "0.001"},
                    {"filterType": "MIN_NOTIONAL", "notional": "20"}
                ]
            },
            {
                "symbol": "ODDUSDT",
                "status": "SETTLING",
                "baseAsset": "ODD",
                "quoteAsset": "USDT",
                "filters": [
                    {"filterType": "MAX_NUM_ALGO_ORDERS", "limit": 10}
                ]
            }
        ]
    }"#;

    /// Exchange info after a relisting: BTCUSDT tick size changed
    pub const EXCHANGE_INFO_UPDATED: &str = r#"{
        "timezone": "UTC",
        "serverTime": 1700000600000,
        "symbols": [
            {
                "symbol": "BTCUSDT",
                "status": "TRADING",
                "baseAsset": "BTC",
                "quoteAsset": "USDT",
                "filters": [
                    {"filterType": "PRICE_FILTER", "minPrice": "556.80", "maxPrice": "4529764", "tickSize": "0.50"},
                    {"filterType": "LOT_SIZE", "stepSize": "0.001", "maxQty": "1000", "minQty": "0.001"}
                ]
            }
        ]
    }"#;

    pub const ACCOUNT: &str = r#"{
        "feeTier": 0,
        "canTrade": true,
        "totalWalletBalance": "1023.72469206",
        "totalUnrealizedProfit": "0.00000000",
        "availableBalance": "1000.00000000",
        "assets": [
            {"asset": "USDT", "walletBalance": "1023.72469206", "availableBalance": "1000.00000000"},
            {"asset": "BNB", "walletBalance": "0.25000000", "availableBalance": "0.25000000"}
        ],
        "positions": []
    }"#;

    pub const INVALID_LEVERAGE: &str = r#"{"code": -4028, "msg": "Leverage 20 is not valid"}"#;

    pub const INVALID_API_KEY: &str =
        r#"{"code": -2015, "msg": "Invalid API-key, IP, or permissions for action."}"#;

    pub const TOO_MANY_REQUESTS: &str =
        r#"{"code": -1003, "msg": "Too many requests; current limit is 2400 requests per minute."}"#;
}
