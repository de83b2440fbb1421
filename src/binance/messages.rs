//! Binance USD-M futures REST payloads
//!
//! Decimal values arrive as strings and are kept as strings here; conversion
//! to domain types happens in [`client`](super::client).

use serde::{Deserialize, Serialize};

/// Response from `GET /fapi/v1/time`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerTimeResponse {
    #[serde(rename = "serverTime")]
    pub server_time: i64,
}

/// Response from `GET /fapi/v1/exchangeInfo`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeInfoResponse {
    #[serde(default)]
    pub timezone: String,
    #[serde(rename = "serverTime", default)]
    pub server_time: i64,
    pub symbols: Vec<SymbolInfo>,
}

/// Per-symbol entry of the exchange info response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolInfo {
    pub symbol: String,
    #[serde(default)]
    pub status: String,
    #[serde(rename = "contractType", default)]
    pub contract_type: Option<String>,
    #[serde(rename = "baseAsset", default)]
    pub base_asset: String,
    #[serde(rename = "quoteAsset", default)]
    pub quote_asset: String,
    #[serde(rename = "pricePrecision", default)]
    pub price_precision: Option<u32>,
    #[serde(rename = "quantityPrecision", default)]
    pub quantity_precision: Option<u32>,
    #[serde(default)]
    pub filters: Vec<FilterInfo>,
}

/// Symbol filter, tagged by `filterType`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "filterType")]
pub enum FilterInfo {
    #[serde(rename = "PRICE_FILTER")]
    Price {
        #[serde(rename = "tickSize")]
        tick_size: String,
        #[serde(rename = "minPrice", default)]
        min_price: Option<String>,
        #[serde(rename = "maxPrice", default)]
        max_price: Option<String>,
    },
    #[serde(rename = "LOT_SIZE")]
    LotSize {
        #[serde(rename = "stepSize")]
        step_size: String,
        #[serde(rename = "minQty", default)]
        min_qty: Option<String>,
        #[serde(rename = "maxQty", default)]
        max_qty: Option<String>,
    },
    #[serde(rename = "MARKET_LOT_SIZE")]
    MarketLotSize {
        #[serde(rename = "stepSize")]
        step_size: String,
        #[serde(rename = "minQty", default)]
        min_qty: Option<String>,
        #[serde(rename = "maxQty", default)]
        max_qty: Option<String>,
    },
    // Futures send `notional`, spot sends `minNotional` (and a NOTIONAL filter)
    #[serde(rename = "MIN_NOTIONAL", alias = "NOTIONAL")]
    MinNotional {
        #[serde(alias = "minNotional", default)]
        notional: Option<String>,
    },
    #[serde(other)]
    Other,
}

/// Response from `GET /fapi/v2/account`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountResponse {
    #[serde(rename = "totalWalletBalance")]
    pub total_wallet_balance: String,
    #[serde(rename = "availableBalance", default)]
    pub available_balance: Option<String>,
    #[serde(default)]
    pub assets: Vec<AccountAsset>,
}

/// Per-asset entry of the account response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountAsset {
    pub asset: String,
    #[serde(rename = "walletBalance")]
    pub wallet_balance: String,
    #[serde(rename = "availableBalance", default)]
    pub available_balance: Option<String>,
}

/// Response from `POST /fapi/v1/leverage`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeverageResponse {
    pub symbol: String,
    pub leverage: u32,
    #[serde(rename = "maxNotionalValue", default)]
    pub max_notional_value: Option<String>,
}

/// Error body returned with non-2xx responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub code: i64,
    pub msg: String,
}
