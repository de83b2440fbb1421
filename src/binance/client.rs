//! Binance futures adapter: REST transport plus wire-to-domain conversion

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use super::messages::{AccountResponse, ExchangeInfoResponse, FilterInfo, LeverageResponse, SymbolInfo};
use super::rest::BinanceRestClient;
use crate::common::errors::{ClientError, Result};
use crate::common::traits::ExchangeAdapter;
use crate::common::types::{
    AccountSnapshot, AssetBalance, ExchangeRuleSet, LeverageChange, SymbolFilter, SymbolRules,
};
use crate::config::types::ExchangeConfig;

/// Exchange adapter for Binance USD-M futures
#[derive(Debug, Clone)]
pub struct BinanceFuturesClient {
    rest_client: BinanceRestClient,
}

impl BinanceFuturesClient {
    /// Create a client from configuration
    ///
    /// The configured base URL is the one every request goes to. Missing
    /// credentials are not an error here; signed calls fail on first use.
    pub fn new(config: &ExchangeConfig) -> Result<Self> {
        let rest_client = BinanceRestClient::with_timeout(
            &config.base_url,
            Duration::from_secs(config.request_timeout_seconds),
        )?
        .with_recv_window(config.recv_window_ms);

        let rest_client = match config.credentials() {
            Some(creds) => rest_client.with_credentials(creds),
            None => rest_client,
        };

        info!(
            base_url = %rest_client.base_url(),
            authenticated = rest_client.has_credentials(),
            "Binance futures client created"
        );

        Ok(Self { rest_client })
    }

    /// Get a reference to the REST client
    pub fn rest(&self) -> &BinanceRestClient {
        &self.rest_client
    }

    /// Check if the API is reachable
    pub async fn check_health(&self) -> Result<()> {
        self.rest_client.ping().await
    }
}

#[async_trait]
impl ExchangeAdapter for BinanceFuturesClient {
    async fn fetch_rule_set(&self) -> Result<ExchangeRuleSet> {
        let response = self.rest_client.get_exchange_info().await?;
        convert_exchange_info(response)
    }

    async fn fetch_account(&self) -> Result<AccountSnapshot> {
        let response = self.rest_client.get_account().await?;
        convert_account(response)
    }

    async fn set_leverage(&self, symbol: &str, leverage: u32) -> Result<LeverageChange> {
        let response = self.rest_client.change_leverage(symbol, leverage).await?;
        convert_leverage(response)
    }

    fn venue_name(&self) -> &'static str {
        "binance-futures"
    }
}

// ============================================================================
// Conversion Helpers
// ============================================================================

fn parse_decimal(raw: &str, what: &str) -> Result<Decimal> {
    Decimal::from_str(raw.trim())
        .map_err(|e| ClientError::InvalidResponse(format!("Invalid {} {:?}: {}", what, raw, e)))
}

fn parse_optional(raw: Option<&str>, what: &str) -> Result<Decimal> {
    match raw {
        Some(value) => parse_decimal(value, what),
        None => Ok(Decimal::ZERO),
    }
}

fn convert_exchange_info(response: ExchangeInfoResponse) -> Result<ExchangeRuleSet> {
    let symbols: Result<Vec<SymbolRules>> =
        response.symbols.into_iter().map(convert_symbol).collect();
    let symbols = symbols?;

    debug!(symbols = symbols.len(), "Converted exchange info");
    Ok(ExchangeRuleSet::new(symbols, response.server_time))
}

fn convert_symbol(info: SymbolInfo) -> Result<SymbolRules> {
    let filters: Result<Vec<SymbolFilter>> =
        info.filters.into_iter().map(convert_filter).collect();

    Ok(SymbolRules {
        symbol: info.symbol,
        status: info.status,
        base_asset: info.base_asset,
        quote_asset: info.quote_asset,
        price_precision: info.price_precision,
        quantity_precision: info.quantity_precision,
        filters: filters?,
    })
}

fn convert_filter(filter: FilterInfo) -> Result<SymbolFilter> {
    Ok(match filter {
        FilterInfo::Price {
            tick_size,
            min_price,
            max_price,
        } => SymbolFilter::Price {
            tick_size: parse_decimal(&tick_size, "tickSize")?,
            min_price: parse_optional(min_price.as_deref(), "minPrice")?,
            max_price: parse_optional(max_price.as_deref(), "maxPrice")?,
        },
        FilterInfo::LotSize {
            step_size,
            min_qty,
            max_qty,
        } => SymbolFilter::LotSize {
            step_size: parse_decimal(&step_size, "stepSize")?,
            min_qty: parse_optional(min_qty.as_deref(), "minQty")?,
            max_qty: parse_optional(max_qty.as_deref(), "maxQty")?,
        },
        FilterInfo::MarketLotSize {
            step_size,
            min_qty,
            max_qty,
        } => SymbolFilter::MarketLotSize {
            step_size: parse_decimal(&step_size, "stepSize")?,
            min_qty: parse_optional(min_qty.as_deref(), "minQty")?,
            max_qty: parse_optional(max_qty.as_deref(), "maxQty")?,
        },
        FilterInfo::MinNotional { notional } => SymbolFilter::MinNotional {
            notional: parse_optional(notional.as_deref(), "notional")?,
        },
        FilterInfo::Other => SymbolFilter::Other,
    })
}

fn convert_account(response: AccountResponse) -> Result<AccountSnapshot> {
    let total_wallet_balance = parse_decimal(&response.total_wallet_balance, "totalWalletBalance")?;
    let available_balance = parse_optional(response.available_balance.as_deref(), "availableBalance")?;

    let assets: Result<Vec<AssetBalance>> = response
        .assets
        .into_iter()
        .map(|a| {
            Ok(AssetBalance {
                wallet_balance: parse_decimal(&a.wallet_balance, "walletBalance")?,
                available_balance: parse_optional(a.available_balance.as_deref(), "availableBalance")?,
                asset: a.asset,
            })
        })
        .collect();

    Ok(AccountSnapshot {
        total_wallet_balance,
        available_balance,
        assets: assets?,
    })
}

fn convert_leverage(response: LeverageResponse) -> Result<LeverageChange> {
    let max_notional_value = response
        .max_notional_value
        .as_deref()
        .map(|v| parse_decimal(v, "maxNotionalValue"))
        .transpose()?;

    Ok(LeverageChange {
        symbol: response.symbol,
        leverage: response.leverage,
        max_notional_value,
    })
}
