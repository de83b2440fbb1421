//! Domain types shared by the adapter, the metadata cache and the sizer

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Full venue response describing every tradable symbol at one point in time
///
/// Immutable once fetched. A refresh replaces the whole value, it is never merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRuleSet {
    /// Per-symbol rule records, in venue order
    pub symbols: Vec<SymbolRules>,
    /// Venue server time in milliseconds
    pub server_time: i64,
    /// Local time the rule set was received
    pub fetched_at: DateTime<Utc>,
}

impl ExchangeRuleSet {
    /// Create a rule set stamped with the current local time
    pub fn new(symbols: Vec<SymbolRules>, server_time: i64) -> Self {
        Self {
            symbols,
            server_time,
            fetched_at: Utc::now(),
        }
    }

    /// Number of symbol records
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Check if the venue returned no symbols
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// Trading rules for one symbol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolRules {
    /// Venue-assigned symbol, canonically upper-case (e.g. `BTCUSDT`)
    pub symbol: String,
    /// Trading status (`TRADING`, `SETTLING`, ...)
    pub status: String,
    pub base_asset: String,
    pub quote_asset: String,
    /// Venue-reported price precision (digits)
    #[serde(default)]
    pub price_precision: Option<u32>,
    /// Venue-reported quantity precision (digits)
    #[serde(default)]
    pub quantity_precision: Option<u32>,
    /// Filters in venue order
    pub filters: Vec<SymbolFilter>,
}

impl SymbolRules {
    /// Create rules with only a symbol and filters set
    pub fn new(symbol: impl Into<String>, filters: Vec<SymbolFilter>) -> Self {
        Self {
            symbol: symbol.into(),
            status: "TRADING".to_string(),
            base_asset: String::new(),
            quote_asset: String::new(),
            price_precision: None,
            quantity_precision: None,
            filters,
        }
    }

    /// Tick size of the price filter, if the symbol has one
    pub fn tick_size(&self) -> Option<Decimal> {
        self.filters.iter().find_map(|f| match f {
            SymbolFilter::Price { tick_size, .. } => Some(*tick_size),
            _ => None,
        })
    }

    /// Step size of the lot-size filter, if the symbol has one
    pub fn step_size(&self) -> Option<Decimal> {
        self.filters.iter().find_map(|f| match f {
            SymbolFilter::LotSize { step_size, .. } => Some(*step_size),
            _ => None,
        })
    }

    /// Minimum order notional, if the symbol has one
    pub fn min_notional(&self) -> Option<Decimal> {
        self.filters.iter().find_map(|f| match f {
            SymbolFilter::MinNotional { notional } => Some(*notional),
            _ => None,
        })
    }
}

/// A single named filter on a symbol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SymbolFilter {
    /// Price increments and bounds
    Price {
        tick_size: Decimal,
        min_price: Decimal,
        max_price: Decimal,
    },
    /// Quantity increments and bounds for limit orders
    LotSize {
        step_size: Decimal,
        min_qty: Decimal,
        max_qty: Decimal,
    },
    /// Quantity increments and bounds for market orders
    MarketLotSize {
        step_size: Decimal,
        min_qty: Decimal,
        max_qty: Decimal,
    },
    /// Minimum order value in quote currency
    MinNotional { notional: Decimal },
    /// Any filter this crate does not consume
    Other,
}

impl SymbolFilter {
    /// Price filter with only the tick size known
    pub fn price(tick_size: Decimal) -> Self {
        SymbolFilter::Price {
            tick_size,
            min_price: Decimal::ZERO,
            max_price: Decimal::ZERO,
        }
    }

    /// Lot-size filter with only the step size known
    pub fn lot_size(step_size: Decimal) -> Self {
        SymbolFilter::LotSize {
            step_size,
            min_qty: Decimal::ZERO,
            max_qty: Decimal::ZERO,
        }
    }
}

/// Wallet balance of a single asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetBalance {
    pub asset: String,
    pub wallet_balance: Decimal,
    pub available_balance: Decimal,
}

/// Futures account totals, denominated in the quote currency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSnapshot {
    pub total_wallet_balance: Decimal,
    pub available_balance: Decimal,
    pub assets: Vec<AssetBalance>,
}

/// Acknowledgement of a leverage change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeverageChange {
    pub symbol: String,
    pub leverage: u32,
    /// Maximum position notional allowed at this leverage
    pub max_notional_value: Option<Decimal>,
}
