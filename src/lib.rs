//! Futures Rules Library
//!
//! Caches Binance USD-M futures trading rules, snaps order prices and
//! quantities to the venue's tick and step sizes, configures leverage for a
//! watch-list of symbols and reads the live wallet balance.

pub mod account;
pub mod binance;
pub mod common;
pub mod config;
pub mod metadata;

// Re-export commonly used types
pub use account::BalanceAccessor;
pub use binance::{BinanceFuturesClient, BinanceRestClient};
pub use common::errors::{ClientError, Result};
pub use common::traits::{ExchangeAdapter, SharedAdapter};
pub use common::types::{
    AccountSnapshot, AssetBalance, ExchangeRuleSet, LeverageChange, SymbolFilter, SymbolRules,
};
pub use config::types::AppConfig;
pub use metadata::{
    round_to_step, CacheStatus, MetadataCache, OrderSizer, RefreshOutcome, DEFAULT_PRECISION,
};
