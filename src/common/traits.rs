//! Trait definitions for exchange adapters

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Arc;

use super::errors::Result;
use super::types::{AccountSnapshot, ExchangeRuleSet, LeverageChange};

/// I/O boundary to a derivatives venue
///
/// Implementations perform exactly one remote round trip per call and never
/// retry. Any failure (network, auth, rate limit, malformed response) comes
/// back as an `Err`; deciding what to do about it is the caller's job.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExchangeAdapter: Send + Sync {
    /// Fetch the exchange-wide trading rules for every symbol
    async fn fetch_rule_set(&self) -> Result<ExchangeRuleSet>;

    /// Fetch the futures account totals and per-asset balances
    async fn fetch_account(&self) -> Result<AccountSnapshot>;

    /// Set the leverage multiplier for one symbol
    ///
    /// # Arguments
    /// * `symbol` - Upper-case venue symbol
    /// * `leverage` - Target multiplier (e.g. 20)
    async fn set_leverage(&self, symbol: &str, leverage: u32) -> Result<LeverageChange>;

    /// Fetch the total wallet balance in quote currency
    async fn fetch_balance(&self) -> Result<Decimal> {
        Ok(self.fetch_account().await?.total_wallet_balance)
    }

    /// Name of the venue, for log lines
    fn venue_name(&self) -> &'static str;
}

/// Shared adapter handle for dynamic dispatch
pub type SharedAdapter = Arc<dyn ExchangeAdapter>;
