use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::error;

use crate::common::traits::SharedAdapter;

/// Reads the futures wallet straight from the venue
///
/// Every call is a live request. Failures are logged and reported as a zero
/// (or empty) balance so callers gating new positions stay on the safe side.
#[derive(Clone)]
pub struct BalanceAccessor {
    adapter: SharedAdapter,
}

impl BalanceAccessor {
    pub fn new(adapter: SharedAdapter) -> Self {
        Self { adapter }
    }

    /// Total wallet balance in quote currency, `0` on failure
    pub async fn futures_balance(&self) -> Decimal {
        match self.adapter.fetch_balance().await {
            Ok(balance) => balance,
            Err(e) => {
                error!(venue = self.adapter.venue_name(), error = %e, "Failed to fetch futures balance, using 0");
                Decimal::ZERO
            }
        }
    }

    /// Wallet balance per asset, empty on failure
    pub async fn asset_balances(&self) -> HashMap<String, Decimal> {
        match self.adapter.fetch_account().await {
            Ok(account) => account
                .assets
                .into_iter()
                .map(|a| (a.asset, a.wallet_balance))
                .collect(),
            Err(e) => {
                error!(venue = self.adapter.venue_name(), error = %e, "Failed to fetch asset balances");
                HashMap::new()
            }
        }
    }

    /// Wallet balance of one asset (e.g. `USDT`), `0` on failure or if absent
    pub async fn asset_balance(&self, asset: &str) -> Decimal {
        let asset = asset.trim().to_uppercase();
        self.asset_balances()
            .await
            .get(&asset)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }
}
