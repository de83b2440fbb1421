//! Exchange trading-rule cache and order-sizing normalization
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  OrderSizer                                                 │
//! │    - tick / step / min-notional lookups                     │
//! │    - floors prices and quantities to the venue grid         │
//! └─────────────────────────────────────────────────────────────┘
//!        │ get_symbol_rules (refreshes only when uninitialized)
//!        ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  MetadataCache                                              │
//! │    Uninitialized ──refresh ok──▶ Populated                  │
//! │    Populated ──refresh failed──▶ Stale (keeps last data)    │
//! │    Stale ──refresh ok──▶ Populated                          │
//! │    every successful refresh sets leverage on base pairs     │
//! └─────────────────────────────────────────────────────────────┘
//!        │ fetch_rule_set / set_leverage
//!        ▼
//!   ExchangeAdapter (one round trip per call, no retries)
//! ```

mod cache;
mod sizer;

pub use cache::{CacheStatus, MetadataCache, RefreshOutcome, RuleIndex};
pub use sizer::{round_to_step, OrderSizer, DEFAULT_PRECISION};
