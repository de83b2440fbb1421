use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{error, info, warn};

use crate::common::traits::SharedAdapter;
use crate::common::types::{ExchangeRuleSet, SymbolRules};
use crate::config::types::TradingConfig;

/// Rule set plus its upper-case symbol index, built together and swapped together
#[derive(Debug)]
pub struct RuleIndex {
    rule_set: Arc<ExchangeRuleSet>,
    by_symbol: HashMap<String, Arc<SymbolRules>>,
}

impl RuleIndex {
    /// Index a freshly fetched rule set
    ///
    /// Duplicate symbols are not expected from the venue; if they occur the
    /// last record wins.
    pub fn build(rule_set: ExchangeRuleSet) -> Self {
        let mut by_symbol = HashMap::with_capacity(rule_set.symbols.len());

        for rules in &rule_set.symbols {
            let key = rules.symbol.to_uppercase();
            if by_symbol.insert(key, Arc::new(rules.clone())).is_some() {
                warn!(symbol = %rules.symbol, "Duplicate symbol in exchange rules, keeping the last record");
            }
        }

        Self {
            rule_set: Arc::new(rule_set),
            by_symbol,
        }
    }

    /// Look up rules by an already upper-cased symbol
    pub fn get(&self, symbol: &str) -> Option<Arc<SymbolRules>> {
        self.by_symbol.get(symbol).cloned()
    }

    /// Number of distinct symbols
    pub fn len(&self) -> usize {
        self.by_symbol.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_symbol.is_empty()
    }

    pub fn rule_set(&self) -> &Arc<ExchangeRuleSet> {
        &self.rule_set
    }
}

#[derive(Debug)]
enum CacheState {
    Uninitialized,
    Populated(Arc<RuleIndex>),
    /// Last refresh failed; holds the data of the last successful one
    Stale(Arc<RuleIndex>),
}

impl CacheState {
    fn index(&self) -> Option<&Arc<RuleIndex>> {
        match self {
            CacheState::Uninitialized => None,
            CacheState::Populated(index) | CacheState::Stale(index) => Some(index),
        }
    }

    fn status(&self) -> CacheStatus {
        match self {
            CacheState::Uninitialized => CacheStatus::Uninitialized,
            CacheState::Populated(_) => CacheStatus::Populated,
            CacheState::Stale(_) => CacheStatus::Stale,
        }
    }
}

/// Observable lifecycle of the cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// Never successfully refreshed
    Uninitialized,
    /// Holds the result of the most recent refresh
    Populated,
    /// The most recent refresh failed; older data is still served
    Stale,
}

/// Result of a refresh attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Rules replaced; leverage attempted for every base pair
    Refreshed {
        symbol_count: usize,
        /// Base pairs whose leverage call failed
        leverage_failures: Vec<String>,
    },
    /// Fetch failed; previous data (if any) left in place
    Failed,
}

impl RefreshOutcome {
    pub fn is_refreshed(&self) -> bool {
        matches!(self, RefreshOutcome::Refreshed { .. })
    }
}

/// Process-lifetime cache of exchange trading rules
///
/// Constructed once and shared by handle (`Arc<MetadataCache>`). Reads never
/// refresh implicitly once the cache holds data; only an explicit refresh or
/// `force_refresh = true` does. Every successful refresh re-applies the
/// configured leverage to each base pair.
pub struct MetadataCache {
    adapter: SharedAdapter,
    base_pairs: Vec<String>,
    leverage: u32,
    state: RwLock<CacheState>,
    /// Serializes refreshes; readers only ever take `state`
    refresh_lock: Mutex<()>,
}

impl MetadataCache {
    /// Create an empty cache
    ///
    /// # Arguments
    /// * `adapter` - Venue adapter used for fetches and leverage calls
    /// * `base_pairs` - Symbols to configure leverage for on every refresh
    /// * `leverage` - Multiplier applied to each base pair
    pub fn new(adapter: SharedAdapter, base_pairs: Vec<String>, leverage: u32) -> Self {
        Self {
            adapter,
            base_pairs: base_pairs.into_iter().map(|p| p.to_uppercase()).collect(),
            leverage,
            state: RwLock::new(CacheState::Uninitialized),
            refresh_lock: Mutex::new(()),
        }
    }

    /// Create an empty cache from the trading configuration
    pub fn from_config(adapter: SharedAdapter, trading: &TradingConfig) -> Self {
        Self::new(adapter, trading.base_pairs.clone(), trading.leverage)
    }

    /// Fetch the rule set and replace the cache wholesale
    ///
    /// Never returns an error: a failed fetch is logged and the previous data
    /// stays in place.
    pub async fn refresh(&self) -> RefreshOutcome {
        let _guard = self.refresh_lock.lock().await;
        self.refresh_locked().await
    }

    /// Rules for `symbol` (case-insensitive)
    ///
    /// Refreshes first when `force_refresh` is set or the cache has never been
    /// populated, blocking until that attempt finishes. `None` means the
    /// symbol is unknown, which is a normal outcome.
    pub async fn get_symbol_rules(&self, symbol: &str, force_refresh: bool) -> Option<Arc<SymbolRules>> {
        if force_refresh {
            self.refresh().await;
        } else if self.status().await == CacheStatus::Uninitialized {
            let _guard = self.refresh_lock.lock().await;
            // Another caller may have populated the cache while we waited
            if self.status().await == CacheStatus::Uninitialized {
                self.refresh_locked().await;
            }
        }

        let key = symbol.trim().to_uppercase();
        let state = self.state.read().await;
        state.index().and_then(|index| index.get(&key))
    }

    /// Current lifecycle state
    pub async fn status(&self) -> CacheStatus {
        self.state.read().await.status()
    }

    /// Most recent successfully fetched rule set
    pub async fn rule_set(&self) -> Option<Arc<ExchangeRuleSet>> {
        let state = self.state.read().await;
        state.index().map(|index| index.rule_set().clone())
    }

    /// Configured base pairs (upper-case)
    pub fn base_pairs(&self) -> &[String] {
        &self.base_pairs
    }

    /// Caller must hold `refresh_lock`
    async fn refresh_locked(&self) -> RefreshOutcome {
        let venue = self.adapter.venue_name();

        let rule_set = match self.adapter.fetch_rule_set().await {
            Ok(rule_set) => rule_set,
            Err(e) => {
                let mut state = self.state.write().await;
                let previous = match &*state {
                    CacheState::Populated(index) => Some(index.clone()),
                    _ => None,
                };
                if let Some(index) = previous {
                    *state = CacheState::Stale(index);
                }
                error!(venue, error = %e, status = ?state.status(), "Failed to refresh exchange rules, keeping previous data");
                return RefreshOutcome::Failed;
            }
        };

        let index = Arc::new(RuleIndex::build(rule_set));
        let symbol_count = index.len();
        if index.is_empty() {
            warn!(venue, "Exchange returned no symbols, every lookup will miss");
        }
        *self.state.write().await = CacheState::Populated(index);
        info!(venue, symbols = symbol_count, "Exchange rules refreshed");

        let leverage_failures = self.apply_leverage().await;

        RefreshOutcome::Refreshed {
            symbol_count,
            leverage_failures,
        }
    }

    /// Set leverage on every base pair, continuing past failures
    async fn apply_leverage(&self) -> Vec<String> {
        let mut failures = Vec::new();

        for symbol in &self.base_pairs {
            match self.adapter.set_leverage(symbol, self.leverage).await {
                Ok(change) => {
                    info!(symbol = %symbol, leverage = change.leverage, "Leverage set");
                }
                Err(e) => {
                    error!(symbol = %symbol, leverage = self.leverage, error = %e, "Could not set leverage");
                    failures.push(symbol.clone());
                }
            }
        }

        failures
    }
}

impl std::fmt::Debug for MetadataCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetadataCache")
            .field("venue", &self.adapter.venue_name())
            .field("base_pairs", &self.base_pairs)
            .field("leverage", &self.leverage)
            .finish_non_exhaustive()
    }
}
