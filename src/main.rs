//! Futures Rules - Main Entry Point
//!
//! Loads configuration, authenticates against Binance USD-M futures, warms the
//! trading-rule cache (which also sets leverage on the base pairs) and reports
//! the sizing rules and wallet balance before idling until Ctrl-C.

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use futures_rules::config::{load_config, load_from_env};
use futures_rules::{
    BalanceAccessor, BinanceFuturesClient, MetadataCache, OrderSizer, RefreshOutcome, SharedAdapter,
};

/// CLI arguments for the application
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Ignore the config file and read only BINANCE_*, BASE_PAIRS and LEVERAGE
    #[arg(long)]
    env_only: bool,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long, env = "LOG_LEVEL")]
    log_level: Option<String>,

    /// Comma-separated base pairs; overrides the config file
    #[arg(long)]
    base_pairs: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load environment variables from .env file if present
    dotenvy::dotenv().ok();

    let mut config = if args.env_only {
        load_from_env()?
    } else {
        load_config(Some(args.config.as_str()))?
    };
    if let Some(pairs) = &args.base_pairs {
        config.trading.base_pairs = pairs
            .split(',')
            .map(|p| p.trim().to_uppercase())
            .filter(|p| !p.is_empty())
            .collect();
    }

    let level = args
        .log_level
        .clone()
        .unwrap_or_else(|| config.settings.log_level.clone());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    info!("Starting futures_rules");
    if !args.env_only {
        info!("Configuration file: {}", args.config);
    }

    let client = BinanceFuturesClient::new(&config.exchange)?;
    if let Err(e) = client.check_health().await {
        warn!(error = %e, "Exchange ping failed");
    }

    let adapter: SharedAdapter = Arc::new(client);
    let cache = Arc::new(MetadataCache::from_config(adapter.clone(), &config.trading));
    let sizer = OrderSizer::new(cache.clone());
    let balances = BalanceAccessor::new(adapter);

    match cache.refresh().await {
        RefreshOutcome::Refreshed {
            symbol_count,
            leverage_failures,
        } => {
            info!(
                symbols = symbol_count,
                leverage_failures = leverage_failures.len(),
                "Trading rules loaded"
            );
            for symbol in cache.base_pairs() {
                let tick = sizer.price_tick_size(symbol).await;
                let step = sizer.quantity_step_size(symbol).await;
                let min_notional = sizer.min_notional(symbol).await;
                info!(symbol = %symbol, %tick, %step, %min_notional, "Sizing rules");
            }
        }
        // Lookups on an empty cache would each retry the fetch
        RefreshOutcome::Failed => warn!("Trading rules unavailable, sizing is unconstrained"),
    }

    let balance = balances.futures_balance().await;
    info!(%balance, "Futures wallet balance");

    info!("Application initialized successfully");

    tokio::signal::ctrl_c().await?;
    info!("Received shutdown signal, cleaning up...");

    Ok(())
}
