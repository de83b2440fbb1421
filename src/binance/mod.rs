//! Binance module - Client implementation for the USD-M futures REST API

pub mod auth;
pub mod client;
pub mod messages;
pub mod rest;

pub use client::BinanceFuturesClient;
pub use rest::BinanceRestClient;
