//! Exchange market-data loading.
//!
//! Fetches klines, 24h tickers and the tradable symbol list from the
//! exchange's public REST API and maps wire klines to [`pulse_core::Candle`]s.

pub mod client;
pub mod source;
pub mod types;

pub use client::MarketClient;
pub use source::{DataSource, RestSource};
pub use types::{ExchangeInfo, Kline, StringDecimal, SymbolInfo, Ticker24h};
