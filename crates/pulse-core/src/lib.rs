//! Core types for the pulse dashboard.
//!
//! This crate provides fundamental data structures with no external dependencies:
//! - `Candle` - OHLCV candle data
//! - `SeriesPoint` and friends - indicator output samples
//! - `Timeframe` - chart period enumeration and aggregation
//! - `CandleStore` - generation-tracked owner of the current candle set

pub mod candle;
pub mod series;
pub mod store;
pub mod timeframe;

pub use candle::Candle;
pub use series::{BollingerPoint, MacdPoint, SeriesPoint};
pub use store::{CandleStore, LoadTicket};
pub use timeframe::{aggregate_candles, Timeframe};
