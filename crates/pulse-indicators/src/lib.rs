//! Pure technical-indicator transforms over candle sequences.
//!
//! Every function here is a stateless candle→series map. Inputs shorter
//! than an indicator's period yield an empty series rather than an error,
//! and no path produces NaN.

pub mod bollinger;
pub mod divergence;
pub mod ema;
pub mod macd;
pub mod momentum;
pub mod rsi;
pub mod vpt;

pub use bollinger::{bollinger, BollingerConfig};
pub use divergence::{
    detect_divergences, find_extrema, Divergence, DivergenceKind, ExtremumKind, ExtremumPoint,
};
pub use ema::ema;
pub use macd::{macd, MacdConfig};
pub use momentum::momentum;
pub use rsi::rsi;
pub use vpt::vpt;
