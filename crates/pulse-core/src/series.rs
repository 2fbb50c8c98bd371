//! Indicator output samples.
//!
//! Derived series are always recomputed from candles on demand and never
//! persisted; each point carries the timestamp of the candle it was
//! computed from so multi-line indicators stay aligned by time.

/// A single time/value sample of a one-line indicator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesPoint {
    pub time: i64,
    pub value: f64,
}

impl SeriesPoint {
    pub fn new(time: i64, value: f64) -> Self {
        Self { time, value }
    }
}

/// One MACD sample: line, signal and histogram share the candle timestamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacdPoint {
    pub time: i64,
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// One Bollinger Bands sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BollingerPoint {
    pub time: i64,
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}
