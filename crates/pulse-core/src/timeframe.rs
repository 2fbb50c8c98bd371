//! Timeframe types and candle aggregation.

use std::fmt;
use std::str::FromStr;

use crate::candle::Candle;

/// Timeframe enumeration for the chart periods the dashboard exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Timeframe {
    Min1,
    Min5,
    Min15,
    Min30,
    Hour1,
    Hour4,
    Day1,
}

impl Timeframe {
    /// Returns the duration of this timeframe in seconds.
    pub fn seconds(&self) -> i64 {
        match self {
            Timeframe::Min1 => 60,
            Timeframe::Min5 => 60 * 5,
            Timeframe::Min15 => 60 * 15,
            Timeframe::Min30 => 60 * 30,
            Timeframe::Hour1 => 60 * 60,
            Timeframe::Hour4 => 60 * 60 * 4,
            Timeframe::Day1 => 60 * 60 * 24,
        }
    }

    /// Returns the short label used in API intervals and the UI.
    pub fn label(&self) -> &'static str {
        match self {
            Timeframe::Min1 => "1m",
            Timeframe::Min5 => "5m",
            Timeframe::Min15 => "15m",
            Timeframe::Min30 => "30m",
            Timeframe::Hour1 => "1h",
            Timeframe::Hour4 => "4h",
            Timeframe::Day1 => "1d",
        }
    }

    /// Returns all available timeframes in order.
    pub fn all() -> &'static [Timeframe] {
        &[
            Timeframe::Min1,
            Timeframe::Min5,
            Timeframe::Min15,
            Timeframe::Min30,
            Timeframe::Hour1,
            Timeframe::Hour4,
            Timeframe::Day1,
        ]
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1m" => Ok(Timeframe::Min1),
            "5m" => Ok(Timeframe::Min5),
            "15m" => Ok(Timeframe::Min15),
            "30m" => Ok(Timeframe::Min30),
            "1h" => Ok(Timeframe::Hour1),
            "4h" => Ok(Timeframe::Hour4),
            "1d" => Ok(Timeframe::Day1),
            other => Err(format!("unknown timeframe: {other}")),
        }
    }
}

/// Roll candles up into coarser buckets of the given timeframe.
///
/// Each bucket opens at its interval-aligned start, keeps the first open
/// and last close, spans the extreme high/low and sums the volume. Input
/// must be ascending by time; a bucket's time carries the aligned start
/// rather than the first candle's raw timestamp.
pub fn aggregate_candles(candles: &[Candle], timeframe: Timeframe) -> Vec<Candle> {
    let interval = timeframe.seconds();
    let mut buckets: Vec<Candle> = Vec::new();

    for candle in candles {
        let start = candle.time.div_euclid(interval) * interval;
        match buckets.last_mut() {
            Some(bucket) if bucket.time == start => {
                bucket.high = bucket.high.max(candle.high);
                bucket.low = bucket.low.min(candle.low);
                bucket.close = candle.close;
                bucket.volume += candle.volume;
            }
            _ => buckets.push(Candle::new(
                start,
                candle.open,
                candle.high,
                candle.low,
                candle.close,
                candle.volume,
            )),
        }
    }

    buckets
}
