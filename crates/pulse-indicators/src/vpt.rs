//! Volume-Price Trend.

use pulse_core::{Candle, SeriesPoint};

/// Cumulative Volume-Price Trend.
///
/// Each step adds `volume[t] * (close[t] - close[t-1]) / close[t-1]` to a
/// running total. The series starts at candle index 1 with the first step's
/// contribution.
pub fn vpt(candles: &[Candle]) -> Vec<SeriesPoint> {
    if candles.len() < 2 {
        return Vec::new();
    }

    let mut out = Vec::with_capacity(candles.len() - 1);
    let mut total = 0.0;

    for pair in candles.windows(2) {
        let prev_close = pair[0].close;
        total += pair[1].volume * (pair[1].close - prev_close) / prev_close;
        out.push(SeriesPoint::new(pair[1].time, total));
    }

    out
}
