//! Moving Average Convergence Divergence.

use pulse_core::{Candle, MacdPoint};

use crate::ema::ema_values;

/// MACD periods. Defaults to the standard 12/26/9.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacdConfig {
    pub fast_period: usize,
    pub slow_period: usize,
    pub signal_period: usize,
}

impl Default for MacdConfig {
    fn default() -> Self {
        Self {
            fast_period: 12,
            slow_period: 26,
            signal_period: 9,
        }
    }
}

/// Calculate the MACD line, signal line and histogram.
///
/// Both EMAs are full-length (seeded with the first close), so the fast and
/// slow series line up index-for-index and the MACD line is defined for
/// every candle. The signal line is an EMA of the MACD line; the histogram
/// is their difference. Inputs shorter than the slow period yield an empty
/// series.
pub fn macd(candles: &[Candle], config: MacdConfig) -> Vec<MacdPoint> {
    if candles.len() < config.slow_period {
        return Vec::new();
    }

    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let fast = ema_values(&closes, config.fast_period);
    let slow = ema_values(&closes, config.slow_period);

    let macd_line: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
    let signal = ema_values(&macd_line, config.signal_period);

    candles
        .iter()
        .zip(macd_line.iter().zip(&signal))
        .map(|(candle, (&m, &s))| MacdPoint {
            time: candle.time,
            macd: m,
            signal: s,
            histogram: m - s,
        })
        .collect()
}
