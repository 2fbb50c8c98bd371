//! Bollinger Bands.

use pulse_core::{BollingerPoint, Candle};

/// Bollinger parameters. Defaults to a 20-period SMA with 2σ bands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BollingerConfig {
    pub period: usize,
    pub multiplier: f64,
}

impl Default for BollingerConfig {
    fn default() -> Self {
        Self {
            period: 20,
            multiplier: 2.0,
        }
    }
}

/// Calculate Bollinger Bands over the close price.
///
/// The middle band is the SMA of the last `period` closes; the outer bands
/// sit `multiplier` population standard deviations away. The first value
/// lands on candle index `period - 1`, so the output omits the first
/// `period - 1` candles.
pub fn bollinger(candles: &[Candle], config: BollingerConfig) -> Vec<BollingerPoint> {
    if config.period == 0 || candles.len() < config.period {
        return Vec::new();
    }

    let period = config.period;
    let mut out = Vec::with_capacity(candles.len() - period + 1);

    for window in candles.windows(period) {
        let mean = window.iter().map(|c| c.close).sum::<f64>() / period as f64;
        let variance = window
            .iter()
            .map(|c| {
                let d = c.close - mean;
                d * d
            })
            .sum::<f64>()
            / period as f64;
        let offset = config.multiplier * variance.sqrt();

        // The window's last candle carries the point's timestamp.
        let time = window[period - 1].time;
        out.push(BollingerPoint {
            time,
            upper: mean + offset,
            middle: mean,
            lower: mean - offset,
        });
    }

    out
}
