//! Rate-of-change momentum.

use pulse_core::{Candle, SeriesPoint};

/// Percentage change of the close over `period` candles:
/// `(close[t] - close[t - period]) / close[t - period] * 100`.
///
/// Defined from candle index `period` onward, so the output is `period`
/// points shorter than the input.
pub fn momentum(candles: &[Candle], period: usize) -> Vec<SeriesPoint> {
    if period == 0 || candles.len() <= period {
        return Vec::new();
    }

    (period..candles.len())
        .map(|t| {
            let base = candles[t - period].close;
            let value = (candles[t].close - base) / base * 100.0;
            SeriesPoint::new(candles[t].time, value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_candles(closes: &[f64]) -> Vec<Candle> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Candle::new(i as i64 * 60, close, close + 1.0, close - 1.0, close, 100.0))
            .collect()
    }

    #[test]
    fn test_momentum_length_and_times() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
        let candles = make_candles(&closes);
        let series = momentum(&candles, 10);

        assert_eq!(series.len(), 30 - 10);
        assert_eq!(series[0].time, candles[10].time);
    }

    #[test]
    fn test_momentum_known_value() {
        // 30 bars climbing $1/bar from 100: closes 101..=130, so the last
        // point compares close[29]=130 against close[19]=120.
        let closes: Vec<f64> = (1..=30).map(|i| 100.0 + i as f64).collect();
        let candles = make_candles(&closes);
        let series = momentum(&candles, 10);

        let last = series.last().copied().unwrap();
        assert!((last.value - 10.0 / 120.0 * 100.0).abs() < 1e-9);
        assert!((last.value - 8.333).abs() < 1e-3);
    }

    #[test]
    fn test_momentum_zero_on_constant_price() {
        let candles = make_candles(&[42.0; 20]);
        assert!(momentum(&candles, 10).iter().all(|p| p.value == 0.0));
    }

    #[test]
    fn test_momentum_insufficient_data() {
        let candles = make_candles(&[1.0; 10]);
        assert!(momentum(&candles, 10).is_empty());
    }
}
