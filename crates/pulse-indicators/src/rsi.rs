//! Relative Strength Index.

use pulse_core::{Candle, SeriesPoint};

/// Calculate the RSI of the close price over a trailing window.
///
/// Gains and losses are averaged over the last `period` close-to-close
/// changes (simple averages, not Wilder smoothing). The first value lands
/// on candle index `period`, so the output is `period` points shorter than
/// the input. When the window holds no losses the RSI saturates at 100
/// instead of dividing by zero.
pub fn rsi(candles: &[Candle], period: usize) -> Vec<SeriesPoint> {
    if period == 0 || candles.len() <= period {
        return Vec::new();
    }

    let changes: Vec<f64> = candles
        .windows(2)
        .map(|pair| pair[1].close - pair[0].close)
        .collect();

    let mut out = Vec::with_capacity(candles.len() - period);

    for t in period..candles.len() {
        let window = &changes[t - period..t];
        let avg_gain: f64 =
            window.iter().filter(|&&c| c > 0.0).sum::<f64>() / period as f64;
        let avg_loss: f64 =
            -window.iter().filter(|&&c| c < 0.0).sum::<f64>() / period as f64;

        let value = if avg_loss == 0.0 {
            100.0
        } else {
            let rs = avg_gain / avg_loss;
            100.0 - 100.0 / (1.0 + rs)
        };

        out.push(SeriesPoint::new(candles[t].time, value));
    }

    out
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
    fn test_rsi_length_and_times() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + (i % 7) as f64).collect();
        let candles = make_candles(&closes);
        let series = rsi(&candles, 14);

        assert_eq!(series.len(), 30 - 14);
        assert_eq!(series[0].time, candles[14].time);
    }

    #[test]
    fn test_rsi_bounded() {
        let closes: Vec<f64> = (0..60)
            .map(|i| 100.0 + (i as f64 * 0.7).sin() * 10.0)
            .collect();
        let candles = make_candles(&closes);
        for point in rsi(&candles, 14) {
            assert!(point.value >= 0.0 && point.value <= 100.0);
        }
    }

    #[test]
    fn test_rsi_saturates_on_pure_gains() {
        let closes: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
        let candles = make_candles(&closes);
        let series = rsi(&candles, 14);
        assert!(!series.is_empty());
        assert!(series.iter().all(|p| p.value == 100.0));
    }

    #[test]
    fn test_rsi_zero_on_pure_losses() {
        let closes: Vec<f64> = (0..20).map(|i| 100.0 - i as f64).collect();
        let candles = make_candles(&closes);
        let series = rsi(&candles, 14);
        assert!(!series.is_empty());
        assert!(series.iter().all(|p| p.value.abs() < 1e-9));
    }

    #[test]
    fn test_rsi_insufficient_data() {
        let candles = make_candles(&[1.0; 14]);
        assert!(rsi(&candles, 14).is_empty());
    }
}
