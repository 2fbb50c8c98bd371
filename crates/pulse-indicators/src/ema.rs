//! Exponential Moving Average.

use pulse_core::{Candle, SeriesPoint};

/// Calculate the EMA of the close price.
///
/// The series is seeded with the first close and defined for every input
/// candle; there is no warm-up truncation. The seed biases the first
/// ~`period` samples toward the first close. Downstream rendering relies
/// on the full-length output, so the transient is kept as-is.
pub fn ema(candles: &[Candle], period: usize) -> Vec<SeriesPoint> {
    if candles.is_empty() || period == 0 {
        return Vec::new();
    }

    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let values = ema_values(&closes, period);

    candles
        .iter()
        .zip(values)
        .map(|(c, v)| SeriesPoint::new(c.time, v))
        .collect()
}

/// EMA recurrence over raw values: `ema = (x - prev) * k + prev`,
/// `k = 2 / (period + 1)`, seeded with the first value.
pub(crate) fn ema_values(values: &[f64], period: usize) -> Vec<f64> {
    if values.is_empty() || period == 0 {
        return Vec::new();
    }

    let k = 2.0 / (period as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    let mut prev = values[0];
    out.push(prev);

    for &value in &values[1..] {
        prev = (value - prev) * k + prev;
        out.push(prev);
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
    fn test_ema_full_length() {
        for n in 1..=10 {
            let closes: Vec<f64> = (0..n).map(|i| 100.0 + i as f64).collect();
            let candles = make_candles(&closes);
            assert_eq!(ema(&candles, 3).len(), n);
        }
    }

    #[test]
    fn test_ema_seed_is_first_close() {
        let candles = make_candles(&[50.0, 51.0, 52.0]);
        let series = ema(&candles, 5);
        assert_eq!(series[0].value, 50.0);
        assert_eq!(series[0].time, 0);
    }

    #[test]
    fn test_ema_recurrence() {
        let candles = make_candles(&[10.0, 13.0]);
        let series = ema(&candles, 2);
        // k = 2/3; 10 + (13 - 10) * 2/3 = 12
        assert!((series[1].value - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_ema_approaches_sma_as_period_grows() {
        let closes: Vec<f64> = (0..10).map(|i| 100.0 + i as f64).collect();
        let candles = make_candles(&closes);
        let sma = closes.iter().sum::<f64>() / closes.len() as f64;

        // On a linear ramp the gap between the last EMA value and the SMA
        // of the whole series shrinks as the period grows toward n.
        let gaps: Vec<f64> = [2, 5, 10]
            .iter()
            .map(|&p| (ema(&candles, p).last().unwrap().value - sma).abs())
            .collect();

        assert!(gaps[0] > gaps[1]);
        assert!(gaps[1] > gaps[2]);
        assert!(gaps[2] < 1.0);
    }

    #[test]
    fn test_ema_converges_to_constant() {
        let candles = make_candles(&[42.0; 50]);
        let series = ema(&candles, 14);
        assert!(series.iter().all(|p| (p.value - 42.0).abs() < 1e-12));
    }

    #[test]
    fn test_ema_empty_input() {
        assert!(ema(&[], 14).is_empty());
    }
}
