//! Price/oscillator divergence detection.
//!
//! A divergence is a disagreement between the direction of recent price
//! extrema and the direction of an oscillator's extrema at the same spot:
//! price printing a higher high while the oscillator prints a lower high
//! (bearish), or a lower price low against a higher oscillator low
//! (bullish).

use pulse_core::SeriesPoint;

/// Whether an extremum is a local high or a local low.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtremumKind {
    High,
    Low,
}

/// A confirmed local extremum in a series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtremumPoint {
    pub time: i64,
    pub value: f64,
    pub kind: ExtremumKind,
}

/// Divergence direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DivergenceKind {
    /// Price made a lower low while the oscillator made a higher low.
    Bullish,
    /// Price made a higher high while the oscillator made a lower high.
    Bearish,
}

/// A detected divergence event, anchored at the later price extremum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Divergence {
    pub kind: DivergenceKind,
    pub time: i64,
    pub price: f64,
    pub indicator: f64,
}

/// Find local extrema of one kind by strict neighbor comparison.
///
/// A point is a high when strictly greater than both immediate neighbors
/// (and a low when strictly smaller), so plateaus never register and the
/// boundary points are never extrema. Deliberately simple; not exhaustive
/// peak detection.
pub fn find_extrema(series: &[SeriesPoint], kind: ExtremumKind) -> Vec<ExtremumPoint> {
    if series.len() < 3 {
        return Vec::new();
    }

    let mut out = Vec::new();
    for window in series.windows(3) {
        let (prev, mid, next) = (window[0].value, window[1].value, window[2].value);
        let hit = match kind {
            ExtremumKind::High => mid > prev && mid > next,
            ExtremumKind::Low => mid < prev && mid < next,
        };
        if hit {
            out.push(ExtremumPoint {
                time: window[1].time,
                value: mid,
                kind,
            });
        }
    }

    out
}

/// Detect divergences between an index-aligned price and oscillator series.
///
/// Slides a window of `lookback + 1` positions across both series in
/// lock-step. In each window the two most recent highs (resp. lows) of
/// price and of the oscillator are compared: bearish when price's later
/// high exceeds its earlier one while the oscillator's later high is
/// lower, bullish mirrored on lows. Windows with fewer than two extrema of
/// the relevant kind in either series emit nothing.
///
/// Events from overlapping windows are not deduplicated; callers wanting
/// single-fire semantics should dedup by `time`.
pub fn detect_divergences(
    price: &[SeriesPoint],
    indicator: &[SeriesPoint],
    lookback: usize,
) -> Vec<Divergence> {
    let len = price.len().min(indicator.len());
    let window = lookback + 1;
    if lookback == 0 || len < window {
        return Vec::new();
    }

    let mut out = Vec::new();

    for start in 0..=len - window {
        let price_window = &price[start..start + window];
        let indicator_window = &indicator[start..start + window];

        for kind in [ExtremumKind::High, ExtremumKind::Low] {
            if let Some(event) = compare_window(price_window, indicator_window, kind) {
                out.push(event);
            }
        }
    }

    out
}

fn compare_window(
    price: &[SeriesPoint],
    indicator: &[SeriesPoint],
    kind: ExtremumKind,
) -> Option<Divergence> {
    let price_extrema = find_extrema(price, kind);
    let indicator_extrema = find_extrema(indicator, kind);
    if price_extrema.len() < 2 || indicator_extrema.len() < 2 {
        return None;
    }

    // The two most recent extrema of this kind in each series.
    let [p1, p2] = last_two(&price_extrema);
    let [i1, i2] = last_two(&indicator_extrema);

    let divergence_kind = match kind {
        ExtremumKind::High if p2.value > p1.value && i2.value < i1.value => {
            DivergenceKind::Bearish
        }
        ExtremumKind::Low if p2.value < p1.value && i2.value > i1.value => {
            DivergenceKind::Bullish
        }
        _ => return None,
    };

    Some(Divergence {
        kind: divergence_kind,
        time: p2.time,
        price: p2.value,
        indicator: i2.value,
    })
}

fn last_two(extrema: &[ExtremumPoint]) -> [ExtremumPoint; 2] {
    [extrema[extrema.len() - 2], extrema[extrema.len() - 1]]
}
