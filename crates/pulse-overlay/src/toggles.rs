//! Indicator toggle snapshots and diffing.

use std::collections::BTreeSet;

/// Every overlay the dashboard can toggle on or off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IndicatorKind {
    EmaFast,
    EmaMid,
    EmaSlow,
    Bollinger,
    Rsi,
    Macd,
    Momentum,
    Vpt,
    Volume,
    Patterns,
    KeyLevels,
}

impl IndicatorKind {
    pub fn all() -> &'static [IndicatorKind] {
        &[
            IndicatorKind::EmaFast,
            IndicatorKind::EmaMid,
            IndicatorKind::EmaSlow,
            IndicatorKind::Bollinger,
            IndicatorKind::Rsi,
            IndicatorKind::Macd,
            IndicatorKind::Momentum,
            IndicatorKind::Vpt,
            IndicatorKind::Volume,
            IndicatorKind::Patterns,
            IndicatorKind::KeyLevels,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            IndicatorKind::EmaFast => "ema_fast",
            IndicatorKind::EmaMid => "ema_mid",
            IndicatorKind::EmaSlow => "ema_slow",
            IndicatorKind::Bollinger => "bollinger",
            IndicatorKind::Rsi => "rsi",
            IndicatorKind::Macd => "macd",
            IndicatorKind::Momentum => "momentum",
            IndicatorKind::Vpt => "vpt",
            IndicatorKind::Volume => "volume",
            IndicatorKind::Patterns => "patterns",
            IndicatorKind::KeyLevels => "key_levels",
        }
    }
}

/// Numeric parameters for the parameterized indicators.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorParams {
    pub rsi_length: usize,
    pub ema_fast: usize,
    pub ema_mid: usize,
    pub ema_slow: usize,
    pub bollinger_period: usize,
    pub bollinger_multiplier: f64,
    pub momentum_period: usize,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            rsi_length: 14,
            ema_fast: 21,
            ema_mid: 50,
            ema_slow: 200,
            bollinger_period: 20,
            bollinger_multiplier: 2.0,
            momentum_period: 10,
        }
    }
}

/// An immutable snapshot of which overlays are enabled, plus their
/// parameters. The overlay manager compares snapshots between renders;
/// it never mutates one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IndicatorToggles {
    enabled: BTreeSet<IndicatorKind>,
    pub params: IndicatorParams,
}

impl IndicatorToggles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enable(&mut self, kind: IndicatorKind) -> &mut Self {
        self.enabled.insert(kind);
        self
    }

    pub fn disable(&mut self, kind: IndicatorKind) -> &mut Self {
        self.enabled.remove(&kind);
        self
    }

    pub fn is_enabled(&self, kind: IndicatorKind) -> bool {
        self.enabled.contains(&kind)
    }

    pub fn enabled(&self) -> impl Iterator<Item = IndicatorKind> + '_ {
        self.enabled.iter().copied()
    }

    /// Compare this snapshot against the next one.
    ///
    /// Newly disabled kinds land in `to_remove`, newly enabled kinds in
    /// `to_add`. A kind that stays enabled but whose parameters changed
    /// lands in both, so the caller disposes and recreates rather than
    /// mutating in place.
    pub fn diff(&self, next: &IndicatorToggles) -> ToggleDiff {
        let mut diff = ToggleDiff::default();

        for &kind in IndicatorKind::all() {
            let was = self.is_enabled(kind);
            let is = next.is_enabled(kind);

            match (was, is) {
                (true, false) => diff.to_remove.push(kind),
                (false, true) => diff.to_add.push(kind),
                (true, true) if params_changed(kind, &self.params, &next.params) => {
                    diff.to_remove.push(kind);
                    diff.to_add.push(kind);
                }
                _ => {}
            }
        }

        diff
    }
}

/// The reconciliation plan between two toggle snapshots. Removals are
/// applied before additions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToggleDiff {
    pub to_remove: Vec<IndicatorKind>,
    pub to_add: Vec<IndicatorKind>,
}

impl ToggleDiff {
    pub fn is_empty(&self) -> bool {
        self.to_remove.is_empty() && self.to_add.is_empty()
    }
}

fn params_changed(kind: IndicatorKind, prev: &IndicatorParams, next: &IndicatorParams) -> bool {
    match kind {
        IndicatorKind::Rsi => prev.rsi_length != next.rsi_length,
        IndicatorKind::EmaFast => prev.ema_fast != next.ema_fast,
        IndicatorKind::EmaMid => prev.ema_mid != next.ema_mid,
        IndicatorKind::EmaSlow => prev.ema_slow != next.ema_slow,
        IndicatorKind::Bollinger => {
            prev.bollinger_period != next.bollinger_period
                || prev.bollinger_multiplier != next.bollinger_multiplier
        }
        IndicatorKind::Momentum => prev.momentum_period != next.momentum_period,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diff_enable_and_disable() {
        let mut prev = IndicatorToggles::new();
        prev.enable(IndicatorKind::Rsi);

        let mut next = IndicatorToggles::new();
        next.enable(IndicatorKind::Momentum);

        let diff = prev.diff(&next);
        assert_eq!(diff.to_remove, vec![IndicatorKind::Rsi]);
        assert_eq!(diff.to_add, vec![IndicatorKind::Momentum]);
    }

    #[test]
    fn test_diff_identical_is_empty() {
        let mut toggles = IndicatorToggles::new();
        toggles.enable(IndicatorKind::Rsi).enable(IndicatorKind::Macd);
        assert!(toggles.diff(&toggles.clone()).is_empty());
    }

    #[test]
    fn test_diff_param_change_means_recreate() {
        let mut prev = IndicatorToggles::new();
        prev.enable(IndicatorKind::Rsi);

        let mut next = prev.clone();
        next.params.rsi_length = 21;

        let diff = prev.diff(&next);
        assert_eq!(diff.to_remove, vec![IndicatorKind::Rsi]);
        assert_eq!(diff.to_add, vec![IndicatorKind::Rsi]);
    }

    #[test]
    fn test_diff_param_change_on_disabled_kind_is_noop() {
        let prev = IndicatorToggles::new();
        let mut next = prev.clone();
        next.params.rsi_length = 21;
        assert!(prev.diff(&next).is_empty());
    }

    #[test]
    fn test_enable_then_disable_cancels_out() {
        let base = IndicatorToggles::new();
        let mut churned = base.clone();
        churned.enable(IndicatorKind::Rsi).disable(IndicatorKind::Rsi);
        assert!(base.diff(&churned).is_empty());
    }
}
