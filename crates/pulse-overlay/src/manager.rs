//! Session-scoped reconciliation between toggle snapshots and live series
//! handles.

use std::collections::HashMap;

use pulse_core::{CandleStore, SeriesPoint};
use pulse_indicators::{bollinger, ema, macd, momentum, rsi, vpt, BollingerConfig, MacdConfig};

use crate::surface::{ChartSurface, SeriesId, SeriesSpec, SurfaceError};
use crate::toggles::{IndicatorKind, IndicatorParams, IndicatorToggles};

/// A horizontal support or resistance level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyLevel {
    pub price: f64,
    pub kind: LevelKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelKind {
    Support,
    Resistance,
}

impl LevelKind {
    pub fn label(&self) -> &'static str {
        match self {
            LevelKind::Support => "support",
            LevelKind::Resistance => "resistance",
        }
    }
}

/// A detected chart pattern, anchored at one candle.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternMarker {
    pub time: i64,
    pub name: String,
    pub direction: PatternDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternDirection {
    Bullish,
    Bearish,
    Neutral,
}

/// One chart's surface plus the handles currently alive on it.
///
/// The session is the only owner of [`SeriesId`]s; at most one live handle
/// exists per (kind, sub-series index).
struct ChartSession<S: ChartSurface> {
    surface: S,
    handles: HashMap<IndicatorKind, Vec<SeriesId>>,
}

impl<S: ChartSurface> ChartSession<S> {
    fn new(surface: S) -> Self {
        Self {
            surface,
            handles: HashMap::new(),
        }
    }

    /// Dispose every handle for one kind. A handle the surface no longer
    /// knows is treated as already disposed.
    fn dispose_kind(&mut self, kind: IndicatorKind) -> Result<(), SurfaceError> {
        for id in self.handles.remove(&kind).unwrap_or_default() {
            match self.surface.remove_series(id) {
                Ok(()) | Err(SurfaceError::UnknownHandle(_)) => {}
                Err(err) => return Err(err),
            }
        }
        Ok(())
    }

    fn dispose_all(&mut self) -> Result<(), SurfaceError> {
        for &kind in IndicatorKind::all() {
            self.dispose_kind(kind)?;
        }
        Ok(())
    }

    /// Create every sub-series of one kind. All or nothing: when one
    /// creation fails, the sub-series created before it are disposed again
    /// so no handle outlives the session's bookkeeping.
    fn install(&mut self, kind: IndicatorKind, specs: &[SeriesSpec]) -> Result<(), SurfaceError> {
        let mut ids = Vec::with_capacity(specs.len());
        for spec in specs {
            match self.surface.add_series(spec) {
                Ok(id) => ids.push(id),
                Err(err) => {
                    for id in ids {
                        match self.surface.remove_series(id) {
                            Ok(()) | Err(SurfaceError::UnknownHandle(_)) => {}
                            Err(rollback_err) => return Err(rollback_err),
                        }
                    }
                    return Err(err);
                }
            }
        }
        if !ids.is_empty() {
            self.handles.insert(kind, ids);
        }
        Ok(())
    }

    fn live_handles(&self, kind: IndicatorKind) -> usize {
        self.handles.get(&kind).map(Vec::len).unwrap_or(0)
    }
}

/// Reconciles toggle snapshots against the chart surface.
///
/// `render` compares the store generation and the toggle snapshot against
/// what was last rendered: a generation change rebuilds every enabled
/// overlay from scratch, a toggle change applies the diff (removals before
/// additions), and identical inputs touch the surface not at all.
pub struct OverlayManager<S: ChartSurface> {
    session: ChartSession<S>,
    last_generation: Option<u64>,
    last_toggles: Option<IndicatorToggles>,
    key_levels: Vec<KeyLevel>,
    patterns: Vec<PatternMarker>,
    aux_dirty: bool,
}

impl<S: ChartSurface> OverlayManager<S> {
    pub fn new(surface: S) -> Self {
        Self {
            session: ChartSession::new(surface),
            last_generation: None,
            last_toggles: None,
            key_levels: Vec::new(),
            patterns: Vec::new(),
            aux_dirty: false,
        }
    }

    /// Replace the support/resistance levels drawn when
    /// [`IndicatorKind::KeyLevels`] is enabled. Takes effect on the next
    /// render.
    pub fn set_key_levels(&mut self, levels: Vec<KeyLevel>) {
        self.key_levels = levels;
        self.aux_dirty = true;
    }

    /// Replace the pattern markers drawn when [`IndicatorKind::Patterns`]
    /// is enabled. Takes effect on the next render.
    pub fn set_patterns(&mut self, patterns: Vec<PatternMarker>) {
        self.patterns = patterns;
        self.aux_dirty = true;
    }

    /// Reconcile the surface with the given store and toggle snapshot.
    pub fn render(
        &mut self,
        store: &CandleStore,
        toggles: &IndicatorToggles,
    ) -> Result<(), SurfaceError> {
        let generation = store.generation();
        let data_changed = self.last_generation != Some(generation);

        if data_changed {
            // New candle set: every cached series is stale.
            self.session.dispose_all()?;
            for &kind in IndicatorKind::all() {
                if toggles.is_enabled(kind) {
                    self.create_kind(kind, store, toggles)?;
                }
            }
        } else if let Some(prev) = self.last_toggles.clone() {
            let mut diff = prev.diff(toggles);
            if self.aux_dirty {
                for kind in [IndicatorKind::Patterns, IndicatorKind::KeyLevels] {
                    if toggles.is_enabled(kind) && !diff.to_add.contains(&kind) {
                        diff.to_remove.push(kind);
                        diff.to_add.push(kind);
                    }
                }
            }
            // Dispose before create.
            for kind in diff.to_remove {
                self.session.dispose_kind(kind)?;
            }
            for kind in diff.to_add {
                self.create_kind(kind, store, toggles)?;
            }
        }

        self.last_generation = Some(generation);
        self.last_toggles = Some(toggles.clone());
        self.aux_dirty = false;
        Ok(())
    }

    /// Geometry change only; no series is recomputed or recreated.
    pub fn notify_resize(&mut self, width: u32, height: u32) {
        self.session.surface.resize(width, height);
    }

    /// Dispose every live handle and forget the rendered state.
    pub fn teardown(&mut self) -> Result<(), SurfaceError> {
        self.session.dispose_all()?;
        self.last_generation = None;
        self.last_toggles = None;
        Ok(())
    }

    /// Number of live handles for one kind. Zero when disabled or never
    /// rendered.
    pub fn live_handles(&self, kind: IndicatorKind) -> usize {
        self.session.live_handles(kind)
    }

    fn create_kind(
        &mut self,
        kind: IndicatorKind,
        store: &CandleStore,
        toggles: &IndicatorToggles,
    ) -> Result<(), SurfaceError> {
        let specs = self.build_specs(kind, store, &toggles.params);
        self.session.install(kind, &specs)
    }

    fn build_specs(
        &self,
        kind: IndicatorKind,
        store: &CandleStore,
        params: &IndicatorParams,
    ) -> Vec<SeriesSpec> {
        let candles = store.candles();

        match kind {
            IndicatorKind::EmaFast => single_line(
                format!("EMA {}", params.ema_fast),
                ema(candles, params.ema_fast),
            ),
            IndicatorKind::EmaMid => single_line(
                format!("EMA {}", params.ema_mid),
                ema(candles, params.ema_mid),
            ),
            IndicatorKind::EmaSlow => single_line(
                format!("EMA {}", params.ema_slow),
                ema(candles, params.ema_slow),
            ),
            IndicatorKind::Rsi => single_line(
                format!("RSI {}", params.rsi_length),
                rsi(candles, params.rsi_length),
            ),
            IndicatorKind::Momentum => single_line(
                format!("Momentum {}", params.momentum_period),
                momentum(candles, params.momentum_period),
            ),
            IndicatorKind::Vpt => single_line("VPT".to_string(), vpt(candles)),
            IndicatorKind::Macd => {
                let points = macd(candles, MacdConfig::default());
                if points.is_empty() {
                    return Vec::new();
                }
                let line = |f: fn(&pulse_core::MacdPoint) -> f64| -> Vec<SeriesPoint> {
                    points.iter().map(|p| SeriesPoint::new(p.time, f(p))).collect()
                };
                vec![
                    SeriesSpec::line("MACD", line(|p| p.macd)),
                    SeriesSpec::line("MACD signal", line(|p| p.signal)),
                    SeriesSpec::histogram("MACD histogram", line(|p| p.histogram)),
                ]
            }
            IndicatorKind::Bollinger => {
                let config = BollingerConfig {
                    period: params.bollinger_period,
                    multiplier: params.bollinger_multiplier,
                };
                let points = bollinger(candles, config);
                if points.is_empty() {
                    return Vec::new();
                }
                let line = |f: fn(&pulse_core::BollingerPoint) -> f64| -> Vec<SeriesPoint> {
                    points.iter().map(|p| SeriesPoint::new(p.time, f(p))).collect()
                };
                vec![
                    SeriesSpec::line("BB upper", line(|p| p.upper)),
                    SeriesSpec::line("BB middle", line(|p| p.middle)),
                    SeriesSpec::line("BB lower", line(|p| p.lower)),
                ]
            }
            IndicatorKind::Volume => {
                let points: Vec<SeriesPoint> = candles
                    .iter()
                    .map(|c| SeriesPoint::new(c.time, c.volume))
                    .collect();
                if points.is_empty() {
                    Vec::new()
                } else {
                    vec![SeriesSpec::histogram("Volume", points)]
                }
            }
            IndicatorKind::KeyLevels => {
                let (Some(first), Some(last)) = (candles.first(), candles.last()) else {
                    return Vec::new();
                };
                self.key_levels
                    .iter()
                    .map(|level| {
                        SeriesSpec::line(
                            format!("{} {}", level.kind.label(), level.price),
                            vec![
                                SeriesPoint::new(first.time, level.price),
                                SeriesPoint::new(last.time, level.price),
                            ],
                        )
                    })
                    .collect()
            }
            IndicatorKind::Patterns => self
                .patterns
                .iter()
                .filter_map(|pattern| {
                    let candle = candles.iter().find(|c| c.time == pattern.time)?;
                    Some(SeriesSpec::line(
                        pattern.name.clone(),
                        vec![SeriesPoint::new(pattern.time, candle.close)],
                    ))
                })
                .collect(),
        }
    }
}

impl<S: ChartSurface> Drop for OverlayManager<S> {
    fn drop(&mut self) {
        let _ = self.teardown();
    }
}

fn single_line(label: String, points: Vec<SeriesPoint>) -> Vec<SeriesSpec> {
    if points.is_empty() {
        Vec::new()
    } else {
        vec![SeriesSpec::line(label, points)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_core::{Candle, Timeframe};
    use std::cell::RefCell;
    use std::collections::HashSet;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Add(String),
        Remove(SeriesId),
        Resize(u32, u32),
    }

    #[derive(Default)]
    struct MockState {
        calls: Vec<Call>,
        live: HashSet<SeriesId>,
        next_id: u64,
        fail_add_at: Option<u64>,
    }

    /// Records every surface call; shared so tests can inspect it after
    /// the manager takes ownership of the surface.
    #[derive(Clone, Default)]
    struct MockSurface {
        state: Rc<RefCell<MockState>>,
    }

    impl MockSurface {
        fn calls(&self) -> Vec<Call> {
            self.state.borrow().calls.clone()
        }

        fn live_count(&self) -> usize {
            self.state.borrow().live.len()
        }

        fn clear_calls(&self) {
            self.state.borrow_mut().calls.clear();
        }

        /// Simulate the chart dropping a handle behind the manager's back.
        fn forget(&self, id: SeriesId) {
            self.state.borrow_mut().live.remove(&id);
        }
    }

    impl ChartSurface for MockSurface {
        fn add_series(&mut self, spec: &SeriesSpec) -> Result<SeriesId, SurfaceError> {
            let mut state = self.state.borrow_mut();
            if state.fail_add_at == Some(state.next_id) {
                return Err(SurfaceError::Creation {
                    label: spec.label.clone(),
                    reason: "backend rejected series".into(),
                });
            }
            let id = SeriesId(state.next_id);
            state.next_id += 1;
            state.live.insert(id);
            state.calls.push(Call::Add(spec.label.clone()));
            Ok(id)
        }

        fn remove_series(&mut self, id: SeriesId) -> Result<(), SurfaceError> {
            let mut state = self.state.borrow_mut();
            state.calls.push(Call::Remove(id));
            if state.live.remove(&id) {
                Ok(())
            } else {
                Err(SurfaceError::UnknownHandle(id))
            }
        }

        fn resize(&mut self, width: u32, height: u32) {
            self.state.borrow_mut().calls.push(Call::Resize(width, height));
        }
    }

    fn store_with_candles(count: usize) -> CandleStore {
        let mut store = CandleStore::new("BTCUSDT", Timeframe::Hour1);
        let ticket = store.begin_switch("BTCUSDT", Timeframe::Hour1);
        let candles: Vec<Candle> = (0..count)
            .map(|i| {
                let base = 100.0 + (i as f64 * 0.4).sin() * 10.0;
                Candle::new(i as i64 * 3600, base, base + 1.0, base - 1.0, base + 0.5, 100.0)
            })
            .collect();
        assert!(store.publish(ticket, candles));
        store
    }

    #[test]
    fn test_render_creates_enabled_overlays() {
        let surface = MockSurface::default();
        let mut manager = OverlayManager::new(surface.clone());
        let store = store_with_candles(60);

        let mut toggles = IndicatorToggles::new();
        toggles
            .enable(IndicatorKind::Rsi)
            .enable(IndicatorKind::Macd)
            .enable(IndicatorKind::Bollinger)
            .enable(IndicatorKind::Volume);

        manager.render(&store, &toggles).unwrap();

        assert_eq!(manager.live_handles(IndicatorKind::Rsi), 1);
        assert_eq!(manager.live_handles(IndicatorKind::Macd), 3);
        assert_eq!(manager.live_handles(IndicatorKind::Bollinger), 3);
        assert_eq!(manager.live_handles(IndicatorKind::Volume), 1);
        assert_eq!(surface.live_count(), 8);
    }

    #[test]
    fn test_render_is_idempotent() {
        let surface = MockSurface::default();
        let mut manager = OverlayManager::new(surface.clone());
        let store = store_with_candles(60);

        let mut toggles = IndicatorToggles::new();
        toggles.enable(IndicatorKind::Rsi);

        manager.render(&store, &toggles).unwrap();
        surface.clear_calls();

        manager.render(&store, &toggles).unwrap();
        assert!(surface.calls().is_empty());
    }

    #[test]
    fn test_enable_then_disable_leaves_no_handles() {
        let surface = MockSurface::default();
        let mut manager = OverlayManager::new(surface.clone());
        let store = store_with_candles(60);

        let base = IndicatorToggles::new();
        manager.render(&store, &base).unwrap();

        // Toggled on and back off between renders: the snapshot the next
        // render sees is identical to the previous one.
        let mut churned = base.clone();
        churned.enable(IndicatorKind::Rsi).disable(IndicatorKind::Rsi);
        surface.clear_calls();
        manager.render(&store, &churned).unwrap();

        assert_eq!(manager.live_handles(IndicatorKind::Rsi), 0);
        assert!(surface.calls().is_empty());
    }

    #[test]
    fn test_toggle_diff_removes_before_adding() {
        let surface = MockSurface::default();
        let mut manager = OverlayManager::new(surface.clone());
        let store = store_with_candles(60);

        let mut prev = IndicatorToggles::new();
        prev.enable(IndicatorKind::Rsi);
        manager.render(&store, &prev).unwrap();

        let mut next = IndicatorToggles::new();
        next.enable(IndicatorKind::Momentum);
        surface.clear_calls();
        manager.render(&store, &next).unwrap();

        let calls = surface.calls();
        assert!(matches!(calls[0], Call::Remove(_)));
        assert!(matches!(calls[1], Call::Add(_)));
        assert_eq!(manager.live_handles(IndicatorKind::Rsi), 0);
        assert_eq!(manager.live_handles(IndicatorKind::Momentum), 1);
    }

    #[test]
    fn test_param_change_recreates_series() {
        let surface = MockSurface::default();
        let mut manager = OverlayManager::new(surface.clone());
        let store = store_with_candles(60);

        let mut prev = IndicatorToggles::new();
        prev.enable(IndicatorKind::Rsi);
        manager.render(&store, &prev).unwrap();

        let mut next = prev.clone();
        next.params.rsi_length = 21;
        surface.clear_calls();
        manager.render(&store, &next).unwrap();

        let calls = surface.calls();
        assert_eq!(calls.len(), 2);
        assert!(matches!(calls[0], Call::Remove(_)));
        assert_eq!(calls[1], Call::Add("RSI 21".to_string()));
        assert_eq!(manager.live_handles(IndicatorKind::Rsi), 1);
    }

    #[test]
    fn test_generation_change_rebuilds_everything() {
        let surface = MockSurface::default();
        let mut manager = OverlayManager::new(surface.clone());
        let mut store = store_with_candles(60);

        let mut toggles = IndicatorToggles::new();
        toggles.enable(IndicatorKind::Rsi).enable(IndicatorKind::Volume);
        manager.render(&store, &toggles).unwrap();

        let ticket = store.begin_switch("ETHUSDT", Timeframe::Min15);
        let candles: Vec<Candle> = (0..40)
            .map(|i| Candle::new(i as i64 * 900, 10.0, 11.0, 9.0, 10.5, 50.0))
            .collect();
        assert!(store.publish(ticket, candles));

        surface.clear_calls();
        manager.render(&store, &toggles).unwrap();

        let calls = surface.calls();
        let removes = calls.iter().filter(|c| matches!(c, Call::Remove(_))).count();
        let adds = calls.iter().filter(|c| matches!(c, Call::Add(_))).count();
        assert_eq!(removes, 2);
        assert_eq!(adds, 2);
        assert_eq!(surface.live_count(), 2);
    }

    #[test]
    fn test_double_dispose_is_noop() {
        let surface = MockSurface::default();
        let mut manager = OverlayManager::new(surface.clone());
        let store = store_with_candles(60);

        let mut toggles = IndicatorToggles::new();
        toggles.enable(IndicatorKind::Rsi);
        manager.render(&store, &toggles).unwrap();

        // The chart already dropped the handle; teardown must swallow the
        // unknown-handle error, and tearing down twice never errors.
        let state = surface.state.borrow().live.iter().copied().collect::<Vec<_>>();
        for id in state {
            surface.forget(id);
        }
        manager.teardown().unwrap();
        manager.teardown().unwrap();
        assert_eq!(manager.live_handles(IndicatorKind::Rsi), 0);
    }

    #[test]
    fn test_failed_multi_series_install_leaves_no_handles() {
        let surface = MockSurface::default();
        // MACD creates three sub-series; the second creation fails.
        surface.state.borrow_mut().fail_add_at = Some(1);
        let mut manager = OverlayManager::new(surface.clone());
        let store = store_with_candles(60);

        let mut toggles = IndicatorToggles::new();
        toggles.enable(IndicatorKind::Macd);

        assert!(manager.render(&store, &toggles).is_err());
        // The sub-series created before the failure was disposed again.
        assert_eq!(surface.live_count(), 0);
        assert_eq!(manager.live_handles(IndicatorKind::Macd), 0);

        manager.teardown().unwrap();
        assert_eq!(surface.live_count(), 0);
    }

    #[test]
    fn test_resize_touches_geometry_only() {
        let surface = MockSurface::default();
        let mut manager = OverlayManager::new(surface.clone());

        manager.notify_resize(800, 600);
        assert_eq!(surface.calls(), vec![Call::Resize(800, 600)]);
    }

    #[test]
    fn test_key_levels_render_and_refresh() {
        let surface = MockSurface::default();
        let mut manager = OverlayManager::new(surface.clone());
        let store = store_with_candles(60);

        let mut toggles = IndicatorToggles::new();
        toggles.enable(IndicatorKind::KeyLevels);

        manager.set_key_levels(vec![
            KeyLevel { price: 95.0, kind: LevelKind::Support },
            KeyLevel { price: 115.0, kind: LevelKind::Resistance },
        ]);
        manager.render(&store, &toggles).unwrap();
        assert_eq!(manager.live_handles(IndicatorKind::KeyLevels), 2);

        // New level data re-applies on the next render without a toggle
        // change.
        manager.set_key_levels(vec![KeyLevel { price: 90.0, kind: LevelKind::Support }]);
        manager.render(&store, &toggles).unwrap();
        assert_eq!(manager.live_handles(IndicatorKind::KeyLevels), 1);
    }

    #[test]
    fn test_empty_store_creates_no_handles() {
        let surface = MockSurface::default();
        let mut manager = OverlayManager::new(surface.clone());
        let store = CandleStore::new("BTCUSDT", Timeframe::Hour1);

        let mut toggles = IndicatorToggles::new();
        toggles.enable(IndicatorKind::Rsi).enable(IndicatorKind::Volume);
        manager.render(&store, &toggles).unwrap();

        assert_eq!(surface.live_count(), 0);
    }
}
