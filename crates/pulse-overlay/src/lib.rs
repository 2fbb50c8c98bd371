//! Chart overlay lifecycle management.
//!
//! Reconciles a declarative "enabled indicators" snapshot against the live
//! chart surface's drawable-series handles: creates missing overlays,
//! disposes removed ones, rebuilds everything when the underlying candle
//! set changes, and tears down cleanly on drop.

pub mod manager;
pub mod surface;
pub mod toggles;

pub use manager::{
    KeyLevel, LevelKind, OverlayManager, PatternDirection, PatternMarker,
};
pub use surface::{ChartSurface, SeriesId, SeriesKind, SeriesSpec, SurfaceError};
pub use toggles::{IndicatorKind, IndicatorParams, IndicatorToggles, ToggleDiff};
