//! The drawing-surface abstraction the overlay manager renders onto.

use pulse_core::SeriesPoint;
use thiserror::Error;

/// Opaque handle for one drawable overlay series on a chart surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeriesId(pub u64);

/// How a series is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    Line,
    Histogram,
}

/// Everything a surface needs to materialize one overlay series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSpec {
    pub label: String,
    pub kind: SeriesKind,
    pub points: Vec<SeriesPoint>,
}

impl SeriesSpec {
    pub fn line(label: impl Into<String>, points: Vec<SeriesPoint>) -> Self {
        Self {
            label: label.into(),
            kind: SeriesKind::Line,
            points,
        }
    }

    pub fn histogram(label: impl Into<String>, points: Vec<SeriesPoint>) -> Self {
        Self {
            label: label.into(),
            kind: SeriesKind::Histogram,
            points,
        }
    }
}

/// Errors a chart surface can report.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("failed to create series '{label}': {reason}")]
    Creation { label: String, reason: String },
    #[error("unknown series handle {0:?}")]
    UnknownHandle(SeriesId),
}

/// A chart backend capable of holding overlay series.
///
/// Handle ownership stays with the caller: the surface hands out a
/// [`SeriesId`] per created series and forgets it on removal. Removing an
/// unknown handle reports [`SurfaceError::UnknownHandle`]; the overlay
/// manager treats that as an already-disposed series and moves on.
pub trait ChartSurface {
    fn add_series(&mut self, spec: &SeriesSpec) -> Result<SeriesId, SurfaceError>;

    fn remove_series(&mut self, id: SeriesId) -> Result<(), SurfaceError>;

    /// Geometry-only notification; must not trigger recomputation.
    fn resize(&mut self, width: u32, height: u32);
}
