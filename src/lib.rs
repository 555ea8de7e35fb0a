//! contour-edit: control-point editing of 3D curve contours
//!
//! Takes a contour made of polyline, spline and arc segments, a selection of
//! its control points and a Move/Scale/Rotate transform, and produces a new,
//! topologically consistent contour.

pub mod geom;
pub mod precision;
pub mod settings;
pub mod curve;
pub mod brep;
pub mod heal;
pub mod check;
pub mod modify;
pub mod io;

// Re-exports for convenience
pub use geom::{Dir, Pnt, Vec3};
pub use curve::{Arc, Limit, Polyline, Segment, SegmentKind, Spline};
pub use brep::{Contour, Curve, SpaceInstance};
pub use heal::normalize_curve;
pub use check::{check_contour, ContourDefect};
pub use settings::EditSettings;
pub use modify::{
    ControlPointHandle, ControlPointInfo, ControlPointRef, ModifyContourPoints, PointLimit,
    PointTransform,
};

/// Tolerance for geometric comparisons
pub const TOLERANCE: f64 = precision::CONFUSION;

/// Result type for contour editing operations
pub type Result<T> = std::result::Result<T, EditError>;

#[derive(Debug, thiserror::Error)]
pub enum EditError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Transform is below the no-op threshold")]
    NoOp,

    #[error("{operation} is not supported on {kind:?} segments")]
    UnsupportedSegment {
        kind: SegmentKind,
        operation: &'static str,
    },

    #[error("Point index {index} out of range for segment {segment} ({len} points)")]
    PointIndexOutOfRange {
        segment: usize,
        index: usize,
        len: usize,
    },

    #[error("Segment index {segment} out of range ({len} segments)")]
    SegmentIndexOutOfRange { segment: usize, len: usize },

    #[error("Segment was modified and must be rebuilt before evaluation")]
    StaleSegment,

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Segment {segment} does not join the contour (gap = {gap:.3e})")]
    Discontinuity { segment: usize, gap: f64 },

    #[error("Segment {segment} is degenerate")]
    DegenerateSegment { segment: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Settings error: {0}")]
    Settings(#[from] toml::de::Error),
}

impl EditError {
    /// True for "nothing to do" results that callers should not report.
    pub fn is_no_op(&self) -> bool {
        matches!(self, EditError::NoOp)
    }

    /// True for broken-invariant errors that abort a calculation outright.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            EditError::UnsupportedSegment { .. }
                | EditError::PointIndexOutOfRange { .. }
                | EditError::SegmentIndexOutOfRange { .. }
                | EditError::StaleSegment
                | EditError::InvalidGeometry(_)
                | EditError::Discontinuity { .. }
                | EditError::DegenerateSegment { .. }
        )
    }
}
