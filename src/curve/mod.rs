//! Curve segments that make up a contour
//!
//! A segment is one of three kinds, each with its own addressable-point model:
//! - [`Polyline`]: every vertex is addressable
//! - [`Spline`]: every control point is addressable
//! - [`Arc`]: only the two limit points are addressable
//!
//! Point mutations leave a segment dirty. A dirty segment still reports its
//! limit points, but evaluation fails with [`EditError::StaleSegment`] until
//! [`Segment::rebuild`] recomputes the parametrization.

mod arc;
mod polyline;
mod spline;

pub use arc::Arc;
pub use polyline::Polyline;
pub use spline::Spline;

use serde::{Deserialize, Serialize};

use crate::geom::Pnt;
use crate::{EditError, Result};

/// Discriminant of [`Segment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SegmentKind {
    Polyline,
    Spline,
    Arc,
}

/// One end of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Limit {
    Start,
    End,
}

/// A single curve piece of a contour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Segment {
    Polyline(Polyline),
    Spline(Spline),
    Arc(Arc),
}

impl Segment {
    pub fn kind(&self) -> SegmentKind {
        match self {
            Segment::Polyline(_) => SegmentKind::Polyline,
            Segment::Spline(_) => SegmentKind::Spline,
            Segment::Arc(_) => SegmentKind::Arc,
        }
    }

    pub fn start_point(&self) -> Pnt {
        match self {
            Segment::Polyline(p) => p.start_point(),
            Segment::Spline(s) => s.start_point(),
            Segment::Arc(a) => a.start_point(),
        }
    }

    pub fn end_point(&self) -> Pnt {
        match self {
            Segment::Polyline(p) => p.end_point(),
            Segment::Spline(s) => s.end_point(),
            Segment::Arc(a) => a.end_point(),
        }
    }

    /// Position of the given limit point.
    pub fn limit_point(&self, limit: Limit) -> Pnt {
        match limit {
            Limit::Start => self.start_point(),
            Limit::End => self.end_point(),
        }
    }

    /// Number of caller-addressable points, limit points included.
    pub fn point_count(&self) -> usize {
        match self {
            Segment::Polyline(p) => p.points().len(),
            Segment::Spline(s) => s.points().len(),
            Segment::Arc(_) => 2,
        }
    }

    /// Addressable points of a point-based segment; `None` for arcs.
    pub fn points(&self) -> Option<&[Pnt]> {
        match self {
            Segment::Polyline(p) => Some(p.points()),
            Segment::Spline(s) => Some(s.points()),
            Segment::Arc(_) => None,
        }
    }

    /// Replace the point at `index`. Arcs have no addressable points.
    pub fn change_point(&mut self, index: usize, point: Pnt) -> Result<()> {
        match self {
            Segment::Polyline(p) => p.change_point(index, point),
            Segment::Spline(s) => s.change_point(index, point),
            Segment::Arc(_) => Err(EditError::UnsupportedSegment {
                kind: SegmentKind::Arc,
                operation: "change_point",
            }),
        }
    }

    /// Move one limit point.
    pub fn set_limit_point(&mut self, limit: Limit, point: Pnt) -> Result<()> {
        match self {
            Segment::Polyline(p) => {
                let index = limit_index(limit, p.points().len());
                p.change_point(index, point)
            }
            Segment::Spline(s) => {
                let index = limit_index(limit, s.points().len());
                s.change_point(index, point)
            }
            Segment::Arc(a) => {
                a.set_limit_point(limit, point);
                Ok(())
            }
        }
    }

    /// Recompute the internal parametrization after point edits.
    pub fn rebuild(&mut self) -> Result<()> {
        match self {
            Segment::Polyline(p) => p.rebuild(),
            Segment::Spline(s) => s.rebuild(),
            Segment::Arc(a) => a.rebuild(),
        }
    }

    pub fn is_dirty(&self) -> bool {
        match self {
            Segment::Polyline(p) => p.is_dirty(),
            Segment::Spline(s) => s.is_dirty(),
            Segment::Arc(a) => a.is_dirty(),
        }
    }

    /// Evaluate at normalized parameter t ∈ [0, 1].
    pub fn point_at(&self, t: f64) -> Result<Pnt> {
        match self {
            Segment::Polyline(p) => p.point_at(t),
            Segment::Spline(s) => s.point_at(t),
            Segment::Arc(a) => a.point_at(t),
        }
    }

    pub fn length(&self) -> Result<f64> {
        match self {
            Segment::Polyline(p) => p.length(),
            Segment::Spline(s) => s.length(),
            Segment::Arc(a) => a.length(),
        }
    }

    /// True when every defining point lies within `tolerance` of the start.
    pub fn is_degenerate(&self, tolerance: f64) -> bool {
        let start = self.start_point();
        let defining: Vec<Pnt> = match self {
            Segment::Polyline(p) => p.points().to_vec(),
            Segment::Spline(s) => s.points().to_vec(),
            Segment::Arc(a) => vec![a.start_point(), a.through_point(), a.end_point()],
        };
        defining.iter().all(|p| p.is_equal(&start, tolerance))
    }
}

impl From<Polyline> for Segment {
    fn from(p: Polyline) -> Self {
        Segment::Polyline(p)
    }
}

impl From<Spline> for Segment {
    fn from(s: Spline) -> Self {
        Segment::Spline(s)
    }
}

impl From<Arc> for Segment {
    fn from(a: Arc) -> Self {
        Segment::Arc(a)
    }
}

fn limit_index(limit: Limit, len: usize) -> usize {
    match limit {
        Limit::Start => 0,
        Limit::End => len.saturating_sub(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn square_polyline() -> Segment {
        Polyline::new(vec![
            Pnt::new(0.0, 0.0, 0.0),
            Pnt::new(1.0, 0.0, 0.0),
            Pnt::new(1.0, 1.0, 0.0),
        ])
        .unwrap()
        .into()
    }

    #[test]
    fn test_point_count_per_kind() {
        let arc = Arc::through_points(
            Pnt::new(1.0, 0.0, 0.0),
            Pnt::new(0.0, 1.0, 0.0),
            Pnt::new(-1.0, 0.0, 0.0),
        )
        .unwrap();
        assert_eq!(square_polyline().point_count(), 3);
        assert_eq!(Segment::from(arc).point_count(), 2);
    }

    #[test]
    fn test_arc_rejects_change_point() {
        let mut arc: Segment = Arc::through_points(
            Pnt::new(1.0, 0.0, 0.0),
            Pnt::new(0.0, 1.0, 0.0),
            Pnt::new(-1.0, 0.0, 0.0),
        )
        .unwrap()
        .into();
        let err = arc.change_point(0, Pnt::origin()).unwrap_err();
        assert!(matches!(
            err,
            EditError::UnsupportedSegment { kind: SegmentKind::Arc, .. }
        ));
    }

    #[test]
    fn test_set_limit_point_on_polyline_end() {
        let mut seg = square_polyline();
        seg.set_limit_point(Limit::End, Pnt::new(2.0, 2.0, 0.0)).unwrap();
        assert_eq!(seg.end_point(), Pnt::new(2.0, 2.0, 0.0));
        assert_eq!(seg.start_point(), Pnt::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_dirty_until_rebuilt() {
        let mut seg = square_polyline();
        assert!(!seg.is_dirty());
        seg.change_point(1, Pnt::new(2.0, 0.0, 0.0)).unwrap();
        assert!(seg.is_dirty());
        assert!(matches!(seg.point_at(0.5), Err(EditError::StaleSegment)));
        // Limit points stay readable while dirty
        assert_eq!(seg.start_point(), Pnt::origin());
        seg.rebuild().unwrap();
        assert!(!seg.is_dirty());
        assert_abs_diff_eq!(seg.length().unwrap(), 2.0 + 2.0_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_degenerate_detection() {
        let seg: Segment = Polyline::new(vec![Pnt::origin(), Pnt::new(1e-9, 0.0, 0.0)])
            .unwrap()
            .into();
        assert!(seg.is_degenerate(1e-5));
        assert!(!square_polyline().is_degenerate(1e-5));
    }
}
