//! Contour and curve-instance data structures
//!
//! A [`Contour`] is an ordered chain of [`Segment`]s, optionally closed.
//! A [`SpaceInstance`] is the persisted item wrapping any [`Curve`]; only
//! instances whose curve is a contour can be edited point-wise.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::curve::{Arc, Limit, Polyline, Segment, Spline};
use crate::geom::Pnt;
use crate::{EditError, Result};

/// A connected sequence of segments
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Contour {
    segments: Vec<Segment>,
    closed: bool,
}

impl Contour {
    /// Create an empty, open contour.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap segments as-is. Use [`crate::check_contour`] to verify the joins.
    pub fn from_segments(segments: Vec<Segment>, closed: bool) -> Self {
        Self { segments, closed }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn segment(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    pub fn into_segments(self) -> Vec<Segment> {
        self.segments
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn start_point(&self) -> Option<Pnt> {
        self.segments.first().map(Segment::start_point)
    }

    pub fn end_point(&self) -> Option<Pnt> {
        self.segments.last().map(Segment::end_point)
    }

    /// Rebuild every dirty segment.
    pub fn rebuild_all(&mut self) -> Result<()> {
        for segment in self.segments.iter_mut().filter(|s| s.is_dirty()) {
            segment.rebuild()?;
        }
        Ok(())
    }

    /// Append a segment, joining it to the current end of the contour.
    ///
    /// - A start within `tolerance` of the current end is snapped onto it.
    /// - A wider gap is a [`EditError::Discontinuity`].
    /// - A segment whose extent is below `tolerance` is dropped when
    ///   `allow_degenerate` is set, otherwise [`EditError::DegenerateSegment`].
    pub fn append_with_ruled_check(
        &mut self,
        mut segment: Segment,
        tolerance: f64,
        allow_degenerate: bool,
    ) -> Result<()> {
        let index = self.segments.len();

        if segment.is_dirty() {
            return Err(EditError::StaleSegment);
        }

        if segment.is_degenerate(tolerance) {
            if allow_degenerate {
                warn!("Dropping degenerate {:?} segment at position {}", segment.kind(), index);
                return Ok(());
            }
            return Err(EditError::DegenerateSegment { segment: index });
        }

        if let Some(end) = self.end_point() {
            let start = segment.start_point();
            let gap = end.distance(&start);
            if gap > tolerance {
                return Err(EditError::Discontinuity { segment: index, gap });
            }
            if gap > 0.0 {
                debug!("Snapping segment {} start across gap {:.3e}", index, gap);
                segment.set_limit_point(Limit::Start, end)?;
                segment.rebuild()?;
            }
        }

        self.segments.push(segment);
        Ok(())
    }

    /// Close the contour, snapping the last end onto the first start when
    /// they lie within `tolerance`.
    pub fn close_with_ruled_check(&mut self, tolerance: f64) -> Result<()> {
        let (Some(start), Some(end)) = (self.start_point(), self.end_point()) else {
            return Err(EditError::Validation("cannot close an empty contour".into()));
        };

        let gap = end.distance(&start);
        if gap > tolerance {
            return Err(EditError::Discontinuity { segment: 0, gap });
        }
        if gap > 0.0 {
            debug!("Snapping contour seam across gap {:.3e}", gap);
            if let Some(last) = self.segments.last_mut() {
                last.set_limit_point(Limit::End, start)?;
                last.rebuild()?;
            }
        }

        self.closed = true;
        Ok(())
    }
}

/// Any curve a document can hold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Curve {
    Contour(Contour),
    Polyline(Polyline),
    Spline(Spline),
    Arc(Arc),
}

impl Curve {
    pub fn as_contour(&self) -> Option<&Contour> {
        match self {
            Curve::Contour(c) => Some(c),
            _ => None,
        }
    }

    /// Rebuild every dirty segment, e.g. after deserialization.
    pub fn rebuild_all(&mut self) -> Result<()> {
        match self {
            Curve::Contour(c) => c.rebuild_all(),
            Curve::Polyline(p) if p.is_dirty() => p.rebuild(),
            Curve::Spline(s) if s.is_dirty() => s.rebuild(),
            Curve::Arc(a) if a.is_dirty() => a.rebuild(),
            _ => Ok(()),
        }
    }

    /// Human-readable name of the curve kind
    pub fn type_name(&self) -> &'static str {
        match self {
            Curve::Contour(_) => "contour",
            Curve::Polyline(_) => "polyline",
            Curve::Spline(_) => "spline",
            Curve::Arc(_) => "arc",
        }
    }
}

impl From<Contour> for Curve {
    fn from(c: Contour) -> Self {
        Curve::Contour(c)
    }
}

impl From<Segment> for Curve {
    fn from(segment: Segment) -> Self {
        match segment {
            Segment::Polyline(p) => Curve::Polyline(p),
            Segment::Spline(s) => Curve::Spline(s),
            Segment::Arc(a) => Curve::Arc(a),
        }
    }
}

/// A persisted curve item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpaceInstance {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub curve: Curve,
}

impl SpaceInstance {
    pub fn new(curve: impl Into<Curve>) -> Self {
        Self {
            name: None,
            curve: curve.into(),
        }
    }

    pub fn named(name: impl Into<String>, curve: impl Into<Curve>) -> Self {
        Self {
            name: Some(name.into()),
            curve: curve.into(),
        }
    }
}
