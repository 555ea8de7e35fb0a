//! Segment mutator: applies target positions to working copies of segments.
//!
//! Mutations only mark segments dirty. The contour rebuilder recomputes each
//! dirty segment before it is read again.

use log::trace;

use super::control_point::{ControlPointInfo, PointLimit};
use crate::curve::{Limit, Segment, SegmentKind};
use crate::geom::Pnt;
use crate::{EditError, Result};

/// Replace an interior point of a point-based segment.
pub fn change_interior_point(
    segment: &mut Segment,
    segment_index: usize,
    point_index: usize,
    target: Pnt,
) -> Result<()> {
    let points = match &*segment {
        Segment::Polyline(p) => p.points(),
        Segment::Spline(s) => s.points(),
        Segment::Arc(_) => {
            return Err(EditError::UnsupportedSegment {
                kind: SegmentKind::Arc,
                operation: "change_interior_point",
            })
        }
    };
    if point_index >= points.len() {
        return Err(EditError::PointIndexOutOfRange {
            segment: segment_index,
            index: point_index,
            len: points.len(),
        });
    }

    trace!("segment {} point {} -> {:?}", segment_index, point_index, target);
    segment.change_point(point_index, target)
}

/// Move the start or end of a segment.
pub fn move_limit_point(
    segment: &mut Segment,
    segment_index: usize,
    limit: Limit,
    target: Pnt,
) -> Result<()> {
    trace!("segment {} {:?} -> {:?}", segment_index, limit, target);
    segment.set_limit_point(limit, target)
}

/// Apply `target` to the control point described by `info`, propagating
/// shared-endpoint moves so the contour does not tear.
///
/// - `Start` of segment *i* also moves `End` of the preceding segment,
///   wrapping to the last segment when the contour is closed.
/// - `End` moves only its own segment, except at the seam of a closed
///   contour where segment 0's `Start` follows.
pub fn apply_control_point(
    segments: &mut [Segment],
    closed: bool,
    info: &ControlPointInfo,
    target: Pnt,
) -> Result<()> {
    let count = segments.len();
    let i = info.segment_index;
    let segment = segments
        .get_mut(i)
        .ok_or(EditError::SegmentIndexOutOfRange { segment: i, len: count })?;

    match info.limit {
        PointLimit::Interior => change_interior_point(segment, i, info.index, target),
        PointLimit::Start => {
            move_limit_point(segment, i, Limit::Start, target)?;
            let previous = if i > 0 {
                Some(i - 1)
            } else if closed {
                Some(count - 1)
            } else {
                None
            };
            if let Some(p) = previous {
                trace!("propagating start of segment {} to end of segment {}", i, p);
                move_limit_point(&mut segments[p], p, Limit::End, target)?;
            }
            Ok(())
        }
        PointLimit::End => {
            move_limit_point(segment, i, Limit::End, target)?;
            if closed && i + 1 == count {
                trace!("propagating seam end of segment {} to start of segment 0", i);
                move_limit_point(&mut segments[0], 0, Limit::Start, target)?;
            }
            Ok(())
        }
    }
}
