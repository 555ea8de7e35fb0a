//! Control-point index of a contour.
//!
//! Flattens the addressable points of every segment into one sequence. A
//! physical join is addressed once: in a closed contour, the `End` of segment
//! *i* (except the last) is represented by the `Start` of segment *i + 1*.

use serde::{Deserialize, Serialize};

use crate::brep::Contour;
use crate::curve::{Limit, Segment};
use crate::geom::Pnt;

/// Role of a control point within its segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointLimit {
    Interior,
    Start,
    End,
}

impl PointLimit {
    /// The segment limit this point sits on, `None` for interior points.
    pub fn as_limit(self) -> Option<Limit> {
        match self {
            PointLimit::Interior => None,
            PointLimit::Start => Some(Limit::Start),
            PointLimit::End => Some(Limit::End),
        }
    }
}

/// Where a flat control-point index lives in the contour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlPointInfo {
    /// Owning segment in contour order
    pub segment_index: usize,
    /// Point index local to the segment (0 or 1 for arcs)
    pub index: usize,
    pub limit: PointLimit,
    /// Position when the contour was bound
    pub origin: Pnt,
}

/// Opaque caller-side reference to a control point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ControlPointHandle(usize);

impl ControlPointHandle {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// A selection entry: raw flat index or handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlPointRef {
    Index(usize),
    Handle(ControlPointHandle),
}

impl ControlPointRef {
    /// Flat index this reference points at.
    pub fn resolve(self) -> usize {
        match self {
            ControlPointRef::Index(i) => i,
            ControlPointRef::Handle(h) => h.index(),
        }
    }
}

impl From<usize> for ControlPointRef {
    fn from(index: usize) -> Self {
        ControlPointRef::Index(index)
    }
}

impl From<ControlPointHandle> for ControlPointRef {
    fn from(handle: ControlPointHandle) -> Self {
        ControlPointRef::Handle(handle)
    }
}

/// Build the control-point index of a contour.
pub fn compute_control_point_info(contour: &Contour) -> Vec<ControlPointInfo> {
    let segments = contour.segments();
    let last = segments.len().saturating_sub(1);
    let mut info = Vec::new();

    for (segment_index, segment) in segments.iter().enumerate() {
        let skip_end = contour.is_closed() && segment_index != last;
        for (index, limit, origin) in addressable_points(segment) {
            if skip_end && limit == PointLimit::End {
                continue;
            }
            info.push(ControlPointInfo {
                segment_index,
                index,
                limit,
                origin,
            });
        }
    }

    info
}

fn addressable_points(segment: &Segment) -> Vec<(usize, PointLimit, Pnt)> {
    match segment.points() {
        Some(points) => {
            let last = points.len().saturating_sub(1);
            points
                .iter()
                .enumerate()
                .map(|(i, p)| {
                    let limit = if i == 0 {
                        PointLimit::Start
                    } else if i == last {
                        PointLimit::End
                    } else {
                        PointLimit::Interior
                    };
                    (i, limit, *p)
                })
                .collect()
        }
        None => vec![
            (0, PointLimit::Start, segment.start_point()),
            (1, PointLimit::End, segment.end_point()),
        ],
    }
}
