//! Contour validity checking
//!
//! This module reports geometric and topological issues in a contour:
//! - Empty contours
//! - Segments that were edited but never rebuilt
//! - Degenerate (zero-extent) segments
//! - Joins where a segment's end does not meet the next segment's start
//! - Closed contours whose seam does not meet

use crate::brep::Contour;

/// Issues found during contour validation
#[derive(Debug, Clone, PartialEq)]
pub enum ContourDefect {
    /// Contour has no segments
    Empty,

    /// Segment has pending point edits
    StaleSegment { index: usize },

    /// Segment has zero or near-zero extent
    DegenerateSegment { index: usize },

    /// End of `segment` does not meet the start of `next`
    BrokenJoin { segment: usize, next: usize, gap: f64 },

    /// Closed contour whose last end does not meet its first start
    OpenSeam { gap: f64 },
}

impl std::fmt::Display for ContourDefect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContourDefect::Empty => write!(f, "Contour has no segments"),
            ContourDefect::StaleSegment { index } => {
                write!(f, "Segment #{} was modified but not rebuilt", index)
            }
            ContourDefect::DegenerateSegment { index } => {
                write!(f, "Segment #{} is degenerate", index)
            }
            ContourDefect::BrokenJoin { segment, next, gap } => {
                write!(
                    f,
                    "Segment #{} end doesn't meet segment #{} start: gap = {:.2e}",
                    segment, next, gap
                )
            }
            ContourDefect::OpenSeam { gap } => {
                write!(f, "Closed contour seam is open: gap = {:.2e}", gap)
            }
        }
    }
}

/// Check a contour and return every defect found.
///
/// Joins are compared with `tolerance`. An empty result means the contour
/// can be bound for editing.
pub fn check_contour(contour: &Contour, tolerance: f64) -> Vec<ContourDefect> {
    let mut defects = Vec::new();
    let segments = contour.segments();

    if segments.is_empty() {
        defects.push(ContourDefect::Empty);
        return defects;
    }

    for (index, segment) in segments.iter().enumerate() {
        if segment.is_dirty() {
            defects.push(ContourDefect::StaleSegment { index });
        }
        if segment.is_degenerate(tolerance) {
            defects.push(ContourDefect::DegenerateSegment { index });
        }
    }

    for (segment, pair) in segments.windows(2).enumerate() {
        let gap = pair[0].end_point().distance(&pair[1].start_point());
        if gap > tolerance {
            defects.push(ContourDefect::BrokenJoin {
                segment,
                next: segment + 1,
                gap,
            });
        }
    }

    if contour.is_closed() {
        if let (Some(start), Some(end)) = (contour.start_point(), contour.end_point()) {
            let gap = end.distance(&start);
            if gap > tolerance {
                defects.push(ContourDefect::OpenSeam { gap });
            }
        }
    }

    defects
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::{Polyline, Segment};
    use crate::geom::Pnt;

    fn line(a: (f64, f64), b: (f64, f64)) -> Segment {
        Polyline::new(vec![Pnt::new(a.0, a.1, 0.0), Pnt::new(b.0, b.1, 0.0)])
            .unwrap()
            .into()
    }

    #[test]
    fn test_valid_triangle() {
        let contour = Contour::from_segments(
            vec![
                line((0.0, 0.0), (1.0, 0.0)),
                line((1.0, 0.0), (0.0, 1.0)),
                line((0.0, 1.0), (0.0, 0.0)),
            ],
            true,
        );
        assert!(check_contour(&contour, 1e-5).is_empty());
    }

    #[test]
    fn test_empty_contour() {
        assert_eq!(check_contour(&Contour::new(), 1e-5), vec![ContourDefect::Empty]);
    }

    #[test]
    fn test_broken_join_and_open_seam() {
        let contour = Contour::from_segments(
            vec![line((0.0, 0.0), (1.0, 0.0)), line((1.0, 0.5), (0.0, 1.0))],
            true,
        );
        let defects = check_contour(&contour, 1e-5);
        assert!(defects
            .iter()
            .any(|d| matches!(d, ContourDefect::BrokenJoin { segment: 0, next: 1, .. })));
        assert!(defects.iter().any(|d| matches!(d, ContourDefect::OpenSeam { .. })));
    }

    #[test]
    fn test_stale_and_degenerate_segments() {
        let mut edited = line((0.0, 0.0), (1.0, 0.0));
        edited.change_point(1, Pnt::new(2.0, 0.0, 0.0)).unwrap();
        let contour = Contour::from_segments(
            vec![edited, line((2.0, 0.0), (2.0, 0.0))],
            false,
        );
        let defects = check_contour(&contour, 1e-5);
        assert!(defects.contains(&ContourDefect::StaleSegment { index: 0 }));
        assert!(defects.contains(&ContourDefect::DegenerateSegment { index: 1 }));
        assert_eq!(defects.len(), 2);
    }

    #[test]
    fn test_defect_display() {
        let text = ContourDefect::BrokenJoin { segment: 2, next: 3, gap: 0.5 }.to_string();
        assert!(text.contains("#2"));
        assert!(text.contains("#3"));
    }
}
