//! Curve normalization
//!
//! Turns any curve a document can hold into a [`Contour`] suitable for
//! control-point editing:
//! - A polyline becomes a chain of two-point spans, so every vertex is a join
//! - Zero-length spans are removed
//! - Splines and arcs become one-segment contours
//! - A chain whose ends meet is closed

use log::debug;

use crate::brep::{Contour, Curve, SpaceInstance};
use crate::curve::{Polyline, Segment};
use crate::geom::Pnt;
use crate::precision::{CONFUSION, RULED_CHECK_TOLERANCE};
use crate::{EditError, Result};

/// Normalize the curve held by a persisted instance.
pub fn normalize_instance(instance: &SpaceInstance) -> Result<Contour> {
    normalize_curve(&instance.curve)
}

/// Normalize any curve into a contour.
///
/// # Returns
/// * `Result<Contour>` - Contour or error if nothing usable remains
pub fn normalize_curve(curve: &Curve) -> Result<Contour> {
    let (segments, closed) = match curve {
        Curve::Contour(contour) => {
            let mut segments = Vec::new();
            for segment in contour.segments() {
                segments.extend(explode(segment.clone())?);
            }
            (segments, contour.is_closed())
        }
        Curve::Polyline(p) => {
            let closed = ends_meet(p.points());
            (explode(Segment::Polyline(p.clone()))?, closed)
        }
        Curve::Spline(s) => {
            let closed = ends_meet(s.points());
            (vec![Segment::Spline(s.clone())], closed)
        }
        Curve::Arc(a) => (vec![Segment::Arc(a.clone())], false),
    };

    let mut contour = Contour::new();
    for mut segment in segments {
        if segment.is_dirty() {
            segment.rebuild()?;
        }
        contour.append_with_ruled_check(segment, RULED_CHECK_TOLERANCE, true)?;
    }

    if contour.is_empty() {
        return Err(EditError::Validation(format!(
            "{} has no usable segments",
            curve.type_name()
        )));
    }
    if closed {
        contour.close_with_ruled_check(RULED_CHECK_TOLERANCE)?;
    }

    debug!(
        "Normalized {} into {} segment(s), closed = {}",
        curve.type_name(),
        contour.len(),
        contour.is_closed()
    );
    Ok(contour)
}

/// Split a polyline into two-point spans, skipping zero-length ones.
/// Other segment kinds pass through unchanged.
fn explode(segment: Segment) -> Result<Vec<Segment>> {
    match segment {
        Segment::Polyline(p) => p
            .points()
            .windows(2)
            .filter(|pair| !pair[0].is_equal(&pair[1], CONFUSION))
            .map(|pair| Polyline::new(vec![pair[0], pair[1]]).map(Segment::Polyline))
            .collect(),
        other => Ok(vec![other]),
    }
}

/// A point chain is closed when it has more than two points and its ends coincide.
fn ends_meet(points: &[Pnt]) -> bool {
    match (points.first(), points.last()) {
        (Some(first), Some(last)) if points.len() > 2 => first.is_equal(last, CONFUSION),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::{Arc, Spline};

    fn pts(coords: &[(f64, f64)]) -> Vec<Pnt> {
        coords.iter().map(|&(x, y)| Pnt::new(x, y, 0.0)).collect()
    }

    #[test]
    fn test_polyline_explodes_into_spans() {
        let polyline =
            Polyline::new(pts(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (2.0, 1.0)])).unwrap();
        let contour = normalize_curve(&Curve::Polyline(polyline)).unwrap();
        assert_eq!(contour.len(), 3);
        assert!(!contour.is_closed());
        assert!(contour.segments().iter().all(|s| s.point_count() == 2));
    }

    #[test]
    fn test_closed_polyline() {
        let polyline =
            Polyline::new(pts(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)])).unwrap();
        let contour = normalize_curve(&Curve::Polyline(polyline)).unwrap();
        assert_eq!(contour.len(), 3);
        assert!(contour.is_closed());
    }

    #[test]
    fn test_duplicate_vertices_removed() {
        let polyline =
            Polyline::new(pts(&[(0.0, 0.0), (1.0, 0.0), (1.0, 0.0), (1.0, 1.0)])).unwrap();
        let contour = normalize_curve(&Curve::Polyline(polyline)).unwrap();
        assert_eq!(contour.len(), 2);
    }

    #[test]
    fn test_fully_collapsed_polyline_rejected() {
        let polyline = Polyline::new(pts(&[(1.0, 1.0), (1.0, 1.0)])).unwrap();
        let err = normalize_curve(&Curve::Polyline(polyline)).unwrap_err();
        assert!(matches!(err, EditError::Validation(_)));
    }

    #[test]
    fn test_single_arc_and_spline() {
        let arc = Arc::through_points(
            Pnt::new(1.0, 0.0, 0.0),
            Pnt::new(0.0, 1.0, 0.0),
            Pnt::new(-1.0, 0.0, 0.0),
        )
        .unwrap();
        let contour = normalize_curve(&Curve::Arc(arc)).unwrap();
        assert_eq!(contour.len(), 1);

        let spline = Spline::new(pts(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)])).unwrap();
        let contour = normalize_curve(&Curve::Spline(spline)).unwrap();
        assert_eq!(contour.len(), 1);
        assert!(!contour.is_closed());
    }

    #[test]
    fn test_contour_keeps_spline_and_explodes_polyline() {
        let spline: Segment =
            Spline::new(pts(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)])).unwrap().into();
        let polyline: Segment =
            Polyline::new(pts(&[(2.0, 0.0), (2.0, -1.0), (0.0, -1.0), (0.0, 0.0)])).unwrap().into();
        let contour = Contour::from_segments(vec![spline, polyline], true);
        let normalized = normalize_curve(&Curve::Contour(contour)).unwrap();
        assert_eq!(normalized.len(), 4);
        assert!(normalized.is_closed());
    }
}
