//! Clamped B-spline segment over an editable control polygon.

use serde::{Deserialize, Serialize};

use crate::geom::{Pnt, Vec3};
use crate::{EditError, Result};

/// Highest degree used for spline segments.
const MAX_DEGREE: usize = 3;

/// Samples used to approximate spline length.
const LENGTH_SAMPLES: usize = 64;

/// A clamped B-spline. The curve passes through its first and last control
/// points, so those double as the segment's limit points.
///
/// The knot vector is derived from the control polygon by chord-length
/// averaging and is recomputed by [`Spline::rebuild`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spline {
    points: Vec<Pnt>,
    #[serde(skip)]
    knots: Option<Vec<f64>>,
}

impl Spline {
    /// Create a spline with the given control points (at least 2).
    pub fn new(points: Vec<Pnt>) -> Result<Self> {
        let mut spline = Self { points, knots: None };
        spline.rebuild()?;
        Ok(spline)
    }

    pub fn points(&self) -> &[Pnt] {
        &self.points
    }

    /// Degree of the basis: cubic, or lower when there are too few points.
    pub fn degree(&self) -> usize {
        self.points.len().saturating_sub(1).min(MAX_DEGREE)
    }

    /// Current knot vector, `None` while the spline is dirty.
    pub fn knots(&self) -> Option<&[f64]> {
        self.knots.as_deref()
    }

    pub fn start_point(&self) -> Pnt {
        self.points.first().copied().unwrap_or_default()
    }

    pub fn end_point(&self) -> Pnt {
        self.points.last().copied().unwrap_or_default()
    }

    pub fn change_point(&mut self, index: usize, point: Pnt) -> Result<()> {
        let len = self.points.len();
        let slot = self.points.get_mut(index).ok_or_else(|| {
            EditError::InvalidGeometry(format!(
                "spline point {} out of range ({} points)",
                index, len
            ))
        })?;
        *slot = point;
        self.knots = None;
        Ok(())
    }

    pub fn is_dirty(&self) -> bool {
        self.knots.is_none()
    }

    pub fn rebuild(&mut self) -> Result<()> {
        if self.points.len() < 2 {
            return Err(EditError::InvalidGeometry(format!(
                "spline needs at least 2 control points, got {}",
                self.points.len()
            )));
        }
        let params = chord_length_params(&self.points);
        self.knots = Some(averaged_knot_vector(&params, self.degree()));
        Ok(())
    }

    /// Evaluate at t ∈ [0, 1] with de Boor's algorithm.
    pub fn point_at(&self, t: f64) -> Result<Pnt> {
        let knots = self.knots.as_ref().ok_or(EditError::StaleSegment)?;
        let degree = self.degree();
        let n = self.points.len();
        let t = t.clamp(0.0, 1.0);

        if n + degree + 1 != knots.len() {
            return Err(EditError::InvalidGeometry(format!(
                "Invalid knot vector length. Expected {}, got {}",
                n + degree + 1,
                knots.len()
            )));
        }

        let k = find_span(knots, degree, n, t);
        let mut d: Vec<Vec3> = (0..=degree)
            .map(|j| self.points[j + k - degree].to_vec3())
            .collect();

        for r in 1..=degree {
            for j in (r..=degree).rev() {
                let left = knots[j + k - degree];
                let right = knots[j + 1 + k - r];
                let denom = right - left;
                let alpha = if denom.abs() < 1e-14 { 0.0 } else { (t - left) / denom };
                d[j] = d[j - 1] * (1.0 - alpha) + d[j] * alpha;
            }
        }

        let p = d[degree];
        Ok(Pnt::new(p.x, p.y, p.z))
    }

    /// Length approximated by a fixed-size chord sum.
    pub fn length(&self) -> Result<f64> {
        let mut total = 0.0;
        let mut prev = self.point_at(0.0)?;
        for i in 1..=LENGTH_SAMPLES {
            let p = self.point_at(i as f64 / LENGTH_SAMPLES as f64)?;
            total += prev.distance(&p);
            prev = p;
        }
        Ok(total)
    }
}

/// Compute chord-length parameterization of the control polygon
fn chord_length_params(points: &[Pnt]) -> Vec<f64> {
    let mut params = vec![0.0];
    let mut total = 0.0;
    for pair in points.windows(2) {
        total += pair[0].distance(&pair[1]);
        params.push(total);
    }

    let last = (points.len() - 1) as f64;
    if total > 1e-14 {
        for p in &mut params {
            *p /= total;
        }
    } else {
        for (i, p) in params.iter_mut().enumerate() {
            *p = i as f64 / last;
        }
    }
    params
}

/// Clamped knot vector with interior knots at averaged parameter values
fn averaged_knot_vector(params: &[f64], degree: usize) -> Vec<f64> {
    let n = params.len();
    let mut knots = vec![0.0; degree + 1];

    if n > degree + 1 {
        for j in 1..=(n - degree - 1) {
            let sum: f64 = params[j..j + degree].iter().sum();
            knots.push(sum / degree as f64);
        }
    }

    knots.extend(std::iter::repeat(1.0).take(degree + 1));
    knots
}

/// Index k of the knot span [knots[k], knots[k+1]) containing t.
fn find_span(knots: &[f64], degree: usize, n: usize, t: f64) -> usize {
    if t >= knots[n] {
        return n - 1;
    }
    let mut k = degree;
    while k < n - 1 && knots[k + 1] <= t {
        k += 1;
    }
    k
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn wave() -> Spline {
        Spline::new(vec![
            Pnt::new(0.0, 0.0, 0.0),
            Pnt::new(1.0, 2.0, 0.0),
            Pnt::new(2.0, -2.0, 0.0),
            Pnt::new(3.0, 2.0, 0.0),
            Pnt::new(4.0, 0.0, 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_interpolates_end_points() {
        let spline = wave();
        assert_eq!(spline.degree(), 3);
        let start = spline.point_at(0.0).unwrap();
        let end = spline.point_at(1.0).unwrap();
        assert_abs_diff_eq!(start.distance(&spline.start_point()), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(end.distance(&spline.end_point()), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_knot_vector_shape() {
        let spline = wave();
        let knots = spline.knots().unwrap();
        assert_eq!(knots.len(), 5 + 3 + 1);
        assert!(knots.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(knots[0], 0.0);
        assert_eq!(knots[knots.len() - 1], 1.0);
    }

    #[test]
    fn test_two_point_spline_is_linear() {
        let spline = Spline::new(vec![Pnt::origin(), Pnt::new(2.0, 0.0, 0.0)]).unwrap();
        assert_eq!(spline.degree(), 1);
        let mid = spline.point_at(0.5).unwrap();
        assert_abs_diff_eq!(mid.x, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rebuild_tracks_control_polygon() {
        let mut spline = wave();
        let before = spline.knots().unwrap().to_vec();
        spline.change_point(1, Pnt::new(1.0, 10.0, 0.0)).unwrap();
        assert!(spline.is_dirty());
        spline.rebuild().unwrap();
        assert_ne!(spline.knots().unwrap(), before.as_slice());
    }
}
