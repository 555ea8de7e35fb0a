//! Polyline segment: straight spans through an ordered list of vertices.

use serde::{Deserialize, Serialize};

use crate::geom::Pnt;
use crate::precision::CONFUSION;
use crate::{EditError, Result};

/// A polyline with at least two vertices.
///
/// Parametrized by normalized cumulative chord length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<Pnt>,
    #[serde(skip)]
    params: Option<Vec<f64>>,
}

impl Polyline {
    /// Create a polyline through `points`.
    pub fn new(points: Vec<Pnt>) -> Result<Self> {
        let mut polyline = Self { points, params: None };
        polyline.rebuild()?;
        Ok(polyline)
    }

    pub fn points(&self) -> &[Pnt] {
        &self.points
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
                "polyline point {} out of range ({} points)",
                index, len
            ))
        })?;
        *slot = point;
        self.params = None;
        Ok(())
    }

    pub fn is_dirty(&self) -> bool {
        self.params.is_none()
    }

    pub fn rebuild(&mut self) -> Result<()> {
        if self.points.len() < 2 {
            return Err(EditError::InvalidGeometry(format!(
                "polyline needs at least 2 points, got {}",
                self.points.len()
            )));
        }

        let mut params = Vec::with_capacity(self.points.len());
        let mut total = 0.0;
        params.push(0.0);
        for pair in self.points.windows(2) {
            total += pair[0].distance(&pair[1]);
            params.push(total);
        }

        let last = (self.points.len() - 1) as f64;
        if total > CONFUSION {
            for p in &mut params {
                *p /= total;
            }
        } else {
            // Collapsed polyline: fall back to uniform spacing
            for (i, p) in params.iter_mut().enumerate() {
                *p = i as f64 / last;
            }
        }

        self.params = Some(params);
        Ok(())
    }

    pub fn point_at(&self, t: f64) -> Result<Pnt> {
        let params = self.params.as_ref().ok_or(EditError::StaleSegment)?;
        let t = t.clamp(0.0, 1.0);

        // First span whose end parameter reaches t
        let span = params
            .windows(2)
            .position(|w| t <= w[1])
            .unwrap_or(params.len() - 2);

        let (t0, t1) = (params[span], params[span + 1]);
        let local = if t1 - t0 > 0.0 { (t - t0) / (t1 - t0) } else { 0.0 };
        let a = self.points[span];
        let b = self.points[span + 1];
        Ok(a + (b - a) * local)
    }

    pub fn length(&self) -> Result<f64> {
        if self.is_dirty() {
            return Err(EditError::StaleSegment);
        }
        Ok(self.points.windows(2).map(|w| w[0].distance(&w[1])).sum())
    }
}
