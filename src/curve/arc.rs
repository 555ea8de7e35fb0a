//! Circular arc segment defined by three points.

use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

use super::Limit;
use crate::geom::{rotation_between, Dir, Pnt, Vec3};
use crate::precision::CONFUSION;
use crate::{EditError, Result};

/// Circle data solved from the three defining points.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ArcFrame {
    center: Pnt,
    radius: f64,
    /// Unit vector from center to start.
    x_dir: Vec3,
    /// Plane normal × x_dir; the arc runs counter-clockwise from x_dir to y_dir
    y_dir: Vec3,
    /// Swept angle in (0, 2π)
    sweep: f64,
}

/// A circular arc from `start` through `through` to `end`.
///
/// Only the two limit points are addressable. Moving a limit point carries
/// the through point along with the similarity that maps the old chord onto
/// the new one, so the arc keeps its shape relative to its chord.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arc {
    start: Pnt,
    through: Pnt,
    end: Pnt,
    #[serde(skip)]
    frame: Option<ArcFrame>,
}

impl Arc {
    /// Create the arc that starts at `start`, passes `through` and ends at `end`.
    pub fn through_points(start: Pnt, through: Pnt, end: Pnt) -> Result<Self> {
        let mut arc = Self {
            start,
            through,
            end,
            frame: None,
        };
        arc.rebuild()?;
        Ok(arc)
    }

    /// Create an arc on a circle, sweeping counter-clockwise about `normal`
    /// from the point at `start_dir` by `sweep` radians.
    pub fn from_center(
        center: Pnt,
        radius: f64,
        normal: Dir,
        start_dir: Dir,
        sweep: f64,
    ) -> Result<Self> {
        if radius <= CONFUSION {
            return Err(EditError::InvalidGeometry(format!(
                "Arc radius must be positive, got {}",
                radius
            )));
        }
        if !(sweep > 0.0 && sweep < TAU) {
            return Err(EditError::InvalidGeometry(format!(
                "Arc sweep must be in (0, 2π), got {}",
                sweep
            )));
        }
        // Project the start direction into the arc plane
        let n = normal.to_vec3();
        let raw = start_dir.to_vec3();
        let x_dir = (raw - n * raw.dot(&n))
            .normalized()
            .ok_or_else(|| {
                EditError::InvalidGeometry("start direction is parallel to the normal".into())
            })?
            .to_vec3();
        let y_dir = n.cross(&x_dir);
        let at = |angle: f64| center + (x_dir * angle.cos() + y_dir * angle.sin()) * radius;
        Self::through_points(at(0.0), at(sweep / 2.0), at(sweep))
    }

    pub fn start_point(&self) -> Pnt {
        self.start
    }

    pub fn end_point(&self) -> Pnt {
        self.end
    }

    /// Interior point the arc passes through.
    pub fn through_point(&self) -> Pnt {
        self.through
    }

    pub fn center(&self) -> Result<Pnt> {
        Ok(self.frame()?.center)
    }

    pub fn radius(&self) -> Result<f64> {
        Ok(self.frame()?.radius)
    }

    pub fn sweep(&self) -> Result<f64> {
        Ok(self.frame()?.sweep)
    }

    /// Move one end of the arc. The arc must be rebuilt afterwards.
    pub fn set_limit_point(&mut self, limit: Limit, point: Pnt) {
        let (new_start, new_end) = match limit {
            Limit::Start => (point, self.end),
            Limit::End => (self.start, point),
        };

        let old_chord = self.end - self.start;
        let new_chord = new_end - new_start;
        if let (Some(from), Some(to)) = (old_chord.normalized(), new_chord.normalized()) {
            let plane_normal = (self.through - self.start).cross(&old_chord).normalized();
            let rotation = rotation_between(&from, &to, plane_normal.as_ref());
            let scale = new_chord.magnitude() / old_chord.magnitude();
            let offset = Vec3::from(rotation * (self.through - self.start).to_nalgebra()) * scale;
            self.through = new_start + offset;
        }
        // A vanishing chord leaves the through point in place; rebuild rejects
        // the result if it is no longer a proper arc.

        self.start = new_start;
        self.end = new_end;
        self.frame = None;
    }

    pub fn is_dirty(&self) -> bool {
        self.frame.is_none()
    }

    /// Solve the circle through the three defining points.
    pub fn rebuild(&mut self) -> Result<()> {
        let u = self.through - self.start;
        let v = self.end - self.start;
        let w = u.cross(&v);
        let w_sq = w.magnitude_squared();

        if v.magnitude() < CONFUSION {
            return Err(EditError::InvalidGeometry(
                "Arc start and end coincide".to_string(),
            ));
        }
        if w_sq.sqrt() < CONFUSION * v.magnitude() {
            return Err(EditError::InvalidGeometry(
                "Arc points are collinear".to_string(),
            ));
        }

        // Circumcenter of the triangle (start, through, end)
        let offset = (v.cross(&w) * u.magnitude_squared() + w.cross(&u) * v.magnitude_squared())
            * (1.0 / (2.0 * w_sq));
        let center = self.start + offset;
        let radius = offset.magnitude();

        let normal = w
            .normalized()
            .ok_or_else(|| EditError::InvalidGeometry("Arc plane is undefined".to_string()))?;
        let x_dir = (self.start - center) * (1.0 / radius);
        let y_dir = normal.to_vec3().cross(&x_dir);

        let mut sweep = angle_in_frame(&(self.end - center), &x_dir, &y_dir);
        if sweep <= 0.0 {
            sweep += TAU;
        }

        self.frame = Some(ArcFrame {
            center,
            radius,
            x_dir,
            y_dir,
            sweep,
        });
        Ok(())
    }

    pub fn point_at(&self, t: f64) -> Result<Pnt> {
        let frame = self.frame()?;
        let angle = t.clamp(0.0, 1.0) * frame.sweep;
        Ok(frame.center + (frame.x_dir * angle.cos() + frame.y_dir * angle.sin()) * frame.radius)
    }

    pub fn length(&self) -> Result<f64> {
        let frame = self.frame()?;
        Ok(frame.radius * frame.sweep)
    }

    fn frame(&self) -> Result<&ArcFrame> {
        self.frame.as_ref().ok_or(EditError::StaleSegment)
    }
}

/// Angle of `v` in the (x, y) frame, in (-π, π].
fn angle_in_frame(v: &Vec3, x_dir: &Vec3, y_dir: &Vec3) -> f64 {
    v.dot(y_dir).atan2(v.dot(x_dir))
}
