//! Destination policy: where a control point goes under a transform.

use serde::{Deserialize, Serialize};

use crate::geom::{Pnt, Vec3};
use crate::precision::{deg_to_rad, rad_to_deg};
use crate::{EditError, Result};

/// Transform applied to every selected control point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PointTransform {
    /// Translate by `delta`
    Move { delta: Vec3 },
    /// Scale about `pivot`, component-wise
    Scale { pivot: Pnt, factors: Vec3 },
    /// Rotate about the line through `pivot` along `axis`, angle in radians
    Rotate { pivot: Pnt, axis: Vec3, angle: f64 },
}

impl PointTransform {
    pub fn translate(delta: Vec3) -> Self {
        PointTransform::Move { delta }
    }

    pub fn scale(pivot: Pnt, factors: Vec3) -> Self {
        PointTransform::Scale { pivot, factors }
    }

    pub fn rotate(pivot: Pnt, axis: Vec3, angle: f64) -> Self {
        PointTransform::Rotate { pivot, axis, angle }
    }

    pub fn rotate_degrees(pivot: Pnt, axis: Vec3, degrees: f64) -> Self {
        Self::rotate(pivot, axis, deg_to_rad(degrees))
    }

    /// Rotation angle in degrees; `None` for other transforms.
    pub fn degrees(&self) -> Option<f64> {
        match self {
            PointTransform::Rotate { angle, .. } => Some(rad_to_deg(*angle)),
            _ => None,
        }
    }

    /// Check the parameters before anything is mutated.
    ///
    /// Malformed parameters are a [`EditError::Validation`]; a transform whose
    /// magnitude is below `epsilon` is [`EditError::NoOp`].
    pub fn validate(&self, epsilon: f64) -> Result<()> {
        match self {
            PointTransform::Move { delta } => {
                require_finite("delta", delta)?;
                if delta.manhattan_length() < epsilon {
                    return Err(EditError::NoOp);
                }
            }
            PointTransform::Scale { pivot, factors } => {
                require_finite("pivot", &pivot.to_vec3())?;
                require_finite("factors", factors)?;
                if factors.manhattan_distance(&Vec3::one()) < epsilon {
                    return Err(EditError::NoOp);
                }
            }
            PointTransform::Rotate { pivot, axis, angle } => {
                require_finite("pivot", &pivot.to_vec3())?;
                require_finite("axis", axis)?;
                if !angle.is_finite() {
                    return Err(EditError::Validation(format!(
                        "rotation angle is not finite: {}",
                        angle
                    )));
                }
                if axis.normalized().is_none() {
                    return Err(EditError::Validation("rotation axis has zero length".into()));
                }
                if angle.abs() < epsilon {
                    return Err(EditError::NoOp);
                }
            }
        }
        Ok(())
    }

    /// Target position of a control point whose bound position is `origin`.
    pub fn destination(&self, origin: &Pnt) -> Pnt {
        match self {
            PointTransform::Move { delta } => *origin + *delta,
            PointTransform::Scale { pivot, factors } => {
                *pivot + (*origin - *pivot).component_mul(factors)
            }
            PointTransform::Rotate { pivot, axis, angle } => match axis.normalized() {
                Some(dir) => *pivot + (*origin - *pivot).rotated(&dir, *angle),
                None => *origin,
            },
        }
    }
}

fn require_finite(name: &str, v: &Vec3) -> Result<()> {
    if v.x.is_finite() && v.y.is_finite() && v.z.is_finite() {
        Ok(())
    } else {
        Err(EditError::Validation(format!("{} has non-finite components", name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    const EPS: f64 = 1e-4;

    #[test]
    fn test_move() {
        let t = PointTransform::translate(Vec3::new(1.0, -2.0, 0.5));
        t.validate(EPS).unwrap();
        assert_eq!(t.destination(&Pnt::new(1.0, 1.0, 1.0)), Pnt::new(2.0, -1.0, 1.5));
    }

    #[test]
    fn test_scale_about_origin() {
        let t = PointTransform::scale(Pnt::origin(), Vec3::new(2.0, 1.0, 1.0));
        t.validate(EPS).unwrap();
        assert_eq!(t.destination(&Pnt::new(1.0, 1.0, 0.0)), Pnt::new(2.0, 1.0, 0.0));
    }

    #[test]
    fn test_scale_about_pivot() {
        let t = PointTransform::scale(Pnt::new(1.0, 1.0, 0.0), Vec3::new(3.0, 3.0, 3.0));
        assert_eq!(t.destination(&Pnt::new(2.0, 1.0, 0.0)), Pnt::new(4.0, 1.0, 0.0));
    }

    #[test]
    fn test_rotate_about_pivot() {
        let t =
            PointTransform::rotate(Pnt::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 2.0), FRAC_PI_2);
        let p = t.destination(&Pnt::new(2.0, 0.0, 0.0));
        assert_abs_diff_eq!(p.x, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.y, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.z, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_degrees_round_trip() {
        let t = PointTransform::rotate_degrees(Pnt::origin(), Vec3::new(0.0, 0.0, 1.0), 90.0);
        assert_abs_diff_eq!(t.degrees().unwrap(), 90.0, epsilon = 1e-12);
        assert!(PointTransform::translate(Vec3::one()).degrees().is_none());
    }

    #[test]
    fn test_no_op_thresholds() {
        let noop = [
            PointTransform::translate(Vec3::zero()),
            PointTransform::translate(Vec3::new(3e-5, 3e-5, 3e-5)),
            PointTransform::scale(Pnt::origin(), Vec3::one()),
            PointTransform::rotate(Pnt::origin(), Vec3::new(0.0, 0.0, 1.0), 0.0),
            PointTransform::rotate(Pnt::origin(), Vec3::new(0.0, 0.0, 1.0), -5e-5),
        ];
        for t in noop {
            assert!(t.validate(EPS).unwrap_err().is_no_op(), "{:?}", t);
        }
        // Manhattan, not Euclidean: 5e-5 on each axis sums past the threshold
        PointTransform::translate(Vec3::new(5e-5, 5e-5, 0.0)).validate(EPS).unwrap();
    }

    #[test]
    fn test_malformed_parameters() {
        let zero_axis = PointTransform::rotate(Pnt::origin(), Vec3::zero(), 1.0);
        assert!(matches!(zero_axis.validate(EPS), Err(EditError::Validation(_))));

        let nan = PointTransform::translate(Vec3::new(f64::NAN, 0.0, 0.0));
        assert!(matches!(nan.validate(EPS), Err(EditError::Validation(_))));

        // Malformed wins over no-op
        let zero_axis_zero_angle = PointTransform::rotate(Pnt::origin(), Vec3::zero(), 0.0);
        assert!(matches!(zero_axis_zero_angle.validate(EPS), Err(EditError::Validation(_))));
    }
}
