//! Precision constants for contour editing.
//!
//! These are the defaults behind [`crate::settings::EditSettings`]. The
//! editing thresholds are expressed in model units (or radians for angles).

/// Confusion tolerance for checking coincidence of two points in real space.
/// Two points are coincident if their distance < CONFUSION.
/// Value: 1.0e-7
pub const CONFUSION: f64 = 1.0e-7;

/// Smallest transform magnitude worth committing.
/// Applies to the Manhattan length of a move delta, the Manhattan distance of
/// scale factors from (1, 1, 1), and the absolute rotation angle.
/// Value: 1.0e-4
pub const NO_OP_EPSILON: f64 = 1.0e-4;

/// Join tolerance used when reassembling segments into a contour.
/// Value: 1.0e-5
pub const RULED_CHECK_TOLERANCE: f64 = 1.0e-5;

/// Convert degrees to radians.
#[inline]
pub fn deg_to_rad(degrees: f64) -> f64 {
    degrees.to_radians()
}

/// Convert radians to degrees.
#[inline]
pub fn rad_to_deg(radians: f64) -> f64 {
    radians.to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_precision_values() {
        assert_eq!(CONFUSION, 1.0e-7);
        assert_eq!(NO_OP_EPSILON, 1.0e-4);
        assert_eq!(RULED_CHECK_TOLERANCE, 1.0e-5);
        assert!(RULED_CHECK_TOLERANCE > CONFUSION);
    }

    #[test]
    fn test_angle_conversion() {
        assert_relative_eq!(deg_to_rad(180.0), std::f64::consts::PI);
        assert_relative_eq!(rad_to_deg(std::f64::consts::FRAC_PI_2), 90.0);
    }
}
