//! Geometry primitives
//!
//! This module provides basic geometric types:
//! - `Pnt` - 3D point
//! - `Vec3` - 3D vector
//! - `Dir` - 3D unit vector (direction)
//!
//! Rotations go through nalgebra's `Rotation3`.

use nalgebra::{Rotation3, Unit, Vector3};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

use crate::precision::CONFUSION;

/// A 3D point
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pnt {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Pnt {
    /// Create a new point
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Origin point (0, 0, 0)
    pub fn origin() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Position vector of this point
    pub fn to_vec3(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Distance to another point
    pub fn distance(&self, other: &Pnt) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Squared distance to another point (faster, no sqrt)
    pub fn distance_squared(&self, other: &Pnt) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }

    /// Check if approximately equal to another point
    pub fn is_equal(&self, other: &Pnt, tolerance: f64) -> bool {
        self.distance(other) <= tolerance
    }

    /// Translate point by vector
    pub fn translated(&self, v: &Vec3) -> Pnt {
        Pnt::new(self.x + v.x, self.y + v.y, self.z + v.z)
    }
}

impl Add<Vec3> for Pnt {
    type Output = Pnt;

    fn add(self, v: Vec3) -> Pnt {
        self.translated(&v)
    }
}

impl Sub<Vec3> for Pnt {
    type Output = Pnt;

    fn sub(self, v: Vec3) -> Pnt {
        Pnt::new(self.x - v.x, self.y - v.y, self.z - v.z)
    }
}

impl Sub<Pnt> for Pnt {
    type Output = Vec3;

    fn sub(self, other: Pnt) -> Vec3 {
        Vec3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

/// A 3D vector
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    /// Create a new vector
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Zero vector
    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// All components set to one (identity scale factors)
    pub fn one() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }

    /// Magnitude (length) of the vector
    pub fn magnitude(&self) -> f64 {
        self.magnitude_squared().sqrt()
    }

    /// Squared magnitude (faster, no sqrt)
    pub fn magnitude_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Sum of absolute components (L1 norm)
    pub fn manhattan_length(&self) -> f64 {
        self.x.abs() + self.y.abs() + self.z.abs()
    }

    /// L1 distance to another vector
    pub fn manhattan_distance(&self, other: &Vec3) -> f64 {
        (*self - *other).manhattan_length()
    }

    /// Normalize to unit length (returns None if zero vector)
    pub fn normalized(&self) -> Option<Dir> {
        Dir::try_new(self.x, self.y, self.z)
    }

    /// Dot product with another vector
    pub fn dot(&self, other: &Vec3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product with another vector
    pub fn cross(&self, other: &Vec3) -> Vec3 {
        Vec3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Scale the vector
    pub fn scaled(&self, factor: f64) -> Vec3 {
        Vec3::new(self.x * factor, self.y * factor, self.z * factor)
    }

    /// Element-wise product
    pub fn component_mul(&self, other: &Vec3) -> Vec3 {
        Vec3::new(self.x * other.x, self.y * other.y, self.z * other.z)
    }

    /// Rotate about an axis through the origin (right-hand rule)
    pub fn rotated(&self, axis: &Dir, angle: f64) -> Vec3 {
        let rotation = Rotation3::from_axis_angle(&axis.to_unit(), angle);
        Vec3::from(rotation * self.to_nalgebra())
    }

    /// Angle with another vector (in radians)
    pub fn angle(&self, other: &Vec3) -> f64 {
        let mag_product = self.magnitude() * other.magnitude();
        if mag_product < CONFUSION {
            0.0
        } else {
            (self.dot(other) / mag_product).clamp(-1.0, 1.0).acos()
        }
    }

    pub(crate) fn to_nalgebra(self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }
}

impl From<Vector3<f64>> for Vec3 {
    fn from(v: Vector3<f64>) -> Vec3 {
        Vec3::new(v.x, v.y, v.z)
    }
}

impl Add for Vec3 {
    type Output = Vec3;

    fn add(self, other: Vec3) -> Vec3 {
        Vec3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;

    fn sub(self, other: Vec3) -> Vec3 {
        Vec3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Neg for Vec3 {
    type Output = Vec3;

    fn neg(self) -> Vec3 {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Vec3;

    fn mul(self, scalar: f64) -> Vec3 {
        self.scaled(scalar)
    }
}

/// A 3D unit vector / direction
///
/// Unlike `Vec3`, a `Dir` is always normalized (magnitude = 1).
/// This is enforced at construction time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dir {
    x: f64,
    y: f64,
    z: f64,
}

impl Dir {
    /// Try to create a new direction. Returns None if the input vector has zero magnitude.
    pub fn try_new(x: f64, y: f64, z: f64) -> Option<Self> {
        let mag = (x * x + y * y + z * z).sqrt();
        if mag > CONFUSION {
            Some(Self {
                x: x / mag,
                y: y / mag,
                z: z / mag,
            })
        } else {
            None
        }
    }

    /// Unit X direction (+X axis)
    pub fn x_axis() -> Self {
        Self { x: 1.0, y: 0.0, z: 0.0 }
    }

    /// Unit Z direction (+Z axis)
    pub fn z_axis() -> Self {
        Self { x: 0.0, y: 0.0, z: 1.0 }
    }

    /// Get X component
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Get Y component
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Get Z component
    pub fn z(&self) -> f64 {
        self.z
    }

    /// Reverse (negate) the direction
    pub fn reversed(&self) -> Dir {
        Dir {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }

    /// Dot product with another direction
    pub fn dot(&self, other: &Dir) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Convert to a Vec3 (unit vector)
    pub fn to_vec3(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Find a direction perpendicular to this one
    /// The choice of perpendicular is arbitrary but deterministic
    pub fn perpendicular(&self) -> Dir {
        let abs_x = self.x.abs();
        let abs_y = self.y.abs();
        let abs_z = self.z.abs();

        let helper = if abs_x <= abs_y && abs_x <= abs_z {
            Vec3::new(1.0, 0.0, 0.0)
        } else if abs_y <= abs_x && abs_y <= abs_z {
            Vec3::new(0.0, 1.0, 0.0)
        } else {
            Vec3::new(0.0, 0.0, 1.0)
        };

        // The smallest component is at most 1/sqrt(3), so the cross product
        // with its axis has magnitude >= sqrt(2/3).
        let c = self.to_vec3().cross(&helper);
        let mag = c.magnitude();
        Dir {
            x: c.x / mag,
            y: c.y / mag,
            z: c.z / mag,
        }
    }

    pub(crate) fn to_unit(self) -> Unit<Vector3<f64>> {
        Unit::new_unchecked(Vector3::new(self.x, self.y, self.z))
    }
}

impl Neg for Dir {
    type Output = Dir;

    fn neg(self) -> Dir {
        self.reversed()
    }
}

impl From<Dir> for Vec3 {
    fn from(d: Dir) -> Vec3 {
        d.to_vec3()
    }
}

/// Rotation taking direction `from` onto direction `to` with the smallest angle.
///
/// Antiparallel inputs rotate by π about `fallback_axis` (or an arbitrary
/// perpendicular when none is given).
pub fn rotation_between(from: &Dir, to: &Dir, fallback_axis: Option<&Dir>) -> Rotation3<f64> {
    let a = from.to_vec3().to_nalgebra();
    let b = to.to_vec3().to_nalgebra();
    match Rotation3::rotation_between(&a, &b) {
        Some(rotation) => rotation,
        None => {
            let axis = fallback_axis.copied().unwrap_or_else(|| from.perpendicular());
            Rotation3::from_axis_angle(&axis.to_unit(), std::f64::consts::PI)
        }
    }
}

// ===== Tests =====
