// src/math/vector2.rs

use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// A 2D vector (or point) with `f64` components.
///
/// All simulation geometry is planar, so this is the only vector type the
/// crate needs; angular quantities are signed scalars about the view-plane
/// normal.
///
/// # Examples
/// ```
/// use rigid_blocks::math::Vector2;
///
/// let a = Vector2::new(3.0, 4.0);
/// assert_eq!(a.length(), 5.0);
/// assert_eq!(a.dot(Vector2::new(1.0, 0.0)), 3.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    pub const ZERO: Vector2 = Vector2 { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Vector2 { x, y }
    }

    /// Dot product.
    pub fn dot(self, other: Vector2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// The z component of the 3D cross product of two in-plane vectors.
    ///
    /// This is the scalar that couples linear and angular quantities in 2D:
    /// torque is `cross(r, f)` and the velocity of a material point is
    /// `v + omega * perp(r)`.
    pub fn cross(self, other: Vector2) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// The vector rotated 90 degrees counter-clockwise.
    ///
    /// `omega * r.perp()` is the angular contribution to a point velocity,
    /// and the perpendicular of a contact normal is its tangent direction.
    pub fn perp(self) -> Vector2 {
        Vector2::new(-self.y, self.x)
    }

    pub fn length_squared(self) -> f64 {
        self.dot(self)
    }

    pub fn length(self) -> f64 {
        self.length_squared().sqrt()
    }

    pub fn distance_squared(self, other: Vector2) -> f64 {
        (other - self).length_squared()
    }

    pub fn distance(self, other: Vector2) -> f64 {
        (other - self).length()
    }

    /// Returns the unit vector in this direction, or `fallback` when the
    /// length is too small to divide by.
    ///
    /// Degenerate directions show up when two block centres coincide exactly;
    /// callers pick a deterministic fallback so contact normals are never NaN.
    pub fn normalize_or(self, fallback: Vector2) -> Vector2 {
        let len = self.length();
        if len < 1e-12 {
            fallback
        } else {
            self * (1.0 / len)
        }
    }
}

impl Add for Vector2 {
    type Output = Vector2;
    fn add(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vector2 {
    fn add_assign(&mut self, rhs: Vector2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vector2 {
    type Output = Vector2;
    fn sub(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vector2 {
    fn sub_assign(&mut self, rhs: Vector2) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Neg for Vector2 {
    type Output = Vector2;
    fn neg(self) -> Vector2 {
        Vector2::new(-self.x, -self.y)
    }
}

impl Mul<f64> for Vector2 {
    type Output = Vector2;
    fn mul(self, rhs: f64) -> Vector2 {
        Vector2::new(self.x * rhs, self.y * rhs)
    }
}

impl Mul<Vector2> for f64 {
    type Output = Vector2;
    fn mul(self, rhs: Vector2) -> Vector2 {
        rhs * self
    }
}
