// src/bodies/rigid_transform.rs

use crate::math::Vector2;

/// A planar rigid transform: rotation by a signed angle followed by a
/// translation.
///
/// Bodies cache a body-to-world transform and its inverse; the pair is only
/// ever recomputed together, so the two stay exact mutual inverses across
/// every reachable pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidTransform {
    cos: f64,
    sin: f64,
    translation: Vector2,
}

impl Default for RigidTransform {
    fn default() -> Self {
        RigidTransform {
            cos: 1.0,
            sin: 0.0,
            translation: Vector2::ZERO,
        }
    }
}

impl RigidTransform {
    pub fn new(theta: f64, translation: Vector2) -> Self {
        RigidTransform {
            cos: theta.cos(),
            sin: theta.sin(),
            translation,
        }
    }

    /// Applies rotation and translation to a point.
    pub fn transform_point(&self, p: Vector2) -> Vector2 {
        Vector2::new(
            self.cos * p.x - self.sin * p.y + self.translation.x,
            self.sin * p.x + self.cos * p.y + self.translation.y,
        )
    }

    /// Applies only the rotation, for direction vectors.
    pub fn transform_vector(&self, v: Vector2) -> Vector2 {
        Vector2::new(self.cos * v.x - self.sin * v.y, self.sin * v.x + self.cos * v.y)
    }

    /// The inverse transform: `t.inverse().transform_point(t.transform_point(p)) == p`
    /// up to floating-point rounding.
    pub fn inverse(&self) -> RigidTransform {
        // transpose of the rotation, applied to the negated translation
        let tx = -(self.cos * self.translation.x + self.sin * self.translation.y);
        let ty = -(-self.sin * self.translation.x + self.cos * self.translation.y);
        RigidTransform {
            cos: self.cos,
            sin: -self.sin,
            translation: Vector2::new(tx, ty),
        }
    }
}
