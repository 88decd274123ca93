// src/geometry/block.rs

use crate::math::Vector2;

/// An RGB colour sample in `[0, 1]` per channel.
///
/// Colour carries semantic weight in this system: darkness determines a
/// block's mass, and an all-blue body is treated as pinned scene geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Colour {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Colour {
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Colour { r, g, b }
    }

    /// True for colours on the grey-to-blue line (equal red and green, blue
    /// dominant). Bodies made entirely of such blocks are immovable walls.
    pub fn is_shade_of_blue(&self) -> bool {
        self.r == self.g && self.r < self.b
    }
}

/// The smallest rigid geometric unit: one grid cell sampled from an image.
///
/// Grid coordinates are `(i, j, k)` = (row, column, layer); `k` is zero for
/// the planar scenes this crate simulates. `p_b` is the block centre relative
/// to the owning body's centre of mass, assigned once at body construction
/// and immutable afterwards; only the body's global pose changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Block {
    pub i: i32,
    pub j: i32,
    pub k: i32,
    pub colour: Colour,
    /// Position in the owning body's frame. Set by `RigidBody` construction.
    pub p_b: Vector2,
}

impl Block {
    /// Half the side of a grid cell; blocks are treated as discs of this
    /// radius for all collision queries.
    pub const RADIUS: f64 = 0.5;

    /// Smallest mass a block can contribute. A near-white sample still has
    /// to carry some weight or a body built from it would have a singular
    /// mass matrix.
    pub const MIN_COLOUR_MASS: f64 = 1e-3;

    pub fn new(i: i32, j: i32, colour: Colour) -> Self {
        Block {
            i,
            j,
            k: 0,
            colour,
            p_b: Vector2::ZERO,
        }
    }

    /// The mass weight derived from the block's colour: darker is heavier.
    ///
    /// # Examples
    /// ```
    /// use rigid_blocks::geometry::{Block, Colour};
    ///
    /// let dark = Block::new(0, 0, Colour::new(0.0, 0.0, 0.0));
    /// let light = Block::new(0, 0, Colour::new(0.8, 0.8, 0.8));
    /// assert!(dark.colour_mass() > light.colour_mass());
    /// ```
    pub fn colour_mass(&self) -> f64 {
        let intensity = (self.colour.r + self.colour.g + self.colour.b) as f64 / 3.0;
        (1.0 - intensity).max(Self::MIN_COLOUR_MASS)
    }

    /// The block centre in grid space, before recentring about a body's
    /// centre of mass. Column is x, row is y.
    pub fn grid_position(&self) -> Vector2 {
        Vector2::new(self.j as f64, self.i as f64)
    }
}
