// src/geometry/disc.rs

use crate::math::Vector2;

use super::Block;

/// A bounding circle in the owning body's frame.
///
/// Discs are derived from block-local positions, so they are valid for the
/// lifetime of the body's geometry and never need rebuilding; world-space
/// queries transform the query point (or the disc centre) through the body's
/// cached rigid transforms instead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Disc {
    pub centre: Vector2,
    pub radius: f64,
}

impl Disc {
    /// Computes a disc covering every block in the slice: centred at the
    /// centroid of the block positions, with radius reaching the farthest
    /// block centre plus `Block::RADIUS`.
    ///
    /// Returns `None` for an empty slice.
    pub fn enclosing_blocks(blocks: &[Block]) -> Option<Disc> {
        Self::enclosing(blocks.iter().map(|b| b.p_b))
    }

    /// Computes a disc covering every position in the iterator, padded by
    /// `Block::RADIUS`.
    pub fn enclosing(positions: impl Iterator<Item = Vector2> + Clone) -> Option<Disc> {
        let mut count = 0usize;
        let mut sum = Vector2::ZERO;
        for p in positions.clone() {
            sum += p;
            count += 1;
        }
        if count == 0 {
            return None;
        }
        let centre = sum * (1.0 / count as f64);
        let mut max_sq = 0.0f64;
        for p in positions {
            max_sq = max_sq.max(centre.distance_squared(p));
        }
        Some(Disc {
            centre,
            radius: max_sq.sqrt() + Block::RADIUS,
        })
    }

    /// Point-containment test, in the same frame as the disc centre.
    pub fn contains(&self, p: Vector2) -> bool {
        self.centre.distance_squared(p) <= self.radius * self.radius
    }

    /// Overlap test between two discs whose centres have already been
    /// brought into a common (world) frame.
    pub fn overlaps(centre_a: Vector2, radius_a: f64, centre_b: Vector2, radius_b: f64) -> bool {
        let r = radius_a + radius_b;
        centre_a.distance_squared(centre_b) <= r * r
    }
}
