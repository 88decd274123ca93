// src/spatial/spatial_hash.rs

use std::collections::HashMap;

use log::trace;

use crate::bodies::RigidBody;
use crate::errors::PhysicsError;
use crate::math::Vector2;

/// Uniform-grid broad phase over a known scene rectangle.
///
/// The grid maps integer cell keys to the bodies currently overlapping that
/// cell and is fully rebuilt every step; nothing is carried over, so a moved
/// body can never leave a stale entry behind. Pinned bodies are inserted by
/// every boundary-block position so large static walls cover their whole
/// footprint, while moving bodies are inserted by centre of mass only.
#[derive(Debug)]
pub struct SpatialHash {
    cell_width: f64,
    cols: i64,
    rows: i64,
    cells: HashMap<i64, Vec<usize>>,
}

impl SpatialHash {
    /// Creates a grid covering `width` x `height` world units with
    /// `cells_per_row` columns; cells are square, so the row count follows
    /// from the height.
    ///
    /// # Errors
    /// Returns an error for a non-positive extent or a zero cell count.
    pub fn new(width: f64, height: f64, cells_per_row: usize) -> Result<Self, PhysicsError> {
        if !(width > 0.0) || !(height > 0.0) || cells_per_row == 0 {
            return Err(PhysicsError::InvalidGrid);
        }
        let cell_width = width / cells_per_row as f64;
        let rows = (height / cell_width).ceil().max(1.0) as i64;
        Ok(SpatialHash {
            cell_width,
            cols: cells_per_row as i64,
            rows,
            cells: HashMap::new(),
        })
    }

    /// The cell key for a world position. Positions outside the scene
    /// rectangle clamp to the nearest edge cell rather than failing.
    pub fn cell_key(&self, p: Vector2) -> i64 {
        let cx = ((p.x / self.cell_width).floor() as i64).clamp(0, self.cols - 1);
        let cy = ((p.y / self.cell_width).floor() as i64).clamp(0, self.rows - 1);
        cy * self.cols + cx
    }

    /// Discards the previous grid contents and re-inserts every body,
    /// recording each body's occupied cells in its `bucket_keys`.
    pub fn rebuild(&mut self, bodies: &mut [RigidBody]) {
        self.cells.clear();
        for (slot, body) in bodies.iter_mut().enumerate() {
            let mut keys: Vec<i64> = Vec::new();
            if body.pinned {
                for block in body.boundary_blocks() {
                    let p_w = body.transform_b2w().transform_point(block.p_b);
                    let key = self.cell_key(p_w);
                    if !keys.contains(&key) {
                        keys.push(key);
                    }
                }
            } else {
                keys.push(self.cell_key(body.x));
            }
            for &key in &keys {
                self.cells.entry(key).or_default().push(slot);
            }
            body.bucket_keys = keys;
        }
        trace!(
            "spatial hash rebuilt: {} occupied cells for {} bodies",
            self.cells.len(),
            bodies.len()
        );
    }

    /// Body slots sharing the given cell; an unoccupied cell yields no
    /// candidates.
    pub fn bodies_in_cell(&self, key: i64) -> &[usize] {
        self.cells.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All pairs of body slots sharing at least one cell, with `a < b`,
    /// deduplicated and sorted. The sort makes downstream contact
    /// generation independent of hash-map iteration order.
    pub fn candidate_pairs(&self) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        for occupants in self.cells.values() {
            for (n, &a) in occupants.iter().enumerate() {
                for &b in &occupants[n + 1..] {
                    let pair = if a < b { (a, b) } else { (b, a) };
                    if pair.0 != pair.1 {
                        pairs.push(pair);
                    }
                }
            }
        }
        pairs.sort_unstable();
        pairs.dedup();
        pairs
    }
}
