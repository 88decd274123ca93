// src/geometry/bvnode.rs

use std::cell::Cell;

use crate::math::Vector2;

use super::{Block, Disc};

/// A node of the bounding volume hierarchy built over a body's boundary
/// blocks.
///
/// The tree is strictly binary: a node is either a leaf wrapping exactly one
/// block, or an interior node with exactly two children. It is built once at
/// body construction over block-local positions and never rebuilt; because
/// the discs live in the body frame, a pose change never invalidates them.
///
/// `visit_id` is collision-query bookkeeping: the processor stamps every node
/// whose disc test passed during the current step, and `visit_boundary` walks
/// the stamps afterwards to report how deep the query actually descended.
#[derive(Debug)]
pub struct BvNode {
    pub disc: Disc,
    children: Option<Box<(BvNode, BvNode)>>,
    leaf_block: Option<usize>,
    visit_id: Cell<u64>,
}

impl BvNode {
    /// Builds the hierarchy over a non-empty slice of boundary blocks.
    /// Leaves store indices into that slice.
    ///
    /// Blocks are recursively partitioned at the midpoint of the widest axis
    /// of their bounding box; a degenerate partition (every block on one
    /// side) falls back to an even split of the list, so construction always
    /// terminates.
    pub fn build(blocks: &[Block]) -> Option<BvNode> {
        if blocks.is_empty() {
            return None;
        }
        let entries: Vec<(usize, Vector2)> =
            blocks.iter().enumerate().map(|(n, b)| (n, b.p_b)).collect();
        Some(Self::build_recursive(entries))
    }

    fn build_recursive(mut entries: Vec<(usize, Vector2)>) -> BvNode {
        let disc = Disc::enclosing(entries.iter().map(|(_, p)| *p))
            .unwrap_or(Disc {
                centre: Vector2::ZERO,
                radius: Block::RADIUS,
            });
        if entries.len() == 1 {
            return BvNode {
                disc,
                children: None,
                leaf_block: Some(entries[0].0),
                visit_id: Cell::new(0),
            };
        }

        let mut min = entries[0].1;
        let mut max = entries[0].1;
        for (_, p) in &entries {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        let extent = max - min;
        let split_x = extent.x >= extent.y;
        let mid = if split_x {
            0.5 * (min.x + max.x)
        } else {
            0.5 * (min.y + max.y)
        };

        let axis_coord = |p: &Vector2| if split_x { p.x } else { p.y };
        let mut lower: Vec<(usize, Vector2)> = Vec::new();
        let mut upper: Vec<(usize, Vector2)> = Vec::new();
        for e in &entries {
            if axis_coord(&e.1) < mid {
                lower.push(*e);
            } else {
                upper.push(*e);
            }
        }

        if lower.is_empty() || upper.is_empty() {
            // All blocks landed on one side of the midpoint (coincident or
            // near-coincident positions). Split the list evenly instead.
            entries.sort_by(|a, b| {
                axis_coord(&a.1)
                    .partial_cmp(&axis_coord(&b.1))
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(a.0.cmp(&b.0))
            });
            let half = entries.len() / 2;
            upper = entries.split_off(half);
            lower = entries;
        }

        BvNode {
            disc,
            children: Some(Box::new((
                Self::build_recursive(lower),
                Self::build_recursive(upper),
            ))),
            leaf_block: None,
            visit_id: Cell::new(0),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.leaf_block.is_some()
    }

    /// The boundary-block index at this node, if it is a leaf.
    pub fn leaf_block(&self) -> Option<usize> {
        self.leaf_block
    }

    pub fn children(&self) -> Option<(&BvNode, &BvNode)> {
        self.children.as_deref().map(|c| (&c.0, &c.1))
    }

    /// Stamps this node as tested during the given collision pass.
    pub fn mark_visited(&self, visit: u64) {
        self.visit_id.set(visit);
    }

    pub fn visit_id(&self) -> u64 {
        self.visit_id.get()
    }

    /// Visits every disc in the tree, depth first.
    pub fn for_each_disc(&self, f: &mut impl FnMut(&Disc)) {
        f(&self.disc);
        if let Some((a, b)) = self.children() {
            a.for_each_disc(f);
            b.for_each_disc(f);
        }
    }

    /// Visits the discs at the frontier reached by the collision pass tagged
    /// `visit`: descent stops at the first level where a child was never
    /// stamped.
    pub fn visit_boundary(&self, visit: u64, f: &mut impl FnMut(&Disc)) {
        match self.children() {
            None => f(&self.disc),
            Some((a, b)) => {
                if a.visit_id.get() != visit || b.visit_id.get() != visit {
                    f(&self.disc);
                } else {
                    a.visit_boundary(visit, f);
                    b.visit_boundary(visit, f);
                }
            }
        }
    }
}
