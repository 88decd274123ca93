// src/collision/contact.rs

use crate::math::Vector2;

/// Warm-start key for a contact: the stable body identifiers plus the
/// boundary-block indices that produced the contact point.
///
/// The key is topological on purpose. Matching last step's contacts by
/// floating-point position is unreliable (hashing near-equal coordinates is
/// unstable), whereas a feature pair persists across steps for as long as
/// the same two blocks stay in contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContactKey {
    pub body_a: usize,
    pub body_b: usize,
    pub block_a: usize,
    pub block_b: usize,
}

/// A detected contact point between two bodies.
///
/// Contacts are rebuilt every collision pass; only the accumulated impulses
/// survive between steps, carried through the warm-start map under the
/// contact's key. The normal points from body A towards body B and the
/// tangent is its counter-clockwise perpendicular, so a positive
/// `lambda_n` always pushes the bodies apart.
#[derive(Debug, Clone, Copy)]
pub struct Contact {
    /// Slot of body A in the system's body list (always less than `body_b`).
    pub body_a: usize,
    /// Slot of body B in the system's body list.
    pub body_b: usize,
    /// Stable warm-start key for this contact.
    pub key: ContactKey,
    /// World-space contact point, midway between the two block centres.
    pub point: Vector2,
    /// Unit separation normal, from A to B.
    pub normal: Vector2,
    /// Unit tangent, the friction direction.
    pub tangent: Vector2,
    /// Overlap depth along the normal; fed back as a stabilization bias.
    pub depth: f64,
    /// Relative normal velocity at detection time (negative when the bodies
    /// approach). The restitution target is measured against this.
    pub rel_vn0: f64,
    /// Accumulated normal impulse magnitude; never negative.
    pub lambda_n: f64,
    /// Accumulated friction impulse, clamped to the Coulomb box.
    pub lambda_t: f64,
}
