// src/bodies/rigid_body.rs

use std::sync::Arc;

use crate::errors::PhysicsError;
use crate::geometry::{Block, BvNode};
use crate::math::Vector2;

use super::RigidTransform;

/// A 2D rigid body built from image-sampled blocks.
///
/// Interior blocks define mass properties and the pinned test; boundary
/// blocks (the outer silhouette) feed the bounding volume hierarchy used by
/// collision queries. Both lists are recentred about the centre of mass at
/// construction and shared read-only from then on: duplicated bodies share
/// the block storage but always build their own hierarchy.
#[derive(Debug)]
pub struct RigidBody {
    /// Stable identifier, allocated by the owning system. Used as a solver
    /// ordering and warm-start key.
    pub index: usize,
    blocks: Arc<Vec<Block>>,
    boundary_blocks: Arc<Vec<Block>>,
    /// Root of the bounding volume hierarchy over the boundary blocks.
    pub root: BvNode,

    /// Initial centre of mass in world coordinates, restored by `reset`.
    pub x0: Vector2,
    /// Centre of mass in world coordinates.
    pub x: Vector2,
    /// Orientation: signed angle about the view-plane normal, radians.
    pub theta: f64,
    /// Linear velocity.
    pub v: Vector2,
    /// Angular velocity, radians per second.
    pub omega: f64,

    /// Force accumulator, cleared at the end of every integration step.
    pub force: Vector2,
    /// Torque accumulator, cleared at the end of every integration step.
    pub torque: f64,

    pub mass_linear: f64,
    /// Scalar rotational inertia about the centre of mass.
    pub mass_angular: f64,
    /// Inverse linear mass; zero iff pinned.
    pub minv: f64,
    /// Inverse angular mass; zero iff pinned.
    pub jinv: f64,
    /// True when every interior block is a shade of blue: the body is
    /// immovable scene geometry.
    pub pinned: bool,
    /// Rest flag. Sleeping bodies are skipped by external force application
    /// but still take part in collision detection and resolution.
    pub asleep: bool,
    /// Broad-phase cells this body occupied at the last grid rebuild.
    pub bucket_keys: Vec<i64>,

    transform_b2w: RigidTransform,
    transform_w2b: RigidTransform,
}

impl RigidBody {
    /// Bodies with less kinetic energy than this are considered at rest.
    pub const KINETIC_ENERGY_THRESHOLD: f64 = 1e-6;

    /// Fallback inertia factor for a single-block body: the inertia of a
    /// unit square plate, `m * (1 + 1) / 12`.
    const SINGLE_BLOCK_INERTIA: f64 = 2.0 / 12.0;

    /// Creates a rigid body from interior and boundary block lists.
    ///
    /// Computes the colour-weighted centre of mass, recentres every block's
    /// local position around it, derives the scalar rotational inertia, and
    /// builds the bounding volume hierarchy.
    ///
    /// # Errors
    /// Returns an error if either block list is empty, or if the total
    /// colour mass fails to be positive (possible only with non-finite
    /// colour data).
    pub fn new(
        mut blocks: Vec<Block>,
        mut boundary_blocks: Vec<Block>,
        index: usize,
    ) -> Result<Self, PhysicsError> {
        if blocks.is_empty() || boundary_blocks.is_empty() {
            return Err(PhysicsError::EmptyGeometry);
        }

        let mut mass_linear = 0.0;
        let mut weighted = Vector2::ZERO;
        for b in &blocks {
            let mass = b.colour_mass();
            mass_linear += mass;
            weighted += b.grid_position() * mass;
        }
        if !(mass_linear > 0.0) {
            return Err(PhysicsError::ZeroTotalMass);
        }
        let x0 = weighted * (1.0 / mass_linear);

        for b in blocks.iter_mut().chain(boundary_blocks.iter_mut()) {
            b.p_b = b.grid_position() - x0;
        }

        let mut mass_angular = 0.0;
        for b in &blocks {
            mass_angular += b.colour_mass() * b.p_b.length_squared();
        }
        // a lone block has zero second moment about its own centre
        if blocks.len() == 1 {
            mass_angular = blocks[0].colour_mass() * Self::SINGLE_BLOCK_INERTIA;
        }

        let pinned = blocks.iter().all(|b| b.colour.is_shade_of_blue());
        let (minv, jinv) = if pinned {
            (0.0, 0.0)
        } else {
            (1.0 / mass_linear, 1.0 / mass_angular)
        };

        let root = BvNode::build(&boundary_blocks).ok_or(PhysicsError::EmptyGeometry)?;

        let mut body = RigidBody {
            index,
            blocks: Arc::new(blocks),
            boundary_blocks: Arc::new(boundary_blocks),
            root,
            x0,
            x: x0,
            theta: 0.0,
            v: Vector2::ZERO,
            omega: 0.0,
            force: Vector2::ZERO,
            torque: 0.0,
            mass_linear,
            mass_angular,
            minv,
            jinv,
            pinned,
            asleep: false,
            bucket_keys: Vec::new(),
            transform_b2w: RigidTransform::default(),
            transform_w2b: RigidTransform::default(),
        };
        body.update_transforms();
        Ok(body)
    }

    /// Creates a copy of this body under a new identifier.
    ///
    /// Block storage is shared (it is read-only after construction), but the
    /// bounding volume hierarchy is rebuilt for the copy.
    pub fn duplicate(&self, index: usize) -> Result<Self, PhysicsError> {
        let root = BvNode::build(&self.boundary_blocks).ok_or(PhysicsError::EmptyGeometry)?;
        let mut body = RigidBody {
            index,
            blocks: Arc::clone(&self.blocks),
            boundary_blocks: Arc::clone(&self.boundary_blocks),
            root,
            x0: self.x0,
            x: self.x,
            theta: self.theta,
            v: self.v,
            omega: self.omega,
            force: Vector2::ZERO,
            torque: 0.0,
            mass_linear: self.mass_linear,
            mass_angular: self.mass_angular,
            minv: self.minv,
            jinv: self.jinv,
            pinned: self.pinned,
            asleep: self.asleep,
            bucket_keys: Vec::new(),
            transform_b2w: RigidTransform::default(),
            transform_w2b: RigidTransform::default(),
        };
        body.update_transforms();
        Ok(body)
    }

    /// Interior blocks, recentred about the centre of mass.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Silhouette blocks used for collision detection.
    pub fn boundary_blocks(&self) -> &[Block] {
        &self.boundary_blocks
    }

    /// The cached body-to-world transform for the current pose.
    pub fn transform_b2w(&self) -> &RigidTransform {
        &self.transform_b2w
    }

    /// The cached world-to-body transform for the current pose.
    pub fn transform_w2b(&self) -> &RigidTransform {
        &self.transform_w2b
    }

    fn update_transforms(&mut self) {
        self.transform_b2w = RigidTransform::new(self.theta, self.x);
        self.transform_w2b = self.transform_b2w.inverse();
    }

    /// Moves the body to a new pose and refreshes the cached transforms.
    ///
    /// This is the supported way for a host to place bodies (scene setup,
    /// factory spawning); writing `x` or `theta` directly would leave the
    /// transform caches stale.
    pub fn set_pose(&mut self, x: Vector2, theta: f64) {
        self.x = x;
        self.theta = theta;
        self.update_transforms();
    }

    /// Accumulates a world-space force applied at a world-space point, along
    /// with the torque it produces about the centre of mass.
    pub fn apply_contact_force_w(&mut self, point_w: Vector2, force_w: Vector2) {
        self.force += force_w;
        let r = point_w - self.x;
        self.torque += r.cross(force_w);
    }

    /// Applies a world-space impulse at a world-space point directly to the
    /// velocity state. This is the velocity-level operation the contact
    /// solver uses; pinned bodies have zero inverse masses and are unmoved.
    pub fn apply_impulse_w(&mut self, point_w: Vector2, impulse_w: Vector2) {
        self.v += impulse_w * self.minv;
        let r = point_w - self.x;
        self.omega += self.jinv * r.cross(impulse_w);
    }

    /// Advances the body state by symplectic Euler: velocities first from
    /// the accumulated force and torque, then pose from the new velocities.
    /// The accumulators are cleared afterwards whether or not the body is
    /// pinned, and the cached transforms are refreshed.
    pub fn advance_time(&mut self, dt: f64) {
        if !self.pinned {
            self.omega += dt * self.torque * self.jinv;
            self.theta += dt * self.omega;
            self.v += self.force * (self.minv * dt);
            self.x += self.v * dt;
            self.update_transforms();
        }
        self.force = Vector2::ZERO;
        self.torque = 0.0;
    }

    /// Total kinetic energy, `0.5 m |v|^2 + 0.5 I omega^2`.
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass_linear * self.v.length_squared()
            + 0.5 * self.mass_angular * self.omega * self.omega
    }

    /// True when the body's kinetic energy is below the rest threshold.
    pub fn is_resting(&self) -> bool {
        self.kinetic_energy() < Self::KINETIC_ENERGY_THRESHOLD
    }

    /// Velocity of a material point of this body, given in world
    /// coordinates: the linear velocity plus the angular contribution
    /// `omega x r`.
    pub fn spatial_velocity(&self, point_w: Vector2) -> Vector2 {
        let r = point_w - self.x;
        self.v + r.perp() * self.omega
    }

    /// Whether a world point lies within `Block::RADIUS` of any interior
    /// block, culled first by the root bounding disc. Used for picking.
    pub fn intersect(&self, point_w: Vector2) -> bool {
        let p_b = self.transform_w2b.transform_point(point_w);
        if !self.root.disc.contains(p_b) {
            return false;
        }
        self.blocks
            .iter()
            .any(|b| b.p_b.distance_squared(p_b) < Block::RADIUS * Block::RADIUS)
    }

    /// Restores the initial pose and zero velocity, and refreshes the cached
    /// transforms.
    pub fn reset(&mut self) {
        self.x = self.x0;
        self.theta = 0.0;
        self.v = Vector2::ZERO;
        self.omega = 0.0;
        self.force = Vector2::ZERO;
        self.torque = 0.0;
        self.asleep = false;
        self.update_transforms();
    }
}
