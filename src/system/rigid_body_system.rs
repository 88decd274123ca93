// src/system/rigid_body_system.rs

use std::time::Instant;

use log::info;
use rand::{rng, Rng};

use crate::bodies::RigidBody;
use crate::collision::CollisionProcessor;
use crate::errors::PhysicsError;
use crate::geometry::Block;
use crate::math::Vector2;
use crate::spatial::SpatialHash;

/// Maintains the list of rigid bodies and drives one simulation step:
/// gravity into the force accumulators, collision processing, then symplectic
/// Euler integration of every body.
///
/// The system owns the body identifier allocator; identifiers are unique for
/// the lifetime of the system and only recycled by `clear`.
#[derive(Debug)]
pub struct RigidBodySystem {
    /// The simulated bodies. Read for rendering and inspection; pose changes
    /// must go through the provided methods so the cached transforms stay
    /// valid.
    pub bodies: Vec<RigidBody>,
    next_index: usize,
    /// Collision pipeline and its tunable parameters.
    pub processor: CollisionProcessor,
    broad_phase: Option<SpatialHash>,

    /// When false no gravity is applied; external forces still are.
    pub use_gravity: bool,
    /// Gravitational acceleration magnitude.
    pub gravity_amount: f64,
    /// Direction of gravity in degrees; the force direction is
    /// `(cos angle, sin angle)`, so 90 points down in image coordinates
    /// (rows grow downward) and 270 points down in y-up coordinates.
    pub gravity_angle: f64,

    /// Seconds of simulated time since the last reset.
    pub simulation_time: f64,
    /// Wall-clock seconds the last step took.
    pub compute_time: f64,
    /// Wall-clock seconds of all steps since the last reset.
    pub total_compute_time: f64,
}

impl Default for RigidBodySystem {
    fn default() -> Self {
        Self::new()
    }
}

impl RigidBodySystem {
    pub fn new() -> Self {
        RigidBodySystem {
            bodies: Vec::new(),
            next_index: 0,
            processor: CollisionProcessor::default(),
            broad_phase: None,
            use_gravity: true,
            gravity_amount: 9.8,
            gravity_angle: 90.0,
            simulation_time: 0.0,
            compute_time: 0.0,
            total_compute_time: 0.0,
        }
    }

    /// Sets up the broad-phase grid for a scene of the given extent.
    /// Until this is called, collision processing falls back to testing all
    /// body pairs.
    pub fn init_broad_phase(
        &mut self,
        width: f64,
        height: f64,
        cells_per_row: usize,
    ) -> Result<(), PhysicsError> {
        self.broad_phase = Some(SpatialHash::new(width, height, cells_per_row)?);
        Ok(())
    }

    /// Constructs a rigid body from block lists and adds it to the system,
    /// returning its allocated identifier.
    pub fn add_body(
        &mut self,
        blocks: Vec<Block>,
        boundary_blocks: Vec<Block>,
    ) -> Result<usize, PhysicsError> {
        let index = self.next_index;
        let body = RigidBody::new(blocks, boundary_blocks, index)?;
        self.next_index += 1;
        info!(
            "added body {}: {} blocks, {} boundary, mass {:.3}{}",
            index,
            body.blocks().len(),
            body.boundary_blocks().len(),
            body.mass_linear,
            if body.pinned { " (pinned)" } else { "" }
        );
        self.bodies.push(body);
        Ok(index)
    }

    /// Adds a copy of an existing body under a fresh identifier. The copy
    /// shares the original's block storage but carries its own bounding
    /// volume hierarchy and dynamic state.
    pub fn spawn_copy(&mut self, body_index: usize) -> Result<usize, PhysicsError> {
        let source = self
            .bodies
            .iter()
            .find(|b| b.index == body_index)
            .ok_or(PhysicsError::UnknownBody(body_index))?;
        let index = self.next_index;
        let copy = source.duplicate(index)?;
        self.next_index += 1;
        self.bodies.push(copy);
        Ok(index)
    }

    /// Removes the body with the given identifier.
    pub fn remove_body(&mut self, body_index: usize) -> Result<(), PhysicsError> {
        let slot = self
            .bodies
            .iter()
            .position(|b| b.index == body_index)
            .ok_or(PhysicsError::UnknownBody(body_index))?;
        self.bodies.remove(slot);
        Ok(())
    }

    /// The identifier of the first body containing the given world point,
    /// if any. Used for mouse picking.
    pub fn pick_body(&self, point_w: Vector2) -> Option<usize> {
        self.bodies
            .iter()
            .find(|b| b.intersect(point_w))
            .map(|b| b.index)
    }

    /// Applies a small random velocity perturbation to every unpinned body.
    pub fn jiggle(&mut self) {
        let mut rng = rng();
        for body in &mut self.bodies {
            if body.pinned {
                continue;
            }
            body.v.x += rng.random_range(-1.0..1.0);
            body.v.y += rng.random_range(-1.0..1.0);
            body.omega += rng.random_range(-1.0..1.0);
            body.asleep = false;
        }
    }

    /// Advances the whole system by `dt` seconds: gravity, collision
    /// processing, then integration of every body.
    ///
    /// # Errors
    /// Returns an error for a non-positive or non-finite `dt`; the system
    /// state is unchanged in that case.
    pub fn advance_time(&mut self, dt: f64) -> Result<(), PhysicsError> {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(PhysicsError::InvalidTimeStep(dt));
        }
        let start = Instant::now();

        if self.use_gravity {
            let theta = self.gravity_angle.to_radians();
            let direction = Vector2::new(theta.cos(), theta.sin());
            for body in &mut self.bodies {
                if body.pinned || body.asleep {
                    continue;
                }
                // gravity goes straight into the accumulator, no torque
                body.force += direction * (body.mass_linear * self.gravity_amount);
            }
        }

        if let Some(hash) = &mut self.broad_phase {
            if self.processor.params.use_spatial_hash {
                hash.rebuild(&mut self.bodies);
            }
        }
        self.processor
            .process_collisions(&mut self.bodies, self.broad_phase.as_ref(), dt)?;

        for body in &mut self.bodies {
            body.advance_time(dt);
        }

        self.compute_time = start.elapsed().as_secs_f64();
        self.total_compute_time += self.compute_time;
        self.simulation_time += dt;
        Ok(())
    }

    /// Restores every body to its initial pose with zero velocity and drops
    /// the collision processor's contact history. Warm-start continuity is
    /// intentionally broken: a reset must not carry stale impulses forward.
    pub fn reset(&mut self) {
        for body in &mut self.bodies {
            body.reset();
        }
        self.processor.reset();
        self.simulation_time = 0.0;
        self.compute_time = 0.0;
        self.total_compute_time = 0.0;
    }

    /// Removes all bodies and recycles the identifier allocator.
    pub fn clear(&mut self) {
        self.bodies.clear();
        self.next_index = 0;
        self.reset();
    }
}
