// src/collision/processor.rs

use std::collections::HashMap;
use std::time::Instant;

use log::debug;

use crate::bodies::RigidBody;
use crate::config::SolverParams;
use crate::errors::PhysicsError;
use crate::geometry::{Block, BvNode, Disc};
use crate::math::Vector2;
use crate::spatial::SpatialHash;

use super::{Contact, ContactKey};

/// Orchestrates the collision pipeline: broad phase, BVH narrow phase,
/// contact generation, warm starting, and the projected Gauss-Seidel solve.
///
/// The solve is strictly sequential. Each contact's impulse correction is
/// applied to both bodies before the next contact is visited, and contacts
/// are visited in generation order, so two runs over identical state produce
/// identical results.
#[derive(Debug)]
pub struct CollisionProcessor {
    /// Solver and broad-phase tuning knobs.
    pub params: SolverParams,
    /// Contacts found by the most recent pass. Read-only to callers.
    pub contacts: Vec<Contact>,
    /// Accumulated impulses from the previous pass, keyed by contact feature.
    warm_start: HashMap<ContactKey, (f64, f64)>,
    /// Stamp written into every BVH node the narrow phase tested this pass.
    visit: u64,
    /// Wall-clock seconds spent in broad + narrow phase, last pass.
    pub detect_time: f64,
    /// Wall-clock seconds spent warm starting and solving, last pass.
    pub solve_time: f64,
}

impl Default for CollisionProcessor {
    fn default() -> Self {
        Self::new(SolverParams::default())
    }
}

impl CollisionProcessor {
    pub fn new(params: SolverParams) -> Self {
        CollisionProcessor {
            params,
            contacts: Vec::new(),
            warm_start: HashMap::new(),
            visit: 0,
            detect_time: 0.0,
            solve_time: 0.0,
        }
    }

    /// The stamp used for BVH visitation during the most recent pass;
    /// `BvNode::visit_boundary` with this value reports how deep the
    /// narrow phase descended.
    pub fn visit_id(&self) -> u64 {
        self.visit
    }

    /// Runs one full collision pass over the bodies and resolves the
    /// detected contacts by applying impulses to the bodies' velocities.
    ///
    /// `broad_phase` should hold the already rebuilt spatial hash; when it is
    /// absent or disabled by `params.use_spatial_hash`, every body pair is
    /// tested.
    ///
    /// # Errors
    /// Returns an error for a non-positive or non-finite `dt`.
    pub fn process_collisions(
        &mut self,
        bodies: &mut [RigidBody],
        broad_phase: Option<&SpatialHash>,
        dt: f64,
    ) -> Result<(), PhysicsError> {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(PhysicsError::InvalidTimeStep(dt));
        }

        let detect_start = Instant::now();
        self.visit += 1;
        self.contacts.clear();

        let pairs = match broad_phase {
            Some(hash) if self.params.use_spatial_hash => hash.candidate_pairs(),
            _ => all_pairs(bodies.len()),
        };

        for (a, b) in pairs {
            debug_assert!(a < b);
            // two pinned bodies can overlap forever without consequence
            if bodies[a].pinned && bodies[b].pinned {
                continue;
            }
            collide_subtrees(
                &bodies[a].root,
                &bodies[b].root,
                &bodies[a],
                &bodies[b],
                a,
                b,
                self.visit,
                &mut self.contacts,
            );
        }
        self.detect_time = detect_start.elapsed().as_secs_f64();

        let solve_start = Instant::now();
        self.warm_start_contacts(bodies);
        self.solve(bodies, dt);
        self.store_warm_start();
        self.solve_time = solve_start.elapsed().as_secs_f64();

        debug!(
            "collision pass: {} contacts, detect {:.3e}s, solve {:.3e}s",
            self.contacts.len(),
            self.detect_time,
            self.solve_time
        );
        Ok(())
    }

    /// Drops all contact state, including warm-start history and timing.
    /// A reset simulation must not carry stale impulses forward.
    pub fn reset(&mut self) {
        self.contacts.clear();
        self.warm_start.clear();
        self.detect_time = 0.0;
        self.solve_time = 0.0;
    }

    /// Seeds each contact with last step's accumulated impulses and applies
    /// them immediately, so the iterative solve starts near the previous
    /// solution. Unmatched contacts start from zero.
    fn warm_start_contacts(&mut self, bodies: &mut [RigidBody]) {
        for contact in &mut self.contacts {
            if let Some(&(lambda_n, lambda_t)) = self.warm_start.get(&contact.key) {
                contact.lambda_n = lambda_n;
                contact.lambda_t = lambda_t;
                let impulse = contact.normal * lambda_n + contact.tangent * lambda_t;
                let (body_a, body_b) = pair_mut(bodies, contact.body_a, contact.body_b);
                body_a.apply_impulse_w(contact.point, -impulse);
                body_b.apply_impulse_w(contact.point, impulse);
            }
        }
    }

    /// Fixed-sweep projected Gauss-Seidel over the contact list.
    fn solve(&mut self, bodies: &mut [RigidBody], dt: f64) {
        for _ in 0..self.params.iterations {
            for contact in &mut self.contacts {
                solve_contact(contact, bodies, &self.params, dt);
            }
        }
    }

    fn store_warm_start(&mut self) {
        self.warm_start.clear();
        for contact in &self.contacts {
            self.warm_start
                .insert(contact.key, (contact.lambda_n, contact.lambda_t));
        }
    }
}

/// Every `(a, b)` with `a < b`: the O(n^2) fallback when the spatial hash is
/// disabled.
fn all_pairs(n: usize) -> Vec<(usize, usize)> {
    let mut pairs = Vec::with_capacity(n.saturating_sub(1) * n / 2);
    for a in 0..n {
        for b in a + 1..n {
            pairs.push((a, b));
        }
    }
    pairs
}

/// Mutable references to two distinct slots of the body list. Contact
/// generation guarantees `a < b`.
fn pair_mut(bodies: &mut [RigidBody], a: usize, b: usize) -> (&mut RigidBody, &mut RigidBody) {
    debug_assert!(a < b);
    let (head, tail) = bodies.split_at_mut(b);
    (&mut head[a], &mut tail[0])
}

/// Recursive disc-disc descent of two bodies' hierarchies, emitting a
/// contact for every pair of boundary blocks within `2 * Block::RADIUS`.
///
/// Both nodes are stamped with the pass's visit id when their discs overlap,
/// so `visit_boundary` can replay how deep the descent went.
#[allow(clippy::too_many_arguments)]
fn collide_subtrees(
    node_a: &BvNode,
    node_b: &BvNode,
    body_a: &RigidBody,
    body_b: &RigidBody,
    slot_a: usize,
    slot_b: usize,
    visit: u64,
    contacts: &mut Vec<Contact>,
) {
    let centre_a = body_a.transform_b2w().transform_point(node_a.disc.centre);
    let centre_b = body_b.transform_b2w().transform_point(node_b.disc.centre);
    if !Disc::overlaps(centre_a, node_a.disc.radius, centre_b, node_b.disc.radius) {
        return;
    }
    node_a.mark_visited(visit);
    node_b.mark_visited(visit);

    match (node_a.children(), node_b.children()) {
        (None, None) => {
            if let (Some(block_a), Some(block_b)) = (node_a.leaf_block(), node_b.leaf_block()) {
                emit_block_contact(block_a, block_b, body_a, body_b, slot_a, slot_b, contacts);
            }
        }
        (Some((left, right)), None) => {
            collide_subtrees(left, node_b, body_a, body_b, slot_a, slot_b, visit, contacts);
            collide_subtrees(right, node_b, body_a, body_b, slot_a, slot_b, visit, contacts);
        }
        (None, Some((left, right))) => {
            collide_subtrees(node_a, left, body_a, body_b, slot_a, slot_b, visit, contacts);
            collide_subtrees(node_a, right, body_a, body_b, slot_a, slot_b, visit, contacts);
        }
        (Some((a_left, a_right)), Some((b_left, b_right))) => {
            // descend the larger volume first to keep the prune tight
            if node_a.disc.radius >= node_b.disc.radius {
                collide_subtrees(a_left, node_b, body_a, body_b, slot_a, slot_b, visit, contacts);
                collide_subtrees(a_right, node_b, body_a, body_b, slot_a, slot_b, visit, contacts);
            } else {
                collide_subtrees(node_a, b_left, body_a, body_b, slot_a, slot_b, visit, contacts);
                collide_subtrees(node_a, b_right, body_a, body_b, slot_a, slot_b, visit, contacts);
            }
        }
    }
}

fn emit_block_contact(
    block_a: usize,
    block_b: usize,
    body_a: &RigidBody,
    body_b: &RigidBody,
    slot_a: usize,
    slot_b: usize,
    contacts: &mut Vec<Contact>,
) {
    let pa = body_a
        .transform_b2w()
        .transform_point(body_a.boundary_blocks()[block_a].p_b);
    let pb = body_b
        .transform_b2w()
        .transform_point(body_b.boundary_blocks()[block_b].p_b);

    let threshold = 2.0 * Block::RADIUS;
    let separation = pb - pa;
    let dist_sq = separation.length_squared();
    if dist_sq >= threshold * threshold {
        return;
    }

    let dist = dist_sq.sqrt();
    // coincident centres give no direction; pick a fixed one so the solve
    // stays deterministic and NaN free
    let normal = separation.normalize_or(Vector2::new(0.0, 1.0));
    let point = (pa + pb) * 0.5;
    let rel_vn0 = (body_b.spatial_velocity(point) - body_a.spatial_velocity(point)).dot(normal);

    contacts.push(Contact {
        body_a: slot_a,
        body_b: slot_b,
        key: ContactKey {
            body_a: body_a.index,
            body_b: body_b.index,
            block_a,
            block_b,
        },
        point,
        normal,
        tangent: normal.perp(),
        depth: threshold - dist,
        rel_vn0,
        lambda_n: 0.0,
        lambda_t: 0.0,
    });
}

/// One Gauss-Seidel update of a single contact: the normal impulse towards
/// the restitution/stabilization target with the accumulated value clamped
/// non-negative, then the friction impulse clamped to the Coulomb box.
fn solve_contact(contact: &mut Contact, bodies: &mut [RigidBody], params: &SolverParams, dt: f64) {
    let (body_a, body_b) = pair_mut(bodies, contact.body_a, contact.body_b);
    let ra = contact.point - body_a.x;
    let rb = contact.point - body_b.x;

    let k_n = effective_mass(body_a, body_b, ra, rb, contact.normal);
    if k_n <= 0.0 {
        return;
    }
    let k_t = effective_mass(body_a, body_b, ra, rb, contact.tangent);

    // relative velocity of B with respect to A at the contact point
    let rel_vel = |body_a: &RigidBody, body_b: &RigidBody| {
        (body_b.v + rb.perp() * body_b.omega) - (body_a.v + ra.perp() * body_a.omega)
    };

    // normal impulse: drive v_n to the bounce-plus-bias target, contact can
    // only push
    let v_n = rel_vel(body_a, body_b).dot(contact.normal);
    let bounce = params.restitution * (-contact.rel_vn0).max(0.0);
    let bias = params.baumgarte / dt * (contact.depth - params.penetration_slop).max(0.0);
    let target = bounce + bias;
    let unclamped = contact.lambda_n + (target - v_n) / k_n;
    let new_lambda_n = unclamped.max(0.0);
    let delta_n = new_lambda_n - contact.lambda_n;
    contact.lambda_n = new_lambda_n;

    let impulse = contact.normal * delta_n;
    body_a.apply_impulse_w(contact.point, -impulse);
    body_b.apply_impulse_w(contact.point, impulse);

    // friction impulse along the tangent, box clamped by the normal impulse
    if k_t <= 0.0 {
        return;
    }
    let v_t = rel_vel(body_a, body_b).dot(contact.tangent);
    let bound = params.friction * contact.lambda_n;
    let new_lambda_t = (contact.lambda_t - v_t / k_t).clamp(-bound, bound);
    let delta_t = new_lambda_t - contact.lambda_t;
    contact.lambda_t = new_lambda_t;

    let impulse = contact.tangent * delta_t;
    body_a.apply_impulse_w(contact.point, -impulse);
    body_b.apply_impulse_w(contact.point, impulse);
}

/// Inverse of the effective mass seen by an impulse along `dir` at the
/// contact point: `1/m_a + 1/m_b + (ra x dir)^2 / I_a + (rb x dir)^2 / I_b`.
/// Zero when both bodies are pinned.
fn effective_mass(
    body_a: &RigidBody,
    body_b: &RigidBody,
    ra: Vector2,
    rb: Vector2,
    dir: Vector2,
) -> f64 {
    let ra_x_dir = ra.cross(dir);
    let rb_x_dir = rb.cross(dir);
    body_a.minv + body_b.minv + body_a.jinv * ra_x_dir * ra_x_dir + body_b.jinv * rb_x_dir * rb_x_dir
}
