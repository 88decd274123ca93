// src/system/rigid_body_system_tests.rs

use crate::assert_float_eq;
use crate::errors::PhysicsError;
use crate::geometry::{Block, Colour};
use crate::math::Vector2;
use crate::system::RigidBodySystem;

fn grey() -> Colour {
    Colour::new(0.2, 0.2, 0.2)
}

fn blue() -> Colour {
    Colour::new(0.0, 0.0, 1.0)
}

fn single_block(i: i32, j: i32, colour: Colour) -> (Vec<Block>, Vec<Block>) {
    let b = Block::new(i, j, colour);
    (vec![b], vec![b])
}

fn wall_row(i: i32, j0: i32, len: i32) -> (Vec<Block>, Vec<Block>) {
    let blocks: Vec<Block> = (j0..j0 + len).map(|j| Block::new(i, j, blue())).collect();
    (blocks.clone(), blocks)
}

#[test]
fn test_body_indices_are_allocated_monotonically() {
    let mut system = RigidBodySystem::new();
    let (b0, n0) = single_block(0, 0, grey());
    let (b1, n1) = single_block(5, 5, grey());
    assert_eq!(system.add_body(b0, n0).unwrap(), 0);
    assert_eq!(system.add_body(b1, n1).unwrap(), 1);

    system.clear();
    assert!(system.bodies.is_empty());
    let (b2, n2) = single_block(0, 0, grey());
    // the allocator recycles after clear
    assert_eq!(system.add_body(b2, n2).unwrap(), 0);
}

#[test]
fn test_invalid_dt_is_rejected() {
    let mut system = RigidBodySystem::new();
    assert_eq!(
        system.advance_time(-0.1).unwrap_err(),
        PhysicsError::InvalidTimeStep(-0.1)
    );
}

#[test]
fn test_free_fall_scenario() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut system = RigidBodySystem::new();
    system.gravity_amount = 9.8;
    system.gravity_angle = 270.0; // straight down in y-up coordinates
    let (blocks, boundary) = single_block(0, 0, grey());
    system.add_body(blocks, boundary).unwrap();

    for _ in 0..100 {
        system.advance_time(0.01).unwrap();
    }
    let body = &system.bodies[0];
    assert_float_eq(body.v.y, -9.8, 1e-9, Some("vertical speed after 1s of free fall"));
    assert_float_eq(body.v.x, 0.0, 1e-12, Some("no horizontal drift"));
    assert_float_eq(system.simulation_time, 1.0, 1e-9, None);
}

#[test]
fn test_gravity_skips_pinned_bodies() {
    let mut system = RigidBodySystem::new();
    let (blocks, boundary) = wall_row(10, 0, 5);
    system.add_body(blocks, boundary).unwrap();
    for _ in 0..10 {
        system.advance_time(0.01).unwrap();
    }
    let wall = &system.bodies[0];
    assert!(wall.pinned);
    assert_eq!(wall.v, Vector2::ZERO);
    assert_eq!(wall.x, wall.x0);
}

#[test]
fn test_resting_contact_scenario() {
    let mut system = RigidBodySystem::new();
    // image coordinates: rows grow downward, so gravity at 90 degrees pulls
    // towards larger i
    system.gravity_angle = 90.0;
    system.gravity_amount = 9.8;
    system.init_broad_phase(20.0, 20.0, 3).unwrap();

    let (floor_blocks, floor_boundary) = wall_row(10, 0, 20);
    system.add_body(floor_blocks, floor_boundary).unwrap();
    let (blocks, boundary) = single_block(8, 5, grey());
    system.add_body(blocks, boundary).unwrap();

    for _ in 0..300 {
        system.advance_time(0.01).unwrap();
    }

    let body = &system.bodies[1];
    // settled: negligible vertical motion, resting on the floor surface at
    // y = 9 (block centres one diameter apart) without sinking through
    assert!(body.v.y.abs() < 0.05, "vertical velocity {} did not settle", body.v.y);
    assert!(body.x.y < 9.2, "body sank into the floor: y = {}", body.x.y);
    assert!(body.x.y > 8.5, "body hovering unexpectedly: y = {}", body.x.y);
    assert!(!system.processor.contacts.is_empty());
}

#[test]
fn test_pick_body() {
    let mut system = RigidBodySystem::new();
    let (blocks, boundary) = single_block(4, 9, grey());
    let index = system.add_body(blocks, boundary).unwrap();
    assert_eq!(system.pick_body(Vector2::new(9.0, 4.0)), Some(index));
    assert_eq!(system.pick_body(Vector2::new(50.0, 50.0)), None);
}

#[test]
fn test_jiggle_leaves_pinned_bodies_alone() {
    let mut system = RigidBodySystem::new();
    let (wall_blocks, wall_boundary) = wall_row(10, 0, 5);
    system.add_body(wall_blocks, wall_boundary).unwrap();
    let (blocks, boundary) = single_block(0, 0, grey());
    system.add_body(blocks, boundary).unwrap();

    system.jiggle();
    assert_eq!(system.bodies[0].v, Vector2::ZERO);
    assert_eq!(system.bodies[0].omega, 0.0);
    let moved = &system.bodies[1];
    assert!(moved.v != Vector2::ZERO || moved.omega != 0.0);
}

#[test]
fn test_reset_restores_bodies_and_clears_history() {
    let mut system = RigidBodySystem::new();
    system.gravity_angle = 90.0;
    let (floor_blocks, floor_boundary) = wall_row(10, 0, 20);
    system.add_body(floor_blocks, floor_boundary).unwrap();
    let (blocks, boundary) = single_block(8, 5, grey());
    system.add_body(blocks, boundary).unwrap();

    for _ in 0..200 {
        system.advance_time(0.01).unwrap();
    }
    system.reset();

    for body in &system.bodies {
        assert_eq!(body.x, body.x0);
        assert_eq!(body.v, Vector2::ZERO);
        assert_eq!(body.omega, 0.0);
    }
    assert!(system.processor.contacts.is_empty());
    assert_eq!(system.simulation_time, 0.0);
    assert_eq!(system.total_compute_time, 0.0);
}

#[test]
fn test_spawn_copy_allocates_fresh_index() {
    let mut system = RigidBodySystem::new();
    let (blocks, boundary) = single_block(0, 0, grey());
    let original = system.add_body(blocks, boundary).unwrap();
    let copy = system.spawn_copy(original).unwrap();
    assert_ne!(original, copy);
    assert_eq!(system.bodies.len(), 2);
    assert_eq!(
        system.spawn_copy(99).unwrap_err(),
        PhysicsError::UnknownBody(99)
    );
}

#[test]
fn test_remove_body() {
    let mut system = RigidBodySystem::new();
    let (blocks, boundary) = single_block(0, 0, grey());
    let index = system.add_body(blocks, boundary).unwrap();
    system.remove_body(index).unwrap();
    assert!(system.bodies.is_empty());
    assert_eq!(
        system.remove_body(index).unwrap_err(),
        PhysicsError::UnknownBody(index)
    );
}

#[test]
fn test_determinism_across_runs() {
    let run = || {
        let mut system = RigidBodySystem::new();
        system.gravity_angle = 90.0;
        system.init_broad_phase(20.0, 20.0, 3).unwrap();
        let (floor_blocks, floor_boundary) = wall_row(10, 0, 20);
        system.add_body(floor_blocks, floor_boundary).unwrap();
        let (a_blocks, a_boundary) = single_block(7, 5, grey());
        system.add_body(a_blocks, a_boundary).unwrap();
        let (b_blocks, b_boundary) = single_block(5, 5, grey());
        system.add_body(b_blocks, b_boundary).unwrap();
        for _ in 0..150 {
            system.advance_time(0.01).unwrap();
        }
        system
            .bodies
            .iter()
            .map(|b| (b.x, b.theta, b.v, b.omega))
            .collect::<Vec<_>>()
    };
    assert_eq!(run(), run());
}

#[test]
fn test_compute_time_counters_accumulate() {
    let mut system = RigidBodySystem::new();
    let (blocks, boundary) = single_block(0, 0, grey());
    system.add_body(blocks, boundary).unwrap();
    system.advance_time(0.01).unwrap();
    assert!(system.compute_time >= 0.0);
    assert!(system.total_compute_time >= system.compute_time);
    system.advance_time(0.01).unwrap();
    assert!(system.total_compute_time >= system.compute_time);
}
