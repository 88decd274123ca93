// src/geometry/disc_tests.rs

use crate::assert_float_eq;
use crate::geometry::{Block, Colour, Disc};
use crate::math::Vector2;

fn block_at(p: Vector2) -> Block {
    let mut b = Block::new(0, 0, Colour::new(0.0, 0.0, 0.0));
    b.p_b = p;
    b
}

#[test]
fn test_enclosing_single_block() {
    let blocks = [block_at(Vector2::new(2.0, -1.0))];
    let disc = Disc::enclosing_blocks(&blocks).unwrap();
    assert_eq!(disc.centre, Vector2::new(2.0, -1.0));
    assert_float_eq(disc.radius, Block::RADIUS, 1e-12, None);
}

#[test]
fn test_enclosing_covers_all_blocks() {
    let blocks = [
        block_at(Vector2::new(-2.0, 0.0)),
        block_at(Vector2::new(2.0, 0.0)),
        block_at(Vector2::new(0.0, 1.0)),
    ];
    let disc = Disc::enclosing_blocks(&blocks).unwrap();
    for b in &blocks {
        // every block centre sits within the disc with the block-radius padding
        assert!(disc.centre.distance(b.p_b) + Block::RADIUS <= disc.radius + 1e-12);
    }
}

#[test]
fn test_enclosing_empty_is_none() {
    assert!(Disc::enclosing_blocks(&[]).is_none());
}

#[test]
fn test_contains() {
    let disc = Disc {
        centre: Vector2::new(1.0, 1.0),
        radius: 2.0,
    };
    assert!(disc.contains(Vector2::new(1.0, 1.0)));
    assert!(disc.contains(Vector2::new(2.5, 1.0)));
    assert!(!disc.contains(Vector2::new(3.5, 1.0)));
}

#[test]
fn test_overlaps() {
    let a = Vector2::new(0.0, 0.0);
    let b = Vector2::new(3.0, 0.0);
    assert!(Disc::overlaps(a, 2.0, b, 2.0));
    assert!(!Disc::overlaps(a, 1.0, b, 1.5));
    // exactly touching counts as overlap
    assert!(Disc::overlaps(a, 1.5, b, 1.5));
}
