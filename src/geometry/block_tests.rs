// src/geometry/block_tests.rs

use crate::assert_float_eq;
use crate::geometry::{Block, Colour};
use crate::math::Vector2;

#[test]
fn test_colour_mass_darker_is_heavier() {
    let black = Block::new(0, 0, Colour::new(0.0, 0.0, 0.0));
    let grey = Block::new(0, 0, Colour::new(0.5, 0.5, 0.5));
    assert_float_eq(black.colour_mass(), 1.0, 1e-9, None);
    assert_float_eq(grey.colour_mass(), 0.5, 1e-9, None);
    assert!(black.colour_mass() > grey.colour_mass());
}

#[test]
fn test_colour_mass_has_positive_floor() {
    let white = Block::new(0, 0, Colour::new(1.0, 1.0, 1.0));
    assert!(white.colour_mass() > 0.0);
    assert_float_eq(white.colour_mass(), Block::MIN_COLOUR_MASS, 1e-12, None);
}

#[test]
fn test_grid_position_is_column_row() {
    let b = Block::new(3, 7, Colour::new(0.0, 0.0, 0.0));
    assert_eq!(b.grid_position(), Vector2::new(7.0, 3.0));
    assert_eq!(b.k, 0);
}

#[test]
fn test_shade_of_blue_predicate() {
    assert!(Colour::new(0.0, 0.0, 1.0).is_shade_of_blue());
    assert!(Colour::new(0.2, 0.2, 0.9).is_shade_of_blue());
    // red/green mismatch or blue not dominant
    assert!(!Colour::new(0.1, 0.2, 0.9).is_shade_of_blue());
    assert!(!Colour::new(0.5, 0.5, 0.5).is_shade_of_blue());
    assert!(!Colour::new(1.0, 0.0, 0.0).is_shade_of_blue());
}
