// src/bodies/rigid_transform_tests.rs

use std::f64::consts::FRAC_PI_2;

use approx::assert_relative_eq;

use crate::assert_float_eq;
use crate::bodies::RigidTransform;
use crate::math::Vector2;

#[test]
fn test_identity_default() {
    let t = RigidTransform::default();
    let p = Vector2::new(3.0, -2.0);
    assert_eq!(t.transform_point(p), p);
    assert_eq!(t.transform_vector(p), p);
}

#[test]
fn test_quarter_turn() {
    let t = RigidTransform::new(FRAC_PI_2, Vector2::ZERO);
    let p = t.transform_point(Vector2::new(1.0, 0.0));
    assert_float_eq(p.x, 0.0, 1e-12, None);
    assert_float_eq(p.y, 1.0, 1e-12, None);
}

#[test]
fn test_translation_does_not_affect_vectors() {
    let t = RigidTransform::new(0.3, Vector2::new(10.0, -5.0));
    let v = Vector2::new(1.0, 2.0);
    let rotated_only = RigidTransform::new(0.3, Vector2::ZERO).transform_point(v);
    assert_eq!(t.transform_vector(v), rotated_only);
}

#[test]
fn test_inverse_round_trip() {
    let t = RigidTransform::new(1.234, Vector2::new(-7.0, 3.5));
    let inv = t.inverse();
    for p in [
        Vector2::new(0.0, 0.0),
        Vector2::new(1.0, 1.0),
        Vector2::new(-100.0, 42.0),
    ] {
        let q = inv.transform_point(t.transform_point(p));
        assert_relative_eq!(q.x, p.x, epsilon = 1e-9);
        assert_relative_eq!(q.y, p.y, epsilon = 1e-9);
        let q = t.transform_point(inv.transform_point(p));
        assert_relative_eq!(q.x, p.x, epsilon = 1e-9);
        assert_relative_eq!(q.y, p.y, epsilon = 1e-9);
    }
}
