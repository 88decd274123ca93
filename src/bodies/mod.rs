mod rigid_transform;
mod rigid_body;

pub use rigid_transform::*;
pub use rigid_body::*;

#[cfg(test)]
mod rigid_transform_tests;
