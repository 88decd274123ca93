mod rigid_body_system;

pub use rigid_body_system::*;

#[cfg(test)]
mod rigid_body_system_tests;
