// src/errors.rs

use std::error::Error;
use std::fmt;

/// Represents errors that can occur while constructing or stepping a simulation.
#[derive(Debug, Clone, PartialEq)]
pub enum PhysicsError {
    /// A rigid body was constructed from an empty block list.
    EmptyGeometry,
    /// The total colour-derived mass of a body's blocks is not positive.
    ZeroTotalMass,
    /// A contact pairing a body with itself was requested.
    SelfContact,
    /// A non-positive or non-finite time step was supplied.
    InvalidTimeStep(f64),
    /// The broad-phase grid was configured with a degenerate extent or cell count.
    InvalidGrid,
    /// A body index that is not present in the system.
    UnknownBody(usize),
}

impl fmt::Display for PhysicsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PhysicsError::EmptyGeometry => write!(f, "rigid body has no blocks"),
            PhysicsError::ZeroTotalMass => write!(f, "total block mass is not positive"),
            PhysicsError::SelfContact => write!(f, "a body cannot be in contact with itself"),
            PhysicsError::InvalidTimeStep(dt) => write!(f, "invalid time step: {}", dt),
            PhysicsError::InvalidGrid => write!(f, "broad-phase grid extent and cell count must be positive"),
            PhysicsError::UnknownBody(index) => write!(f, "no body with index {}", index),
        }
    }
}

impl Error for PhysicsError {}
