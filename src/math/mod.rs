mod vector2;

pub use vector2::*;
