mod spatial_hash;

pub use spatial_hash::*;
