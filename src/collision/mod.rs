mod contact;
mod processor;

pub use contact::*;
pub use processor::*;
