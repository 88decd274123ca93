mod block;
mod disc;
mod bvnode;

pub use block::*;
pub use disc::*;
pub use bvnode::*;

#[cfg(test)]
mod block_tests;
#[cfg(test)]
mod disc_tests;
