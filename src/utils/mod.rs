//! Shared utilities.

mod hash;

pub use hash::*;
