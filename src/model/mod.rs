//! Core data model for artifact observations and resolved versions.
//!
//! These are the logical entities the resolution and diff core operates on.
//! Observations are immutable once recorded; resolved versions are entirely
//! owned by the resolver and re-derivable from the observation set at any
//! time. Storage engine internals are out of scope - the [`crate::store`]
//! traits only have to preserve the invariants documented here.

mod observation;
mod source;
mod version;

pub use observation::*;
pub use source::*;
pub use version::*;
