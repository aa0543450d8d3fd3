//! Version resolution: collapsing raw observations into an ordered sequence
//! of distinct content-equivalent versions.
//!
//! Resolution runs independently per `(artifact_name, kind)` group and is
//! idempotent: re-running over an unchanged observation set is a no-op. The
//! computation is split into a pure planning phase over a read-only view of
//! the store and a write phase that commits the plan, so independent artifact
//! names can be planned in parallel while writes stay serialized.

mod engine;
mod equivalence;
mod result;

pub use engine::VersionResolver;
pub use equivalence::{compute_equivalence_keys, EquivalencePolicy};
pub use result::{Resolution, ResolutionWarning, VersionAssignment};
