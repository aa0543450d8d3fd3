//! Storage interfaces for observations and decompiled source.
//!
//! The core only depends on the two traits here; storage engine internals are
//! a collaborator concern. [`MemoryStore`] is the reference implementation
//! and doubles as the JSON-snapshot persistence the CLI uses between runs.
//!
//! Writes go through `&mut self`, so a resolver run over one artifact name is
//! a single borrow of the store: its read-all / compute / write-all cycle is
//! serialized by construction within a process. Callers that shard resolution
//! across processes must provide the per-artifact-name lock externally.

mod memory;
mod traits;

pub use memory::MemoryStore;
pub use traits::{ArtifactStore, NewObservation, ObservationStore, SourceRegistry};
