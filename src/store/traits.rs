//! Store traits the resolution and diff core is written against.

use crate::error::Result;
use crate::model::{
    ArtifactKind, ArtifactObservation, ArtifactVersion, ObservationId, ServiceId,
    SourceFileVersion, SourceMapping, SourceVersionId,
};
use chrono::NaiveDateTime;

/// Fields ingestion supplies when appending an observation.
///
/// The store assigns the [`ObservationId`]; everything else is immutable
/// once recorded.
#[derive(Debug, Clone)]
pub struct NewObservation {
    pub service_id: ServiceId,
    pub artifact_name: String,
    pub kind: ArtifactKind,
    pub byte_size: u64,
    pub last_modified: Option<NaiveDateTime>,
    pub is_third_party: bool,
}

/// Append-only store of raw per-service artifact sightings, plus the
/// resolver-owned version and mapping columns.
pub trait ObservationStore {
    /// Append one observation. No update/delete contract - newer sightings
    /// supersede, they never mutate.
    fn append_observation(&mut self, obs: NewObservation) -> ObservationId;

    /// All resolvable observations for one `(artifact_name, kind)` group in
    /// stable ingestion order. Third-party JARs are excluded here: they are
    /// never assigned a version.
    fn observations_for(&self, artifact_name: &str, kind: ArtifactKind)
        -> Vec<ArtifactObservation>;

    /// Every distinct artifact name of the given kind with at least one
    /// resolvable observation.
    fn artifact_names(&self, kind: ArtifactKind) -> Vec<String>;

    /// The resolved version of an observation, if resolution has run.
    fn resolved_version(&self, id: ObservationId) -> Option<ArtifactVersion>;

    /// Write the resolved version for an observation.
    fn set_resolved_version(&mut self, id: ObservationId, version: ArtifactVersion) -> Result<()>;

    /// The source mapping of an observation, if any import or merge
    /// established one.
    fn mapping(&self, id: ObservationId) -> Option<SourceMapping>;

    /// Overwrite the source mapping of an observation (merge pass and
    /// decompile import both land here).
    fn set_mapping(&mut self, id: ObservationId, mapping: SourceMapping) -> Result<()>;
}

/// Content-addressed store of decompiled source bodies.
pub trait SourceRegistry {
    /// Register source content for a class, reusing the existing snapshot if
    /// byte-identical content is already present for that class name.
    fn register_source(
        &mut self,
        class_full_name: &str,
        content: &str,
        observed_time: Option<NaiveDateTime>,
    ) -> SourceVersionId;

    /// Fetch one content snapshot. `None` is the MissingData path: a mapping
    /// can reference a snapshot a failed import never produced.
    fn source_version(&self, id: SourceVersionId) -> Option<SourceFileVersion>;
}

/// Convenience bound for code that needs both store halves.
pub trait ArtifactStore: ObservationStore + SourceRegistry {}

impl<T: ObservationStore + SourceRegistry> ArtifactStore for T {}
