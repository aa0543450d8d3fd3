//! Resolution result structures.

use crate::model::{ArtifactKind, ArtifactVersion, ObservationId};
use crate::resolve::EquivalencePolicy;
use serde::{Deserialize, Serialize};

/// One observation's assigned version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionAssignment {
    pub observation_id: ObservationId,
    pub version: ArtifactVersion,
}

/// Non-fatal conditions surfaced by a resolver run.
///
/// None of these aborts resolution; each narrows or flags the affected
/// observation or version group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolutionWarning {
    /// Content-hash policy fell back to a size digest because no source is
    /// mapped to this observation yet. Equivalence is degraded to size
    /// comparison for it until real source is imported.
    DegradedKey { observation_id: ObservationId },

    /// Two observations sharing a version number carried different source
    /// mappings at merge time. The merge re-propagates from the canonical
    /// observation, so this self-heals on the current run.
    InconsistentMapping {
        version_no: u32,
        observation_id: ObservationId,
    },

    /// No observation in this version group has a source mapping; nothing to
    /// propagate. Cleared once a decompile import lands for any of them.
    UnresolvedSource { version_no: u32 },
}

/// Complete result of resolving one `(artifact_name, kind)` group.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[must_use]
pub struct Resolution {
    pub artifact_name: String,
    pub kind: ArtifactKind,
    pub policy: EquivalencePolicy,
    /// Per-observation assignments, in the resolver's sorted walk order
    pub assignments: Vec<VersionAssignment>,
    /// `max(version_no)`; identical across every assignment
    pub last_version_no: u32,
    /// Number of distinct equivalence classes (equals `last_version_no`)
    pub distinct_versions: u32,
    pub warnings: Vec<ResolutionWarning>,
}

impl Resolution {
    /// Assignments carrying the given version number.
    pub fn observations_of(&self, version_no: u32) -> impl Iterator<Item = &VersionAssignment> {
        self.assignments
            .iter()
            .filter(move |a| a.version.version_no == version_no)
    }

    /// True if any warning of the inconsistent-mapping kind was raised.
    #[must_use]
    pub fn had_inconsistencies(&self) -> bool {
        self.warnings
            .iter()
            .any(|w| matches!(w, ResolutionWarning::InconsistentMapping { .. }))
    }
}
