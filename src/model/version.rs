//! Resolved artifact versions.

use serde::{Deserialize, Serialize};

/// The resolved identity of one equivalence class of observations sharing
/// `(artifact_name, kind)`.
///
/// Created and entirely owned by the version resolver. Invariants the
/// resolver upholds for a fixed artifact name:
///
/// - `version_no` values are dense integers starting at 1, ordered by the
///   equivalence class's earliest observation time (ties broken by stable
///   ingestion order);
/// - `last_version_no` is the same constant on every row and equals
///   `max(version_no)` for that name;
/// - two rows with the same `version_no` are content-equivalent and carry
///   identical source mappings after the merge pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactVersion {
    /// Dense, sequential, starts at 1
    pub version_no: u32,
    /// `max(version_no)` ever assigned to this artifact name
    pub last_version_no: u32,
    /// The size- or content-based key that defined this equivalence class
    pub equivalence_key: String,
}

impl ArtifactVersion {
    /// True if this observation carries the most recent known version.
    #[must_use]
    pub fn is_latest(&self) -> bool {
        self.version_no == self.last_version_no
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_latest() {
        let v = ArtifactVersion {
            version_no: 2,
            last_version_no: 2,
            equivalence_key: "100".to_string(),
        };
        assert!(v.is_latest());

        let older = ArtifactVersion {
            version_no: 1,
            ..v
        };
        assert!(!older.is_latest());
    }
}
