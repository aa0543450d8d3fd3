//! Artifact observations: one recorded sighting of an artifact on one service.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier for a service (an external deployment unit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ServiceId(pub u64);

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "svc-{}", self.0)
    }
}

/// An external deployment unit observations are scoped to.
///
/// Owned by the ingestion collaborator; the core only reads its identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub id: ServiceId,
    pub name: String,
    /// Environment tag, e.g. "test" or "prod"
    pub environment: String,
}

/// Identifier for a single observation row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObservationId(pub u64);

impl fmt::Display for ObservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "obs-{}", self.0)
    }
}

/// What kind of compiled artifact an observation refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    /// A JAR file, identified by file name
    Jar,
    /// A single compiled class, identified by fully-qualified class name
    Class,
}

impl ArtifactKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::Jar => "jar",
            ArtifactKind::Class => "class",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One sighting of an artifact on one service at one point in time.
///
/// Immutable once recorded: ingestion appends, newer sightings supersede
/// rather than overwrite. `last_modified` may be absent when the listing
/// carried an unparseable timestamp; the resolver tolerates this by sorting
/// timeless observations after all timed ones in stable ingestion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactObservation {
    pub id: ObservationId,
    pub service_id: ServiceId,
    /// JAR file name or fully-qualified class name, depending on `kind`
    pub artifact_name: String,
    pub kind: ArtifactKind,
    pub byte_size: u64,
    pub last_modified: Option<NaiveDateTime>,
    /// Third-party JARs are excluded from version resolution entirely.
    /// Always false for class artifacts.
    pub is_third_party: bool,
}

impl ArtifactObservation {
    /// The grouping key resolution runs under.
    #[must_use]
    pub fn group_key(&self) -> (&str, ArtifactKind) {
        (&self.artifact_name, self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_display() {
        assert_eq!(ArtifactKind::Jar.to_string(), "jar");
        assert_eq!(ArtifactKind::Class.to_string(), "class");
    }

    #[test]
    fn test_kind_serde_round_trip() {
        let json = serde_json::to_string(&ArtifactKind::Class).unwrap();
        assert_eq!(json, "\"class\"");
        let kind: ArtifactKind = serde_json::from_str(&json).unwrap();
        assert_eq!(kind, ArtifactKind::Class);
    }
}
