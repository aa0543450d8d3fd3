//! In-memory store with JSON snapshot persistence.

use super::traits::{NewObservation, ObservationStore, SourceRegistry};
use crate::error::{JarDiffError, Result, StoreErrorKind};
use crate::model::{
    ArtifactKind, ArtifactObservation, ArtifactVersion, ObservationId, Service, ServiceId,
    SourceFileVersion, SourceMapping, SourceVersionId,
};
use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// IndexMap-backed store: iteration order is ingestion order, which is what
/// gives the resolver its stable tie-break for timeless observations.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct MemoryStore {
    services: IndexMap<u64, Service>,
    observations: IndexMap<u64, ArtifactObservation>,
    versions: IndexMap<u64, ArtifactVersion>,
    mappings: IndexMap<u64, SourceMapping>,
    sources: IndexMap<u64, SourceFileVersion>,
    /// xxh3 prefilter index: quick hash -> candidate snapshot ids
    #[serde(skip)]
    by_quick_hash: HashMap<u64, Vec<SourceVersionId>>,
    next_observation_id: u64,
    next_source_id: u64,
    next_service_id: u64,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a service, reusing the id when the same name/environment
    /// pair was seen before.
    pub fn register_service(&mut self, name: &str, environment: &str) -> ServiceId {
        if let Some(existing) = self
            .services
            .values()
            .find(|s| s.name == name && s.environment == environment)
        {
            return existing.id;
        }
        self.next_service_id += 1;
        let id = ServiceId(self.next_service_id);
        self.services.insert(
            id.0,
            Service {
                id,
                name: name.to_string(),
                environment: environment.to_string(),
            },
        );
        id
    }

    #[must_use]
    pub fn service(&self, id: ServiceId) -> Option<&Service> {
        self.services.get(&id.0)
    }

    #[must_use]
    pub fn observation(&self, id: ObservationId) -> Option<&ArtifactObservation> {
        self.observations.get(&id.0)
    }

    #[must_use]
    pub fn observation_count(&self) -> usize {
        self.observations.len()
    }

    #[must_use]
    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    #[must_use]
    pub fn service_count(&self) -> usize {
        self.services.len()
    }

    /// Iterate all observations in ingestion order.
    pub fn all_observations(&self) -> impl Iterator<Item = &ArtifactObservation> {
        self.observations.values()
    }

    /// Load a store snapshot from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path).map_err(|e| JarDiffError::io(path, e))?;
        let mut store: MemoryStore = serde_json::from_str(&data).map_err(|e| {
            JarDiffError::store(
                format!("loading snapshot {}", path.display()),
                StoreErrorKind::CorruptSnapshot(e.to_string()),
            )
        })?;
        store.rebuild_quick_hash_index();
        tracing::debug!(
            observations = store.observations.len(),
            sources = store.sources.len(),
            "Loaded store snapshot from {}",
            path.display()
        );
        Ok(store)
    }

    /// Persist the store as a JSON snapshot.
    pub fn save(&self, path: &Path) -> Result<()> {
        let data = serde_json::to_string(self)?;
        std::fs::write(path, data).map_err(|e| JarDiffError::io(path, e))?;
        Ok(())
    }

    /// The prefilter index is skipped by serde; rebuild it after load.
    fn rebuild_quick_hash_index(&mut self) {
        self.by_quick_hash.clear();
        for source in self.sources.values() {
            self.by_quick_hash
                .entry(source.quick_hash)
                .or_default()
                .push(source.id);
        }
    }
}

impl ObservationStore for MemoryStore {
    fn append_observation(&mut self, obs: NewObservation) -> ObservationId {
        self.next_observation_id += 1;
        let id = ObservationId(self.next_observation_id);
        self.observations.insert(
            id.0,
            ArtifactObservation {
                id,
                service_id: obs.service_id,
                artifact_name: obs.artifact_name,
                kind: obs.kind,
                byte_size: obs.byte_size,
                last_modified: obs.last_modified,
                is_third_party: obs.is_third_party,
            },
        );
        id
    }

    fn observations_for(
        &self,
        artifact_name: &str,
        kind: ArtifactKind,
    ) -> Vec<ArtifactObservation> {
        self.observations
            .values()
            .filter(|o| o.artifact_name == artifact_name && o.kind == kind && !o.is_third_party)
            .cloned()
            .collect()
    }

    fn artifact_names(&self, kind: ArtifactKind) -> Vec<String> {
        let mut names = Vec::new();
        for obs in self.observations.values() {
            if obs.kind == kind && !obs.is_third_party && !names.contains(&obs.artifact_name) {
                names.push(obs.artifact_name.clone());
            }
        }
        names
    }

    fn resolved_version(&self, id: ObservationId) -> Option<ArtifactVersion> {
        self.versions.get(&id.0).cloned()
    }

    fn set_resolved_version(&mut self, id: ObservationId, version: ArtifactVersion) -> Result<()> {
        if !self.observations.contains_key(&id.0) {
            return Err(JarDiffError::store(
                "writing resolved version",
                StoreErrorKind::UnknownObservation(id.0),
            ));
        }
        self.versions.insert(id.0, version);
        Ok(())
    }

    fn mapping(&self, id: ObservationId) -> Option<SourceMapping> {
        self.mappings.get(&id.0).cloned()
    }

    fn set_mapping(&mut self, id: ObservationId, mapping: SourceMapping) -> Result<()> {
        if !self.observations.contains_key(&id.0) {
            return Err(JarDiffError::store(
                "writing source mapping",
                StoreErrorKind::UnknownObservation(id.0),
            ));
        }
        self.mappings.insert(id.0, mapping);
        Ok(())
    }
}

impl SourceRegistry for MemoryStore {
    fn register_source(
        &mut self,
        class_full_name: &str,
        content: &str,
        observed_time: Option<NaiveDateTime>,
    ) -> SourceVersionId {
        let quick = crate::utils::quick_hash(content.as_bytes());
        if let Some(candidates) = self.by_quick_hash.get(&quick) {
            for candidate in candidates {
                if let Some(existing) = self.sources.get(&candidate.0) {
                    if existing.class_full_name == class_full_name && existing.content == content {
                        return existing.id;
                    }
                }
            }
        }

        self.next_source_id += 1;
        let id = SourceVersionId(self.next_source_id);
        let version =
            SourceFileVersion::from_content(id, class_full_name, content, observed_time);
        self.by_quick_hash.entry(quick).or_default().push(id);
        self.sources.insert(id.0, version);
        id
    }

    fn source_version(&self, id: SourceVersionId) -> Option<SourceFileVersion> {
        self.sources.get(&id.0).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observation(name: &str, kind: ArtifactKind, size: u64) -> NewObservation {
        NewObservation {
            service_id: ServiceId(1),
            artifact_name: name.to_string(),
            kind,
            byte_size: size,
            last_modified: None,
            is_third_party: false,
        }
    }

    #[test]
    fn test_append_preserves_ingestion_order() {
        let mut store = MemoryStore::new();
        store.append_observation(observation("b.jar", ArtifactKind::Jar, 10));
        store.append_observation(observation("a.jar", ArtifactKind::Jar, 20));
        store.append_observation(observation("b.jar", ArtifactKind::Jar, 30));

        let names = store.artifact_names(ArtifactKind::Jar);
        assert_eq!(names, vec!["b.jar".to_string(), "a.jar".to_string()]);

        let obs = store.observations_for("b.jar", ArtifactKind::Jar);
        assert_eq!(obs.len(), 2);
        assert_eq!(obs[0].byte_size, 10);
        assert_eq!(obs[1].byte_size, 30);
    }

    #[test]
    fn test_third_party_jars_excluded_from_resolution_queries() {
        let mut store = MemoryStore::new();
        let mut tp = observation("vendor.jar", ArtifactKind::Jar, 10);
        tp.is_third_party = true;
        store.append_observation(tp);

        assert!(store.observations_for("vendor.jar", ArtifactKind::Jar).is_empty());
        assert!(store.artifact_names(ArtifactKind::Jar).is_empty());
        // The raw row still exists - superseded, never deleted
        assert_eq!(store.observation_count(), 1);
    }

    #[test]
    fn test_register_source_dedupes_by_content() {
        let mut store = MemoryStore::new();
        let a = store.register_source("com.example.Foo", "class Foo {}", None);
        let b = store.register_source("com.example.Foo", "class Foo {}", None);
        let c = store.register_source("com.example.Foo", "class Foo { int x; }", None);

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(store.source_count(), 2);
    }

    #[test]
    fn test_same_content_different_class_gets_own_snapshot() {
        let mut store = MemoryStore::new();
        let a = store.register_source("com.example.Foo", "// empty", None);
        let b = store.register_source("com.example.Bar", "// empty", None);
        assert_ne!(a, b);
    }

    #[test]
    fn test_set_version_unknown_observation_rejected() {
        let mut store = MemoryStore::new();
        let err = store.set_resolved_version(
            ObservationId(99),
            ArtifactVersion {
                version_no: 1,
                last_version_no: 1,
                equivalence_key: "k".to_string(),
            },
        );
        assert!(err.is_err());
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut store = MemoryStore::new();
        let svc = store.register_service("billing", "test");
        let mut obs = observation("app.jar", ArtifactKind::Jar, 100);
        obs.service_id = svc;
        store.append_observation(obs);
        let src = store.register_source("com.example.App", "class App {}", None);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        store.save(&path).unwrap();

        let mut loaded = MemoryStore::load(&path).unwrap();
        assert_eq!(loaded.observation_count(), 1);
        assert_eq!(loaded.source_count(), 1);
        // Prefilter index must be rebuilt: re-registering dedupes
        let again = loaded.register_source("com.example.App", "class App {}", None);
        assert_eq!(again, src);
    }
}
