//! Version resolution integration tests.
//!
//! Exercises the resolver end to end over a populated store: density and
//! ordering of assigned version numbers, idempotence of re-runs, mapping
//! merge across services, and warning behavior.

use chrono::NaiveDate;
use jardiff::model::{ArtifactKind, ObservationId, SourceMapping};
use jardiff::store::{MemoryStore, NewObservation, ObservationStore, SourceRegistry};
use jardiff::{EquivalencePolicy, VersionResolver};
use std::collections::BTreeSet;

fn timestamp(day: u32, hour: u32) -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

fn observe(
    store: &mut MemoryStore,
    service: jardiff::model::ServiceId,
    name: &str,
    size: u64,
    day: u32,
) -> ObservationId {
    store.append_observation(NewObservation {
        service_id: service,
        artifact_name: name.to_string(),
        kind: ArtifactKind::Jar,
        byte_size: size,
        last_modified: Some(timestamp(day, 12)),
        is_third_party: false,
    })
}

#[test]
fn version_numbers_are_dense_and_time_ordered() {
    let mut store = MemoryStore::new();
    let a = store.register_service("billing", "prod");
    let b = store.register_service("billing", "staging");

    // Sizes repeat across services; sighting order is deliberately shuffled.
    observe(&mut store, a, "core.jar", 300, 5);
    observe(&mut store, b, "core.jar", 100, 1);
    observe(&mut store, a, "core.jar", 200, 3);
    observe(&mut store, b, "core.jar", 300, 6);
    observe(&mut store, a, "core.jar", 100, 2);

    let resolver = VersionResolver::new(EquivalencePolicy::Size);
    let resolution = resolver
        .resolve(&mut store, "core.jar", ArtifactKind::Jar)
        .unwrap();

    assert_eq!(resolution.distinct_versions, 3);
    assert_eq!(resolution.last_version_no, 3);

    let versions: BTreeSet<u32> = resolution
        .assignments
        .iter()
        .map(|a| a.version.version_no)
        .collect();
    assert_eq!(versions, BTreeSet::from([1, 2, 3]));

    // Every assignment carries the same last_version_no.
    assert!(resolution
        .assignments
        .iter()
        .all(|a| a.version.last_version_no == 3));

    // Earliest sighting (size 100, day 1) is v1; size 300 (day 5) is v3.
    for assignment in &resolution.assignments {
        let obs = store.observation(assignment.observation_id).unwrap();
        let expected = match obs.byte_size {
            100 => 1,
            200 => 2,
            300 => 3,
            other => panic!("unexpected size {other}"),
        };
        assert_eq!(assignment.version.version_no, expected);
    }
}

#[test]
fn rerun_over_unchanged_observations_is_identical() {
    let mut store = MemoryStore::new();
    let service = store.register_service("billing", "prod");
    for (size, day) in [(100, 1), (250, 2), (100, 3), (400, 4)] {
        observe(&mut store, service, "core.jar", size, day);
    }

    let resolver = VersionResolver::new(EquivalencePolicy::Size);
    let first = resolver
        .resolve(&mut store, "core.jar", ArtifactKind::Jar)
        .unwrap();
    let second = resolver
        .resolve(&mut store, "core.jar", ArtifactKind::Jar)
        .unwrap();

    assert_eq!(first.assignments, second.assignments);
    assert_eq!(first.last_version_no, second.last_version_no);
}

#[test]
fn new_observation_of_old_size_reuses_its_version() {
    let mut store = MemoryStore::new();
    let service = store.register_service("billing", "prod");
    observe(&mut store, service, "core.jar", 100, 1);
    observe(&mut store, service, "core.jar", 200, 2);

    let resolver = VersionResolver::new(EquivalencePolicy::Size);
    resolver
        .resolve(&mut store, "core.jar", ArtifactKind::Jar)
        .unwrap();

    // A rollback: the old size reappears much later.
    let rollback = observe(&mut store, service, "core.jar", 100, 9);
    let resolution = resolver
        .resolve(&mut store, "core.jar", ArtifactKind::Jar)
        .unwrap();

    assert_eq!(resolution.distinct_versions, 2);
    assert_eq!(store.resolved_version(rollback).unwrap().version_no, 1);
}

#[test]
fn merge_copies_canonical_mapping_within_a_version() {
    let mut store = MemoryStore::new();
    let a = store.register_service("billing", "prod");
    let b = store.register_service("billing", "staging");

    let mapped = observe(&mut store, a, "core.jar", 100, 1);
    let unmapped = observe(&mut store, b, "core.jar", 100, 2);

    let src = store.register_source("com.acme.App", "class App {}\n", None);
    store
        .set_mapping(mapped, SourceMapping::Jar(BTreeSet::from([src])))
        .unwrap();

    let resolver = VersionResolver::new(EquivalencePolicy::Size);
    let resolution = resolver
        .resolve(&mut store, "core.jar", ArtifactKind::Jar)
        .unwrap();

    assert_eq!(store.mapping(unmapped), store.mapping(mapped));
    assert!(!resolution.had_inconsistencies());
}

#[test]
fn divergent_mapping_is_flagged_then_heals() {
    let mut store = MemoryStore::new();
    let service = store.register_service("billing", "prod");

    let first = observe(&mut store, service, "core.jar", 100, 1);
    let second = observe(&mut store, service, "core.jar", 100, 2);

    let src_a = store.register_source("com.acme.App", "class App {}\n", None);
    let src_b = store.register_source("com.acme.App", "class App { int x; }\n", None);
    store
        .set_mapping(first, SourceMapping::Jar(BTreeSet::from([src_a])))
        .unwrap();
    store
        .set_mapping(second, SourceMapping::Jar(BTreeSet::from([src_b])))
        .unwrap();

    let resolver = VersionResolver::new(EquivalencePolicy::Size);
    let resolution = resolver
        .resolve(&mut store, "core.jar", ArtifactKind::Jar)
        .unwrap();
    assert!(resolution.had_inconsistencies());

    // The canonical mapping replaced the divergent one; a re-run is clean.
    assert_eq!(store.mapping(second), store.mapping(first));
    let rerun = resolver
        .resolve(&mut store, "core.jar", ArtifactKind::Jar)
        .unwrap();
    assert!(!rerun.had_inconsistencies());
}

#[test]
fn third_party_jars_are_never_versioned() {
    let mut store = MemoryStore::new();
    let service = store.register_service("billing", "prod");
    let vendored = store.append_observation(NewObservation {
        service_id: service,
        artifact_name: "log4j.jar".to_string(),
        kind: ArtifactKind::Jar,
        byte_size: 100,
        last_modified: None,
        is_third_party: true,
    });

    let resolver = VersionResolver::new(EquivalencePolicy::Size);
    let names = store.artifact_names(ArtifactKind::Jar);
    assert!(names.is_empty());
    assert!(resolver
        .resolve(&mut store, "log4j.jar", ArtifactKind::Jar)
        .is_err());
    assert!(store.resolved_version(vendored).is_none());
}

#[test]
fn resolve_all_covers_every_artifact_name() {
    let mut store = MemoryStore::new();
    let service = store.register_service("billing", "prod");
    for name in ["a.jar", "b.jar", "c.jar"] {
        observe(&mut store, service, name, 100, 1);
        observe(&mut store, service, name, 200, 2);
    }

    let resolver = VersionResolver::new(EquivalencePolicy::Size);
    let resolutions = resolver
        .resolve_all(&mut store, ArtifactKind::Jar)
        .unwrap();

    assert_eq!(resolutions.len(), 3);
    assert!(resolutions.iter().all(|r| r.distinct_versions == 2));
}

#[test]
fn content_hash_splits_same_size_builds() {
    let mut store = MemoryStore::new();
    let service = store.register_service("billing", "prod");
    let first = observe(&mut store, service, "core.jar", 100, 1);
    let second = observe(&mut store, service, "core.jar", 100, 2);

    let src_a = store.register_source("com.acme.App", "class App { int a; }\n", None);
    let src_b = store.register_source("com.acme.App", "class App { int b; }\n", None);
    store
        .set_mapping(first, SourceMapping::Jar(BTreeSet::from([src_a])))
        .unwrap();
    store
        .set_mapping(second, SourceMapping::Jar(BTreeSet::from([src_b])))
        .unwrap();

    // Content hash runs first: the size pass would merge the two mappings
    // into one and erase the content difference it is meant to detect.
    let by_content = VersionResolver::new(EquivalencePolicy::ContentHash)
        .resolve(&mut store, "core.jar", ArtifactKind::Jar)
        .unwrap();
    assert_eq!(by_content.distinct_versions, 2);

    let by_size = VersionResolver::new(EquivalencePolicy::Size)
        .resolve(&mut store, "core.jar", ArtifactKind::Jar)
        .unwrap();
    assert_eq!(by_size.distinct_versions, 1);
}
