//! Property-based tests for version resolution.
//!
//! Checks the resolver invariants over arbitrary observation vectors:
//! assigned version numbers are dense starting at 1, every assignment
//! carries the same last_version_no, equal sizes share a version number
//! under the size policy, and re-running is a no-op.

use chrono::NaiveDate;
use jardiff::model::ArtifactKind;
use jardiff::store::{MemoryStore, NewObservation, ObservationStore};
use jardiff::{EquivalencePolicy, VersionResolver};
use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap};

fn store_from_sizes(sizes: &[(u64, u32)]) -> MemoryStore {
    let mut store = MemoryStore::new();
    let service = store.register_service("billing", "prod");
    for (size, hour) in sizes {
        let last_modified = NaiveDate::from_ymd_opt(2025, 3, 1)
            .and_then(|d| d.and_hms_opt(*hour % 24, 0, 0));
        store.append_observation(NewObservation {
            service_id: service,
            artifact_name: "app.jar".to_string(),
            kind: ArtifactKind::Jar,
            byte_size: *size,
            last_modified,
            is_third_party: false,
        });
    }
    store
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn version_numbers_are_dense_from_one(
        sizes in prop::collection::vec((1u64..50, 0u32..48), 1..40)
    ) {
        let mut store = store_from_sizes(&sizes);
        let resolution = VersionResolver::new(EquivalencePolicy::Size)
            .resolve(&mut store, "app.jar", ArtifactKind::Jar)
            .unwrap();

        let assigned: BTreeSet<u32> = resolution
            .assignments
            .iter()
            .map(|a| a.version.version_no)
            .collect();
        let expected: BTreeSet<u32> = (1..=resolution.distinct_versions).collect();
        prop_assert_eq!(assigned, expected);
        prop_assert_eq!(resolution.last_version_no, resolution.distinct_versions);
    }

    #[test]
    fn equal_sizes_share_a_version(
        sizes in prop::collection::vec((1u64..20, 0u32..48), 1..40)
    ) {
        let mut store = store_from_sizes(&sizes);
        let resolution = VersionResolver::new(EquivalencePolicy::Size)
            .resolve(&mut store, "app.jar", ArtifactKind::Jar)
            .unwrap();

        let mut version_of_size: HashMap<u64, u32> = HashMap::new();
        for assignment in &resolution.assignments {
            let obs = store.observation(assignment.observation_id).unwrap();
            let seen = version_of_size
                .entry(obs.byte_size)
                .or_insert(assignment.version.version_no);
            prop_assert_eq!(*seen, assignment.version.version_no);
        }
    }

    #[test]
    fn rerun_is_a_no_op(
        sizes in prop::collection::vec((1u64..50, 0u32..48), 1..40)
    ) {
        let mut store = store_from_sizes(&sizes);
        let resolver = VersionResolver::new(EquivalencePolicy::Size);
        let first = resolver
            .resolve(&mut store, "app.jar", ArtifactKind::Jar)
            .unwrap();
        let second = resolver
            .resolve(&mut store, "app.jar", ArtifactKind::Jar)
            .unwrap();

        prop_assert_eq!(first.assignments, second.assignments);
        prop_assert_eq!(first.last_version_no, second.last_version_no);
        prop_assert_eq!(first.warnings, second.warnings);
    }

    #[test]
    fn all_assignments_carry_the_final_last_version(
        sizes in prop::collection::vec((1u64..50, 0u32..48), 1..40)
    ) {
        let mut store = store_from_sizes(&sizes);
        let resolution = VersionResolver::new(EquivalencePolicy::Size)
            .resolve(&mut store, "app.jar", ArtifactKind::Jar)
            .unwrap();

        for assignment in &resolution.assignments {
            prop_assert_eq!(
                assignment.version.last_version_no,
                resolution.last_version_no
            );
        }
    }
}
