//! Version sequence assignment and source-mapping merge.

use super::equivalence::{compute_equivalence_keys, EquivalencePolicy};
use super::result::{Resolution, ResolutionWarning, VersionAssignment};
use crate::error::{JarDiffError, ResolveErrorKind, Result};
use crate::model::{ArtifactKind, ArtifactObservation, ArtifactVersion, ObservationId, SourceMapping};
use crate::store::ArtifactStore;
use indexmap::IndexMap;
use rayon::prelude::*;

/// Resolves raw observations of one artifact name into a dense version
/// sequence and propagates known source mappings across content-equivalent
/// observations.
///
/// A `resolve` call is one logical unit per artifact name: it reads the whole
/// observation group, computes every assignment, then writes all results
/// through a single `&mut` borrow of the store. Callers sharding work across
/// processes must serialize calls per artifact name externally; within a
/// process the borrow rules already forbid interleaving.
#[derive(Debug, Clone, Copy, Default)]
pub struct VersionResolver {
    policy: EquivalencePolicy,
}

/// Everything a resolver run decided, before any write is committed.
struct ResolutionPlan {
    resolution: Resolution,
    mapping_writes: Vec<(ObservationId, SourceMapping)>,
}

impl VersionResolver {
    #[must_use]
    pub fn new(policy: EquivalencePolicy) -> Self {
        Self { policy }
    }

    #[must_use]
    pub fn policy(&self) -> EquivalencePolicy {
        self.policy
    }

    /// Resolve one `(artifact_name, kind)` group.
    ///
    /// Idempotent: re-running over an unchanged observation set writes the
    /// same assignments and produces no new warnings beyond degraded-key
    /// notices, which depend only on registry state.
    pub fn resolve<S: ArtifactStore + ?Sized>(
        &self,
        store: &mut S,
        artifact_name: &str,
        kind: ArtifactKind,
    ) -> Result<Resolution> {
        let plan = self.plan(store, artifact_name, kind)?;
        Self::apply(store, plan)
    }

    /// Resolve every artifact name of the given kind.
    ///
    /// Planning is read-only and runs across names in parallel; writes are
    /// committed serially afterwards, one artifact name at a time.
    pub fn resolve_all<S: ArtifactStore + Sync + ?Sized>(
        &self,
        store: &mut S,
        kind: ArtifactKind,
    ) -> Result<Vec<Resolution>> {
        let names = store.artifact_names(kind);
        tracing::info!(count = names.len(), kind = %kind, "Resolving all artifact names");

        let plans: Vec<Result<ResolutionPlan>> = {
            let store_ref: &S = store;
            names
                .par_iter()
                .map(|name| self.plan(store_ref, name, kind))
                .collect()
        };

        let mut resolutions = Vec::with_capacity(plans.len());
        for plan in plans {
            resolutions.push(Self::apply(store, plan?)?);
        }
        Ok(resolutions)
    }

    /// Read the observation group and compute assignments, merge writes, and
    /// warnings, without touching the store.
    fn plan<S: ArtifactStore + ?Sized>(
        &self,
        store: &S,
        artifact_name: &str,
        kind: ArtifactKind,
    ) -> Result<ResolutionPlan> {
        let mut observations = store.observations_for(artifact_name, kind);
        if observations.is_empty() {
            return Err(JarDiffError::resolve(
                format!("resolving {artifact_name}"),
                ResolveErrorKind::NoObservations {
                    name: artifact_name.to_string(),
                    kind: kind.to_string(),
                },
            ));
        }

        // Keys are a separate pass before sequence assignment: the
        // content-hash policy reads registry state, not just the row.
        let (keys, mut warnings) = compute_equivalence_keys(store, &observations, self.policy);
        let key_of: IndexMap<ObservationId, String> = observations
            .iter()
            .map(|o| o.id)
            .zip(keys)
            .collect();

        // Timeless observations sort after all timed ones, preserving
        // ingestion order among themselves. A pragmatic tie-break, not a
        // correctness guarantee.
        observations.sort_by_key(|o| (o.last_modified.is_none(), o.last_modified));

        // First sight of a key assigns the next counter value; a repeat
        // sight reuses the original number even if it reappears much later.
        let mut version_of_key: IndexMap<&str, u32> = IndexMap::new();
        let mut counter = 0u32;
        let version_nos: Vec<u32> = observations
            .iter()
            .map(|obs| {
                let key = key_of[&obs.id].as_str();
                *version_of_key.entry(key).or_insert_with(|| {
                    counter += 1;
                    counter
                })
            })
            .collect();
        let last_version_no = counter;

        let assignments: Vec<VersionAssignment> = observations
            .iter()
            .zip(&version_nos)
            .map(|(obs, &version_no)| VersionAssignment {
                observation_id: obs.id,
                version: ArtifactVersion {
                    version_no,
                    last_version_no,
                    equivalence_key: key_of[&obs.id].clone(),
                },
            })
            .collect();

        let mapping_writes =
            Self::plan_merge(store, &observations, &version_nos, &mut warnings);

        tracing::debug!(
            artifact = artifact_name,
            observations = observations.len(),
            versions = last_version_no,
            warnings = warnings.len(),
            "Planned resolution"
        );

        Ok(ResolutionPlan {
            resolution: Resolution {
                artifact_name: artifact_name.to_string(),
                kind,
                policy: self.policy,
                assignments,
                last_version_no,
                distinct_versions: last_version_no,
                warnings,
            },
            mapping_writes,
        })
    }

    /// Merge pass: within each version group the earliest-sorted observation
    /// is canonical, and its full mapping set is copied onto every other
    /// member, overwriting whatever partial or absent mapping they had.
    fn plan_merge<S: ArtifactStore + ?Sized>(
        store: &S,
        sorted: &[ArtifactObservation],
        version_nos: &[u32],
        warnings: &mut Vec<ResolutionWarning>,
    ) -> Vec<(ObservationId, SourceMapping)> {
        let mut groups: IndexMap<u32, Vec<&ArtifactObservation>> = IndexMap::new();
        for (obs, &version_no) in sorted.iter().zip(version_nos) {
            groups.entry(version_no).or_default().push(obs);
        }

        let mut writes = Vec::new();
        for (&version_no, members) in &groups {
            let canonical = members[0];
            let canonical_mapping = match store.mapping(canonical.id) {
                Some(m) if !m.is_empty() => m,
                _ => {
                    // Nothing to propagate for this group yet.
                    tracing::debug!(
                        version_no,
                        canonical = %canonical.id,
                        "Version group has no source mapping - skipping merge"
                    );
                    warnings.push(ResolutionWarning::UnresolvedSource { version_no });
                    continue;
                }
            };

            for other in &members[1..] {
                if let Some(existing) = store.mapping(other.id) {
                    if existing != canonical_mapping {
                        // Should not occur after a clean run; storage races
                        // can cause it. Re-propagating self-heals.
                        tracing::warn!(
                            version_no,
                            observation = %other.id,
                            "Observation mapping diverges from canonical - re-propagating"
                        );
                        warnings.push(ResolutionWarning::InconsistentMapping {
                            version_no,
                            observation_id: other.id,
                        });
                    }
                }
                writes.push((other.id, canonical_mapping.clone()));
            }
        }
        writes
    }

    /// Commit a plan: version assignments first, then merged mappings.
    fn apply<S: ArtifactStore + ?Sized>(store: &mut S, plan: ResolutionPlan) -> Result<Resolution> {
        for assignment in &plan.resolution.assignments {
            store.set_resolved_version(assignment.observation_id, assignment.version.clone())?;
        }
        for (id, mapping) in plan.mapping_writes {
            store.set_mapping(id, mapping)?;
        }
        tracing::info!(
            artifact = plan.resolution.artifact_name,
            versions = plan.resolution.last_version_no,
            observations = plan.resolution.assignments.len(),
            "Resolved artifact"
        );
        Ok(plan.resolution)
    }
}
