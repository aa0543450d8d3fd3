//! Equivalence key computation.
//!
//! The key decides when two observations represent the same version. Keys are
//! computed as a separate pass over the whole group before any sequence
//! assignment: the content-hash policy reads the source registry state at
//! call time, not just the observation row.

use super::result::ResolutionWarning;
use crate::model::ArtifactObservation;
use crate::store::ArtifactStore;
use crate::utils::sha256_hex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Policy deciding when two observations are the same version.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EquivalencePolicy {
    /// Same byte size means same version (the default)
    #[default]
    Size,
    /// Digest over the constituent decompiled source; distinguishes
    /// same-size, different-content builds but requires the source registry
    /// to be populated first
    ContentHash,
}

impl fmt::Display for EquivalencePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EquivalencePolicy::Size => f.write_str("size"),
            EquivalencePolicy::ContentHash => f.write_str("content-hash"),
        }
    }
}

/// Compute one equivalence key per observation, in input order.
///
/// Under [`EquivalencePolicy::ContentHash`], an observation with no source
/// mapped yet falls back to a digest of `"file_size:<byte_size>"`. That
/// degrades equivalence to size comparison for that observation until real
/// source is imported, and is reported as a [`ResolutionWarning::DegradedKey`].
pub fn compute_equivalence_keys<S: ArtifactStore + ?Sized>(
    store: &S,
    observations: &[ArtifactObservation],
    policy: EquivalencePolicy,
) -> (Vec<String>, Vec<ResolutionWarning>) {
    let mut warnings = Vec::new();
    let keys = observations
        .iter()
        .map(|obs| match policy {
            EquivalencePolicy::Size => obs.byte_size.to_string(),
            EquivalencePolicy::ContentHash => {
                content_key(store, obs).unwrap_or_else(|| {
                    warnings.push(ResolutionWarning::DegradedKey {
                        observation_id: obs.id,
                    });
                    sha256_hex(format!("file_size:{}", obs.byte_size).as_bytes())
                })
            }
        })
        .collect();
    (keys, warnings)
}

/// Digest of the newline-joined, lexicographically-sorted
/// `"<class_full_name>:<source_content_hash>"` pairs mapped to the
/// observation. `None` when no source is mapped at all.
fn content_key<S: ArtifactStore + ?Sized>(
    store: &S,
    obs: &ArtifactObservation,
) -> Option<String> {
    let mapping = store.mapping(obs.id)?;
    let mut pairs: Vec<String> = mapping
        .source_ids()
        .into_iter()
        .filter_map(|id| store.source_version(id))
        .map(|v| format!("{}:{}", v.class_full_name, v.content_hash))
        .collect();
    if pairs.is_empty() {
        // Mapping exists but every referenced snapshot is gone: same
        // degraded path as no mapping at all.
        return None;
    }
    pairs.sort_unstable();
    Some(sha256_hex(pairs.join("\n").as_bytes()))
}
