//! Resolve command handler.
//!
//! Assigns version numbers to the observations of one artifact name, or of
//! every artifact name of a kind, and persists the store snapshot.

use super::exit_codes;
use crate::error::Result;
use crate::model::ArtifactKind;
use crate::resolve::{EquivalencePolicy, Resolution, ResolutionWarning, VersionResolver};
use std::path::Path;

/// Run the resolve command, returning the desired exit code.
pub fn run_resolve(
    store_path: &Path,
    name: Option<&str>,
    kind: ArtifactKind,
    policy: EquivalencePolicy,
) -> Result<i32> {
    let mut store = super::open_store(store_path)?;
    let resolver = VersionResolver::new(policy);

    let resolutions = match name {
        Some(name) => vec![resolver.resolve(&mut store, name, kind)?],
        None => resolver.resolve_all(&mut store, kind)?,
    };
    store.save(store_path)?;

    for resolution in &resolutions {
        print_resolution(resolution);
    }
    Ok(exit_codes::SUCCESS)
}

fn print_resolution(resolution: &Resolution) {
    println!(
        "{} ({}): {} observations, {} distinct versions, latest v{}",
        resolution.artifact_name,
        resolution.kind,
        resolution.assignments.len(),
        resolution.distinct_versions,
        resolution.last_version_no,
    );
    for warning in &resolution.warnings {
        println!("  warning: {}", describe_warning(warning));
    }
}

fn describe_warning(warning: &ResolutionWarning) -> String {
    match warning {
        ResolutionWarning::DegradedKey { observation_id } => format!(
            "observation {observation_id} has no source mapped; equivalence degraded to size"
        ),
        ResolutionWarning::InconsistentMapping {
            version_no,
            observation_id,
        } => format!(
            "observation {observation_id} of v{version_no} had a divergent source mapping (replaced)"
        ),
        ResolutionWarning::UnresolvedSource { version_no } => {
            format!("v{version_no} has no source mapping on any observation")
        }
    }
}
