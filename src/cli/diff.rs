//! Diff command handler.
//!
//! Compares two resolved versions of an artifact and renders the result in
//! the requested format.

use super::exit_codes;
use crate::config::AppConfig;
use crate::diff::DiffEngine;
use crate::error::{JarDiffError, Result};
use crate::model::ArtifactKind;
use crate::reports::{reporter_for, ReportFormat};
use std::path::Path;

/// Run the diff command, returning the desired exit code.
#[allow(clippy::too_many_arguments)]
pub fn run_diff(
    store_path: &Path,
    name: &str,
    kind: ArtifactKind,
    from_version: u32,
    to_version: u32,
    format: ReportFormat,
    colored: bool,
    config: &AppConfig,
) -> Result<i32> {
    let store = super::open_store(store_path)?;
    let engine = DiffEngine::new().with_context_lines(config.diff.context_lines);

    let diff = engine.diff_versions(&store, name, kind, from_version, to_version)?;
    let exit_code = if diff.has_changes() {
        exit_codes::CHANGES_DETECTED
    } else {
        exit_codes::SUCCESS
    };

    let report = reporter_for(format, colored)
        .generate(&diff)
        .map_err(|e| JarDiffError::Report(e.to_string()))?;
    println!("{report}");

    Ok(exit_code)
}
