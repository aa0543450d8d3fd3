//! Version diff computation.

use super::lines::{count_changes, diff_hunks};
use super::result::{
    ChangeType, DiffSummary, FileChange, FileDiff, SourceComparison, VersionDiff,
};
use crate::analysis::{Finding, StructuralAnalyzer};
use crate::error::{DiffErrorKind, JarDiffError, Result};
use crate::model::{ArtifactKind, SourceFileVersion};
use crate::store::ArtifactStore;
use std::collections::{BTreeMap, BTreeSet};

/// Compares two resolved versions of one artifact.
///
/// Reads only: a diff never writes to the store, so any number of diffs can
/// run concurrently against versions that are not being re-resolved.
#[derive(Debug, Clone, Copy)]
pub struct DiffEngine {
    context_lines: usize,
    analyzer: StructuralAnalyzer,
}

impl Default for DiffEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// One side of a version diff: the canonical observation's source files
/// keyed by class full name, plus markers for snapshots that no longer exist.
struct Side {
    files: BTreeMap<String, SourceFileVersion>,
    unavailable: Vec<String>,
}

impl DiffEngine {
    #[must_use]
    pub fn new() -> Self {
        Self {
            context_lines: 3,
            analyzer: StructuralAnalyzer::new(),
        }
    }

    /// Number of context lines around each hunk (default 3).
    #[must_use]
    pub fn with_context_lines(mut self, context_lines: usize) -> Self {
        self.context_lines = context_lines;
        self
    }

    /// Diff two resolved versions of one artifact.
    ///
    /// The file set is the union of class full names on both sides; files
    /// are classified added/deleted/modified/unchanged by exact content
    /// comparison, with no whitespace normalization at this layer.
    pub fn diff_versions<S: ArtifactStore + ?Sized>(
        &self,
        store: &S,
        artifact_name: &str,
        kind: ArtifactKind,
        from_version: u32,
        to_version: u32,
    ) -> Result<VersionDiff> {
        let from_side = self.side_files(store, artifact_name, kind, from_version)?;
        let to_side = self.side_files(store, artifact_name, kind, to_version)?;

        let all_files: BTreeSet<&String> = from_side
            .files
            .keys()
            .chain(to_side.files.keys())
            .collect();

        let mut file_changes = Vec::new();
        let mut file_diffs = Vec::new();
        let mut findings: Vec<Finding> = Vec::new();

        for &file in &all_files {
            let from_file = from_side.files.get(file);
            let to_file = to_side.files.get(file);

            let (change_type, additions, deletions) = match (from_file, to_file) {
                (None, Some(to)) => (ChangeType::Added, to.line_count, 0),
                (Some(from), None) => {
                    // Removed-file mode surfaces removed classes/methods even
                    // when the whole file disappeared.
                    findings.extend(self.analyzer.compare(file, &from.content, ""));
                    (ChangeType::Deleted, 0, from.line_count)
                }
                (Some(from), Some(to)) => {
                    if from.quick_hash == to.quick_hash && from.content == to.content {
                        (ChangeType::Unchanged, 0, 0)
                    } else {
                        let (additions, deletions) = count_changes(&from.content, &to.content);
                        file_diffs.push(FileDiff {
                            class_full_name: file.clone(),
                            hunks: diff_hunks(&from.content, &to.content, self.context_lines),
                        });
                        findings.extend(self.analyzer.compare(file, &from.content, &to.content));
                        (ChangeType::Modified, additions, deletions)
                    }
                }
                (None, None) => continue,
            };

            file_changes.push(FileChange {
                class_full_name: file.clone(),
                change_type,
                additions,
                deletions,
                changes: additions + deletions,
                change_percentage: change_percentage(additions, deletions, from_file),
                size_before: from_file.map(|f| f.byte_size),
                size_after: to_file.map(|f| f.byte_size),
            });
        }

        let insertions: usize = file_changes.iter().map(|c| c.additions).sum();
        let deletions: usize = file_changes.iter().map(|c| c.deletions).sum();
        let files_changed = file_changes
            .iter()
            .filter(|c| c.change_type != ChangeType::Unchanged)
            .count();

        let mut unavailable_sources = from_side.unavailable;
        unavailable_sources.extend(to_side.unavailable);

        tracing::info!(
            artifact = artifact_name,
            from = from_version,
            to = to_version,
            files_changed,
            findings = findings.len(),
            "Computed version diff"
        );

        Ok(VersionDiff {
            artifact_name: artifact_name.to_string(),
            kind,
            from_version,
            to_version,
            summary: DiffSummary {
                total_files: all_files.len(),
                files_changed,
                insertions,
                deletions,
                net_change: insertions as i64 - deletions as i64,
            },
            file_changes,
            file_diffs,
            findings,
            unavailable_sources,
        })
    }

    /// Diff two source snapshots directly, as used for class artifacts.
    #[must_use]
    pub fn diff_sources(
        &self,
        from: &SourceFileVersion,
        to: &SourceFileVersion,
    ) -> SourceComparison {
        let file = from.class_full_name.clone();
        if from.quick_hash == to.quick_hash && from.content == to.content {
            return SourceComparison {
                change: FileChange {
                    class_full_name: file,
                    change_type: ChangeType::Unchanged,
                    additions: 0,
                    deletions: 0,
                    changes: 0,
                    change_percentage: 0.0,
                    size_before: Some(from.byte_size),
                    size_after: Some(to.byte_size),
                },
                diff: None,
                findings: Vec::new(),
            };
        }

        let (additions, deletions) = count_changes(&from.content, &to.content);
        SourceComparison {
            change: FileChange {
                class_full_name: file.clone(),
                change_type: ChangeType::Modified,
                additions,
                deletions,
                changes: additions + deletions,
                change_percentage: round_one_decimal(
                    (additions + deletions) as f64 / from.line_count.max(1) as f64 * 100.0,
                ),
                size_before: Some(from.byte_size),
                size_after: Some(to.byte_size),
            },
            diff: Some(FileDiff {
                class_full_name: file.clone(),
                hunks: diff_hunks(&from.content, &to.content, self.context_lines),
            }),
            findings: self.analyzer.compare(&file, &from.content, &to.content),
        }
    }

    /// Collect the source files of the canonical observation for one version
    /// number. Mapped snapshot ids with no registry content become markers
    /// rather than errors.
    fn side_files<S: ArtifactStore + ?Sized>(
        &self,
        store: &S,
        artifact_name: &str,
        kind: ArtifactKind,
        version_no: u32,
    ) -> Result<Side> {
        let mut observations = store.observations_for(artifact_name, kind);
        if observations.is_empty() {
            return Err(JarDiffError::diff(
                format!("diffing {artifact_name}"),
                DiffErrorKind::Unresolved {
                    name: artifact_name.to_string(),
                },
            ));
        }
        // Same sort the resolver uses, so "earliest-sorted" means the same
        // observation here as it did during the merge pass.
        observations.sort_by_key(|o| (o.last_modified.is_none(), o.last_modified));

        let mut any_resolved = false;
        let mut canonical = None;
        for obs in &observations {
            match store.resolved_version(obs.id) {
                Some(v) => {
                    any_resolved = true;
                    if v.version_no == version_no {
                        canonical = Some(obs);
                        break;
                    }
                }
                None => continue,
            }
        }
        if !any_resolved {
            return Err(JarDiffError::diff(
                format!("diffing {artifact_name}"),
                DiffErrorKind::Unresolved {
                    name: artifact_name.to_string(),
                },
            ));
        }
        let Some(canonical) = canonical else {
            return Err(JarDiffError::diff(
                format!("diffing {artifact_name} v{version_no}"),
                DiffErrorKind::MissingCanonical { version_no },
            ));
        };

        let mut files = BTreeMap::new();
        let mut unavailable = Vec::new();
        if let Some(mapping) = store.mapping(canonical.id) {
            for id in mapping.source_ids() {
                match store.source_version(id) {
                    Some(version) => {
                        files.insert(version.class_full_name.clone(), version);
                    }
                    None => {
                        tracing::warn!(
                            artifact = artifact_name,
                            version_no,
                            source_id = %id,
                            "Mapped source snapshot unavailable - diffing without it"
                        );
                        unavailable.push(id.to_string());
                    }
                }
            }
        }
        Ok(Side { files, unavailable })
    }
}

/// `(additions + deletions) / max(from_line_count, 1) * 100`, one decimal.
fn change_percentage(
    additions: usize,
    deletions: usize,
    from_file: Option<&SourceFileVersion>,
) -> f64 {
    let base = from_file.map_or(1, |f| f.line_count.max(1));
    round_one_decimal((additions + deletions) as f64 / base as f64 * 100.0)
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
