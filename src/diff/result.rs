//! Diff result structures.

use crate::analysis::Finding;
use crate::model::ArtifactKind;
use serde::{Deserialize, Serialize};

/// How one file changed between two versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeType {
    /// Absent from the `from` side
    Added,
    /// Absent from the `to` side
    Deleted,
    /// Present on both sides with differing content
    Modified,
    /// Byte-identical on both sides
    Unchanged,
}

/// Per-file change summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileChange {
    /// Files are identified by fully-qualified class name, not by raw
    /// decompiled path, so path differences between services do not produce
    /// spurious adds/deletes.
    pub class_full_name: String,
    pub change_type: ChangeType,
    pub additions: usize,
    pub deletions: usize,
    pub changes: usize,
    /// `(additions + deletions) / max(from_line_count, 1) * 100`,
    /// rounded to one decimal
    pub change_percentage: f64,
    pub size_before: Option<u64>,
    pub size_after: Option<u64>,
}

/// Tag on one line of a hunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineTag {
    Context,
    Added,
    Removed,
}

/// One line of a unified-diff hunk, with its position on each side.
///
/// The line number is absent on the side where the line does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffLine {
    pub old_line: Option<usize>,
    pub new_line: Option<usize>,
    pub tag: LineTag,
    pub content: String,
}

/// A contiguous run of changed and context lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffHunk {
    /// `@@ -oldStart,oldCount +newStart,newCount @@`
    pub header: String,
    pub lines: Vec<DiffLine>,
}

/// Hunks for one modified file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDiff {
    pub class_full_name: String,
    pub hunks: Vec<DiffHunk>,
}

/// Aggregate statistics over a version diff.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSummary {
    pub total_files: usize,
    /// modified + added + deleted
    pub files_changed: usize,
    pub insertions: usize,
    pub deletions: usize,
    /// insertions - deletions
    pub net_change: i64,
}

/// Complete result of diffing two resolved versions of one artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[must_use]
pub struct VersionDiff {
    pub artifact_name: String,
    pub kind: ArtifactKind,
    pub from_version: u32,
    pub to_version: u32,
    pub summary: DiffSummary,
    pub file_changes: Vec<FileChange>,
    pub file_diffs: Vec<FileDiff>,
    /// Structural critical findings across all changed files
    pub findings: Vec<Finding>,
    /// Source-unavailable markers: mapped snapshot ids whose content no
    /// longer exists in the registry. The diff proceeds without them.
    pub unavailable_sources: Vec<String>,
}

impl VersionDiff {
    /// True if any file changed between the two versions.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.summary.files_changed > 0
    }
}

/// Result of diffing two source snapshots directly (class artifacts).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[must_use]
pub struct SourceComparison {
    pub change: FileChange,
    pub diff: Option<FileDiff>,
    pub findings: Vec<Finding>,
}
