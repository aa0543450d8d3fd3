//! Diff engine: file-level change summaries, line-level unified-diff hunks,
//! and structural critical-change reports between two resolved versions.
//!
//! Diff computation is read-only and has no ordering dependency on other
//! diffs; it is safe to run in parallel as long as the versions being
//! compared are not concurrently re-resolved.

mod engine;
mod lines;
mod result;

pub use engine::DiffEngine;
pub use lines::{count_changes, diff_hunks};
pub use result::{
    ChangeType, DiffHunk, DiffLine, DiffSummary, FileChange, FileDiff, LineTag, SourceComparison,
    VersionDiff,
};
