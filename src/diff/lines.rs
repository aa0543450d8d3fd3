//! Line-based unified diff and hunk construction.

use super::result::{DiffHunk, DiffLine, LineTag};
use similar::{ChangeTag, TextDiff};

/// Count added and removed lines between two bodies of text.
///
/// Header lines (`+++`/`---`) are not part of the count; only real content
/// lines are tallied. Empty content diffs cleanly as an empty line list.
#[must_use]
pub fn count_changes(from: &str, to: &str) -> (usize, usize) {
    let diff = TextDiff::from_lines(from, to);
    let mut additions = 0;
    let mut deletions = 0;
    for change in diff.iter_all_changes() {
        match change.tag() {
            ChangeTag::Insert => additions += 1,
            ChangeTag::Delete => deletions += 1,
            ChangeTag::Equal => {}
        }
    }
    (additions, deletions)
}

/// Produce unified-diff hunks: contiguous runs of changed lines with
/// `context_lines` of surrounding context, each under a
/// `@@ -oldStart,oldCount +newStart,newCount @@` header.
#[must_use]
pub fn diff_hunks(from: &str, to: &str, context_lines: usize) -> Vec<DiffHunk> {
    let diff = TextDiff::from_lines(from, to);
    let mut hunks = Vec::new();

    for group in diff.grouped_ops(context_lines) {
        let (Some(first), Some(last)) = (group.first(), group.last()) else {
            continue;
        };
        let old_range = first.old_range().start..last.old_range().end;
        let new_range = first.new_range().start..last.new_range().end;
        let old_count = old_range.end - old_range.start;
        let new_count = new_range.end - new_range.start;
        let header = format!(
            "@@ -{},{} +{},{} @@",
            hunk_start(old_range.start, old_count),
            old_count,
            hunk_start(new_range.start, new_count),
            new_count,
        );

        let mut lines = Vec::new();
        for op in &group {
            for change in diff.iter_changes(op) {
                let tag = match change.tag() {
                    ChangeTag::Equal => LineTag::Context,
                    ChangeTag::Insert => LineTag::Added,
                    ChangeTag::Delete => LineTag::Removed,
                };
                lines.push(DiffLine {
                    old_line: change.old_index().map(|i| i + 1),
                    new_line: change.new_index().map(|i| i + 1),
                    tag,
                    content: change.value().trim_end_matches('\n').to_string(),
                });
            }
        }
        hunks.push(DiffHunk { header, lines });
    }
    hunks
}

/// Unified-diff headers are 1-based, except an empty range points at the
/// line before it.
fn hunk_start(zero_based: usize, count: usize) -> usize {
    if count == 0 {
        zero_based
    } else {
        zero_based + 1
    }
}
