//! Summary report generator for shell output.
//!
//! Provides a compact, human-readable summary for terminal usage.

use super::{ReportError, ReportGenerator};
use crate::diff::{ChangeType, VersionDiff};

/// Apply ANSI color formatting if colored output is enabled.
fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "cyan" => format!("\x1b[36m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

/// Summary reporter for shell output
pub struct SummaryReporter {
    /// Use colored output
    colored: bool,
}

impl SummaryReporter {
    /// Create a new summary reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for SummaryReporter {
    fn generate(&self, diff: &VersionDiff) -> Result<String, ReportError> {
        let mut lines = Vec::new();

        lines.push(self.color(
            &format!(
                "{} v{} → v{}",
                diff.artifact_name, diff.from_version, diff.to_version
            ),
            "bold",
        ));
        lines.push(self.color("─".repeat(40).as_str(), "dim"));

        lines.push(format!(
            "{}  {} files, {} changed, +{} -{}",
            self.color("Totals:", "cyan"),
            diff.summary.total_files,
            diff.summary.files_changed,
            diff.summary.insertions,
            diff.summary.deletions,
        ));

        if !diff.has_changes() {
            lines.push(String::new());
            lines.push("No changes between the selected versions.".to_string());
            return Ok(lines.join("\n"));
        }

        lines.push(String::new());
        lines.push(self.color("Files:", "bold"));

        for change in &diff.file_changes {
            let (marker, color) = match change.change_type {
                ChangeType::Added => ("A", "green"),
                ChangeType::Deleted => ("D", "red"),
                ChangeType::Modified => ("M", "yellow"),
                ChangeType::Unchanged => continue,
            };
            lines.push(format!(
                "  {} {}  +{} -{} ({:.1}%)",
                self.color(marker, color),
                change.class_full_name,
                change.additions,
                change.deletions,
                change.change_percentage,
            ));
        }

        if !diff.findings.is_empty() {
            lines.push(String::new());
            lines.push(self.color("Critical findings:", "bold"));
            for finding in &diff.findings {
                lines.push(format!(
                    "  {} {} in {}: {}",
                    self.color("!", "red"),
                    finding.kind,
                    finding.file,
                    finding.label,
                ));
            }
        }

        if !diff.unavailable_sources.is_empty() {
            lines.push(String::new());
            lines.push(self.color("Sources unavailable:", "yellow"));
            for marker in &diff.unavailable_sources {
                lines.push(format!("  {marker}"));
            }
        }

        Ok(lines.join("\n"))
    }
}
