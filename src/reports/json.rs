//! JSON report generator.

use super::{ReportError, ReportGenerator};
use crate::diff::VersionDiff;

/// JSON report generator
pub struct JsonReporter {
    /// Pretty print output
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: true }
    }

    /// Set pretty printing
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for JsonReporter {
    fn generate(&self, diff: &VersionDiff) -> Result<String, ReportError> {
        let rendered = if self.pretty {
            serde_json::to_string_pretty(diff)
        } else {
            serde_json::to_string(diff)
        };
        rendered.map_err(|e| ReportError::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::{DiffSummary, VersionDiff};
    use crate::model::ArtifactKind;

    fn empty_diff() -> VersionDiff {
        VersionDiff {
            artifact_name: "app.jar".to_string(),
            kind: ArtifactKind::Jar,
            from_version: 1,
            to_version: 2,
            summary: DiffSummary::default(),
            file_changes: Vec::new(),
            file_diffs: Vec::new(),
            findings: Vec::new(),
            unavailable_sources: Vec::new(),
        }
    }

    #[test]
    fn test_json_output_is_valid() {
        let report = JsonReporter::new().generate(&empty_diff()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&report).unwrap();
        assert_eq!(value["artifact_name"], "app.jar");
        assert_eq!(value["from_version"], 1);
    }

    #[test]
    fn test_compact_output_has_no_newlines() {
        let report = JsonReporter::new()
            .pretty(false)
            .generate(&empty_diff())
            .unwrap();
        assert!(!report.contains('\n'));
    }
}
