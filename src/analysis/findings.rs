//! Critical finding types produced by structural comparison.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a structural finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// What kind of compatibility-relevant change was detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    RemovedClass,
    RemovedMethod,
    ModifiedSignature,
}

impl fmt::Display for FindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FindingKind::RemovedClass => "removed class",
            FindingKind::RemovedMethod => "removed method",
            FindingKind::ModifiedSignature => "modified signature",
        };
        f.write_str(s)
    }
}

/// The raw declaration lines backing a modified-signature finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureEvidence {
    pub removed_line: String,
    pub added_line: String,
}

/// One structurally detected, compatibility-relevant change.
///
/// A method removed together with its signature change may be reported twice,
/// once as `RemovedMethod` and once as `ModifiedSignature`; no reciprocal
/// suppression is performed between the two (known limitation).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub kind: FindingKind,
    pub severity: Severity,
    /// Fully-qualified class name of the file the finding was detected in
    pub file: String,
    /// Class name, or `name(params)` method label
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence: Option<SignatureEvidence>,
}

impl Finding {
    #[must_use]
    pub fn removed_class(file: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            kind: FindingKind::RemovedClass,
            severity: Severity::High,
            file: file.into(),
            label: class.into(),
            evidence: None,
        }
    }

    #[must_use]
    pub fn removed_method(file: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            kind: FindingKind::RemovedMethod,
            severity: Severity::High,
            file: file.into(),
            label: method.into(),
            evidence: None,
        }
    }

    #[must_use]
    pub fn modified_signature(
        file: impl Into<String>,
        method: impl Into<String>,
        removed_line: impl Into<String>,
        added_line: impl Into<String>,
    ) -> Self {
        Self {
            kind: FindingKind::ModifiedSignature,
            severity: Severity::High,
            file: file.into(),
            label: method.into(),
            evidence: Some(SignatureEvidence {
                removed_line: removed_line.into(),
                added_line: added_line.into(),
            }),
        }
    }
}
