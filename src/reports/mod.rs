//! Report generation for version diff results.
//!
//! This module provides output formats for artifact diff results:
//! - JSON: Structured data for programmatic integration
//! - Summary: Compact shell-friendly output

mod json;
mod summary;

pub use json::JsonReporter;
pub use summary::SummaryReporter;

use crate::diff::VersionDiff;
use thiserror::Error;

/// Errors that can occur during report generation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Supported report formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// Structured JSON output
    Json,
    /// Compact terminal summary
    Summary,
}

impl ReportFormat {
    /// Parse a format from a string name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "summary" | "text" => Some(Self::Summary),
            _ => None,
        }
    }
}

/// Trait for diff report generators.
pub trait ReportGenerator {
    /// Render a complete report for the given version diff.
    fn generate(&self, diff: &VersionDiff) -> Result<String, ReportError>;
}

/// Build a reporter for the requested format.
#[must_use]
pub fn reporter_for(format: ReportFormat, colored: bool) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Json => Box::new(JsonReporter::new()),
        ReportFormat::Summary => {
            let reporter = SummaryReporter::new();
            if colored {
                Box::new(reporter)
            } else {
                Box::new(reporter.no_color())
            }
        }
    }
}
