//! Configuration type definitions for jardiff.

use crate::resolve::EquivalencePolicy;
use serde::{Deserialize, Serialize};

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Version resolution settings.
    pub resolve: ResolveConfig,
    /// Listing ingestion settings.
    pub ingest: IngestConfig,
    /// Diff rendering settings.
    pub diff: DiffConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            resolve: ResolveConfig::default(),
            ingest: IngestConfig::default(),
            diff: DiffConfig::default(),
        }
    }
}

/// Settings controlling how observations collapse into versions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ResolveConfig {
    /// Equivalence policy used to group observations into versions.
    pub equivalence: EquivalencePolicy,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            equivalence: EquivalencePolicy::default(),
        }
    }
}

/// Settings controlling listing parsing and classification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct IngestConfig {
    /// Directory component that marks the start of a class package path.
    pub classes_dir: String,
    /// JAR name prefixes treated as internal builds rather than third-party.
    pub internal_prefixes: Vec<String>,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            classes_dir: super::defaults::DEFAULT_CLASSES_DIR.to_string(),
            internal_prefixes: Vec::new(),
        }
    }
}

/// Settings controlling diff output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DiffConfig {
    /// Number of unchanged context lines surrounding each hunk.
    pub context_lines: usize,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            context_lines: super::defaults::DEFAULT_CONTEXT_LINES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.resolve.equivalence, EquivalencePolicy::Size);
        assert_eq!(config.ingest.classes_dir, "classes");
        assert!(config.ingest.internal_prefixes.is_empty());
        assert_eq!(config.diff.context_lines, 3);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let yaml = "resolve:\n  equivalence: content-hash\n";
        let config: AppConfig = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(config.resolve.equivalence, EquivalencePolicy::ContentHash);
        assert_eq!(config.diff.context_lines, 3);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = "resolve:\n  equivalence: size\n  threshold: 0.9\n";
        let result: Result<AppConfig, _> = serde_yaml_ng::from_str(yaml);
        assert!(result.is_err());
    }
}
