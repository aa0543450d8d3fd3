//! Configuration validation for jardiff.

use super::types::{AppConfig, DiffConfig, IngestConfig};

/// Error type for configuration validation.
#[derive(Debug, Clone)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.ingest.validate());
        errors.extend(self.diff.validate());
        errors
    }
}

impl Validatable for IngestConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.classes_dir.is_empty() {
            errors.push(ConfigError {
                field: "ingest.classes_dir".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if self.classes_dir.contains('/') {
            errors.push(ConfigError {
                field: "ingest.classes_dir".to_string(),
                message: "must be a single path component, not a path".to_string(),
            });
        }
        for prefix in &self.internal_prefixes {
            if prefix.is_empty() {
                errors.push(ConfigError {
                    field: "ingest.internal_prefixes".to_string(),
                    message: "prefixes must not be empty strings".to_string(),
                });
            }
        }
        errors
    }
}

impl Validatable for DiffConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.context_lines > 1000 {
            errors.push(ConfigError {
                field: "diff.context_lines".to_string(),
                message: "must be at most 1000".to_string(),
            });
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AppConfig::default().is_valid());
    }

    #[test]
    fn test_empty_classes_dir_rejected() {
        let mut config = AppConfig::default();
        config.ingest.classes_dir = String::new();
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "ingest.classes_dir");
    }

    #[test]
    fn test_empty_prefix_rejected() {
        let mut config = AppConfig::default();
        config.ingest.internal_prefixes = vec!["com.acme".to_string(), String::new()];
        assert!(!config.is_valid());
    }
}
