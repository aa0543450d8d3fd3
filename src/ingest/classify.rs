//! Third-party dependency classification.

/// Decides whether a JAR is a third-party dependency.
///
/// Class files are always internal. JARs are third-party unless their file
/// name starts with one of the configured internal prefixes
/// (case-insensitive). An empty prefix list disables classification
/// entirely: every JAR is treated as internal, which keeps a bare setup from
/// silently excluding everything from resolution.
#[derive(Debug, Clone, Default)]
pub struct ThirdPartyClassifier {
    internal_prefixes: Vec<String>,
}

impl ThirdPartyClassifier {
    #[must_use]
    pub fn new(internal_prefixes: Vec<String>) -> Self {
        Self { internal_prefixes }
    }

    #[must_use]
    pub fn is_third_party(&self, jar_name: &str) -> bool {
        if self.internal_prefixes.is_empty() {
            return false;
        }
        let lower = jar_name.to_lowercase();
        !self
            .internal_prefixes
            .iter()
            .any(|prefix| lower.starts_with(&prefix.to_lowercase()))
    }
}
