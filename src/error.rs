//! Unified error types for jardiff.
//!
//! Nothing in the resolution/diff core is fatal: missing timestamps, missing
//! source content, and unparseable structure all degrade to explicitly-flagged
//! results. The variants here cover the cases that genuinely cannot proceed,
//! such as asking for a version number that was never assigned or feeding the
//! ingest parser a malformed listing line.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for jardiff operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum JarDiffError {
    /// Errors during version resolution
    #[error("Version resolution failed: {context}")]
    Resolve {
        context: String,
        #[source]
        source: ResolveErrorKind,
    },

    /// Errors during diff computation
    #[error("Diff computation failed: {context}")]
    Diff {
        context: String,
        #[source]
        source: DiffErrorKind,
    },

    /// Errors during listing ingestion
    #[error("Ingestion failed: {context}")]
    Ingest {
        context: String,
        #[source]
        source: IngestErrorKind,
    },

    /// Errors from the observation store or source registry
    #[error("Store operation failed: {context}")]
    Store {
        context: String,
        #[source]
        source: StoreErrorKind,
    },

    /// Errors during report generation
    #[error("Report generation failed: {0}")]
    Report(String),

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Specific resolution error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ResolveErrorKind {
    #[error("No observations recorded for artifact '{name}' ({kind})")]
    NoObservations { name: String, kind: String },

    #[error("Version {version_no} was never assigned for artifact '{name}'")]
    UnknownVersion { name: String, version_no: u32 },

    #[error("Equivalence key computation rejected observation {observation_id}: {reason}")]
    InvalidObservation { observation_id: u64, reason: String },
}

/// Specific diff error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum DiffErrorKind {
    #[error("Artifact '{name}' has not been resolved yet - run version resolution first")]
    Unresolved { name: String },

    #[error("No canonical observation for version {version_no}")]
    MissingCanonical { version_no: u32 },
}

/// Specific ingestion error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum IngestErrorKind {
    #[error("Unparseable byte size on line {line_no}: {text}")]
    InvalidSize { line_no: usize, text: String },

    #[error("Listing file is empty or contains no artifact entries")]
    EmptyListing,
}

/// Specific store error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum StoreErrorKind {
    #[error("Unknown observation id: {0}")]
    UnknownObservation(u64),

    #[error("Unknown source file version id: {0}")]
    UnknownSourceVersion(u64),

    #[error("Snapshot deserialization failed: {0}")]
    CorruptSnapshot(String),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for jardiff operations
pub type Result<T> = std::result::Result<T, JarDiffError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl JarDiffError {
    /// Create a resolution error with context
    pub fn resolve(context: impl Into<String>, source: ResolveErrorKind) -> Self {
        Self::Resolve {
            context: context.into(),
            source,
        }
    }

    /// Create a diff error with context
    pub fn diff(context: impl Into<String>, source: DiffErrorKind) -> Self {
        Self::Diff {
            context: context.into(),
            source,
        }
    }

    /// Create an ingestion error with context
    pub fn ingest(context: impl Into<String>, source: IngestErrorKind) -> Self {
        Self::Ingest {
            context: context.into(),
            source,
        }
    }

    /// Create a store error with context
    pub fn store(context: impl Into<String>, source: StoreErrorKind) -> Self {
        Self::Store {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for JarDiffError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for JarDiffError {
    fn from(err: serde_json::Error) -> Self {
        Self::Report(format!("JSON serialization: {err}"))
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// The context string is prepended to the error's existing context,
/// creating a chain that shows the path through the code.
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure (lazy evaluation).
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<JarDiffError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: JarDiffError, new_ctx: &str) -> JarDiffError {
    match err {
        JarDiffError::Resolve {
            context: existing,
            source,
        } => JarDiffError::Resolve {
            context: chain_context(new_ctx, &existing),
            source,
        },
        JarDiffError::Diff {
            context: existing,
            source,
        } => JarDiffError::Diff {
            context: chain_context(new_ctx, &existing),
            source,
        },
        JarDiffError::Ingest {
            context: existing,
            source,
        } => JarDiffError::Ingest {
            context: chain_context(new_ctx, &existing),
            source,
        },
        JarDiffError::Store {
            context: existing,
            source,
        } => JarDiffError::Store {
            context: chain_context(new_ctx, &existing),
            source,
        },
        JarDiffError::Report(msg) => JarDiffError::Report(chain_context(new_ctx, &msg)),
        JarDiffError::Io {
            path,
            message,
            source,
        } => JarDiffError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        JarDiffError::Config(msg) => JarDiffError::Config(chain_context(new_ctx, &msg)),
        JarDiffError::Validation(msg) => JarDiffError::Validation(chain_context(new_ctx, &msg)),
    }
}

/// Chain two context strings together.
///
/// If the existing context is empty, returns just the new context.
/// Otherwise, returns "`new_context`: `existing_context`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}
