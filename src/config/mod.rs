//! Configuration module for jardiff.
//!
//! Provides type-safe configuration structures, validation, and YAML config
//! file loading with discovery.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use jardiff::config::{AppConfig, file::load_or_default};
//!
//! // Use defaults
//! let config = AppConfig::default();
//!
//! // Load from a discovered file
//! let (config, loaded_from) = load_or_default(None);
//! ```
//!
//! # Configuration File
//!
//! Place a `.jardiff.yaml` file in the working directory:
//!
//! ```yaml
//! resolve:
//!   equivalence: content-hash
//! ingest:
//!   classes_dir: classes
//!   internal_prefixes: [acme-, billing-]
//! diff:
//!   context_lines: 3
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{DEFAULT_CLASSES_DIR, DEFAULT_CONTEXT_LINES};
pub use types::{AppConfig, DiffConfig, IngestConfig, ResolveConfig};
pub use validation::{ConfigError, Validatable};
