//! **A library for tracking and diffing deployed Java artifact versions.**
//!
//! `jardiff` records sightings of JAR and class files across running services,
//! collapses those sightings into an ordered sequence of content-equivalent
//! versions, and compares the decompiled source of any two versions. It powers
//! both a command-line interface and a Rust library for programmatic use.
//!
//! ## Key Features
//!
//! - **Observation tracking**: Append-only record of which artifact, at what
//!   size and timestamp, was seen on which service.
//! - **Version resolution**: Deterministic assignment of dense version numbers
//!   per artifact name, under a pluggable equivalence policy (byte size or
//!   source content hash), with source-mapping merge across services.
//! - **Semantic diffing**: File-level change classification, unified-diff
//!   hunks, and structural findings (removed classes and methods, modified
//!   signatures) between any two resolved versions.
//! - **Listing ingestion**: Parses `ls -l`-style file listings into
//!   observations and classifies third-party JARs out of resolution.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: The central data types: [`model::ArtifactObservation`],
//!   [`model::ArtifactVersion`], and [`model::SourceFileVersion`].
//! - **[`store`]**: The [`store::ObservationStore`] and
//!   [`store::SourceRegistry`] traits plus the snapshot-backed
//!   [`MemoryStore`].
//! - **[`resolve`]**: The [`VersionResolver`], which turns observation groups
//!   into version assignments.
//! - **[`diff`]**: The [`DiffEngine`], which compares two resolved versions.
//! - **[`analysis`]**: The [`StructuralAnalyzer`] behind critical findings.
//! - **[`reports`]**: JSON and terminal-summary rendering of a diff.
//!
//! ## Getting Started: Resolving and Diffing
//!
//! ```no_run
//! use jardiff::{DiffEngine, EquivalencePolicy, MemoryStore, VersionResolver};
//! use jardiff::model::ArtifactKind;
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut store = MemoryStore::load(Path::new("jardiff-store.json"))?;
//!
//!     let resolver = VersionResolver::new(EquivalencePolicy::Size);
//!     let resolution = resolver.resolve(&mut store, "billing-core.jar", ArtifactKind::Jar)?;
//!     println!("{} distinct versions", resolution.distinct_versions);
//!
//!     let engine = DiffEngine::new();
//!     let diff = engine.diff_versions(&store, "billing-core.jar", ArtifactKind::Jar, 1, 2)?;
//!     println!("{} files changed", diff.summary.files_changed);
//!
//!     Ok(())
//! }
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    // usize↔f64 casts back the change-percentage math; values are bounded
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    // # Errors / # Panics sections are aspirational
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    // Variable names like `old`/`new` are clear in context
    clippy::similar_names
)]

pub mod analysis;
pub mod cli;
pub mod config;
pub mod diff;
pub mod error;
pub mod ingest;
pub mod model;
pub mod reports;
pub mod resolve;
pub mod store;
pub mod utils;

// Re-export main types for convenience
pub use analysis::{Finding, FindingKind, Severity, StructuralAnalyzer};
pub use config::{AppConfig, ConfigError, Validatable};
pub use diff::{DiffEngine, DiffSummary, FileChange, VersionDiff};
pub use error::{ErrorContext, JarDiffError, Result};
pub use ingest::{ingest_listing, ListingParser, ThirdPartyClassifier};
pub use reports::{JsonReporter, ReportFormat, SummaryReporter};
pub use resolve::{EquivalencePolicy, Resolution, ResolutionWarning, VersionResolver};
pub use store::{ArtifactStore, MemoryStore, ObservationStore, SourceRegistry};
