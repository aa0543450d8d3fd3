//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler implements the business logic for a specific CLI subcommand
//! and returns the desired process exit code.

mod diff;
mod ingest;
mod resolve;
mod stats;

pub use diff::run_diff;
pub use ingest::run_ingest;
pub use resolve::run_resolve;
pub use stats::run_stats;

use crate::error::Result;
use crate::store::MemoryStore;
use std::path::Path;

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Success - no changes detected
    pub const SUCCESS: i32 = 0;
    /// Changes were detected
    pub const CHANGES_DETECTED: i32 = 1;
    /// An error occurred
    pub const ERROR: i32 = 3;
}

/// Open the store snapshot at `path`, or start an empty store if the file
/// does not exist yet.
pub fn open_store(path: &Path) -> Result<MemoryStore> {
    if path.exists() {
        MemoryStore::load(path)
    } else {
        tracing::debug!(path = %path.display(), "No snapshot found, starting empty store");
        Ok(MemoryStore::new())
    }
}
