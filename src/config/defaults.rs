//! Default values for jardiff configuration.

/// Directory component that marks where a class package path starts.
pub const DEFAULT_CLASSES_DIR: &str = "classes";

/// Unchanged context lines surrounding each diff hunk.
pub const DEFAULT_CONTEXT_LINES: usize = 3;
