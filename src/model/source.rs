//! Decompiled source entities: files, content snapshots, and the mappings
//! that tie them to observations.

use crate::utils::{quick_hash, sha256_hex};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Identifier for one immutable content snapshot of a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SourceVersionId(pub u64);

impl fmt::Display for SourceVersionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "src-{}", self.0)
    }
}

/// Identity of one Java compilation unit, keyed by fully-qualified class name.
///
/// Created the first time any content for that class name is registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    pub class_full_name: String,
}

/// One immutable content snapshot of a [`SourceFile`].
///
/// Uniqueness is logical, by `content_hash`: the registry may be fed the same
/// bytes twice by separate imports, and the resolver never assumes physical
/// dedup happened upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFileVersion {
    pub id: SourceVersionId,
    pub class_full_name: String,
    pub content: String,
    /// SHA-256 hex digest of `content`
    pub content_hash: String,
    /// Cheap xxh3 hash of `content`, used as an equality prefilter
    pub quick_hash: u64,
    pub byte_size: u64,
    pub line_count: usize,
    pub observed_time: Option<NaiveDateTime>,
}

impl SourceFileVersion {
    /// Build a snapshot from raw content, computing both hashes and counts.
    #[must_use]
    pub fn from_content(
        id: SourceVersionId,
        class_full_name: impl Into<String>,
        content: impl Into<String>,
        observed_time: Option<NaiveDateTime>,
    ) -> Self {
        let content = content.into();
        let content_hash = sha256_hex(content.as_bytes());
        let quick = quick_hash(content.as_bytes());
        let byte_size = content.len() as u64;
        let line_count = content.lines().count();
        Self {
            id,
            class_full_name: class_full_name.into(),
            content,
            content_hash,
            quick_hash: quick,
            byte_size,
            line_count,
            observed_time,
        }
    }
}

/// The resolved source mapping of one observation.
///
/// JAR observations map to many source versions (`JarSourceMapping` rows in
/// the original schema); class observations link to exactly one
/// (`ClassArtifactSourceLink`). A `BTreeSet` keeps the mapping set-ordered so
/// merge consistency checks are plain equality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceMapping {
    /// JAR: the set of source file versions the archive contains
    Jar(BTreeSet<SourceVersionId>),
    /// Class: the single source file version decompiled from it
    Class(SourceVersionId),
}

impl SourceMapping {
    /// All mapped source version ids, regardless of artifact kind.
    #[must_use]
    pub fn source_ids(&self) -> Vec<SourceVersionId> {
        match self {
            SourceMapping::Jar(set) => set.iter().copied().collect(),
            SourceMapping::Class(id) => vec![*id],
        }
    }

    /// True if the mapping carries no source at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            SourceMapping::Jar(set) => set.is_empty(),
            SourceMapping::Class(_) => false,
        }
    }
}
