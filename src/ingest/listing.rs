//! Parsing of `ls -l`-style listing text.

use crate::model::ArtifactKind;
use chrono::NaiveDateTime;
use regex::Regex;
use std::sync::LazyLock;

/// Matches one listing line produced by
/// `ls -lah --block-size=1 --time-style='+%Y-%m-%d %H:%M:%S'`:
/// permissions, link count, owner, group, byte size, timestamp (seconds
/// optional), then a path ending in `.jar` or `.class`.
static LISTING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^-rw[a-z-]*\s+\d+\s+\w+\s+\w+\s+(\d+)\s+(\d{4}-\d{2}-\d{2}\s+\d{2}:\d{2}(?::\d{2})?)\s+(.+\.(?:jar|class))$",
    )
    .expect("listing pattern is valid")
});

/// One artifact entry recovered from a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    /// Raw path as it appeared in the listing
    pub path: String,
    /// JAR file name, or the class full name derived from the path
    pub artifact_name: String,
    pub kind: ArtifactKind,
    pub byte_size: u64,
    /// `None` when the timestamp failed to parse; the resolver tolerates it
    pub last_modified: Option<NaiveDateTime>,
}

/// A line that matched the listing shape but carried an unusable field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedLine {
    pub line_no: usize,
    pub reason: String,
}

/// Outcome of parsing one listing body.
#[derive(Debug, Clone, Default)]
pub struct ParsedListing {
    pub entries: Vec<ListingEntry>,
    /// Offending lines are rejected individually, never coerced
    pub rejected: Vec<RejectedLine>,
}

/// Parser for listing text, aware of the classes directory layout used to
/// derive class full names.
#[derive(Debug, Clone)]
pub struct ListingParser {
    classes_dir: String,
}

impl Default for ListingParser {
    fn default() -> Self {
        Self::new("classes")
    }
}

impl ListingParser {
    #[must_use]
    pub fn new(classes_dir: impl Into<String>) -> Self {
        Self {
            classes_dir: classes_dir.into(),
        }
    }

    /// Parse listing text. Lines that do not look like artifact entries are
    /// ignored; lines that do but carry an unusable byte size are rejected
    /// individually and reported in [`ParsedListing::rejected`].
    #[must_use]
    pub fn parse_str(&self, text: &str) -> ParsedListing {
        let mut parsed = ParsedListing::default();
        for (idx, line) in text.lines().enumerate() {
            let line_no = idx + 1;
            let Some(caps) = LISTING_RE.captures(line.trim()) else {
                continue;
            };
            let byte_size: u64 = match caps[1].parse() {
                Ok(size) => size,
                Err(_) => {
                    tracing::warn!(line_no, "Rejecting listing line with unusable byte size");
                    parsed.rejected.push(RejectedLine {
                        line_no,
                        reason: format!("unusable byte size '{}'", &caps[1]),
                    });
                    continue;
                }
            };
            let last_modified = parse_timestamp(&caps[2]);
            if last_modified.is_none() {
                tracing::debug!(line_no, raw = &caps[2], "Unparseable timestamp, keeping entry");
            }

            let path = caps[3].to_string();
            let (artifact_name, kind) = if path.ends_with(".class") {
                match self.extract_class_name(&path) {
                    Some(name) => (name, ArtifactKind::Class),
                    None => {
                        // Class file outside the classes dir: fall back to
                        // the raw path so the sighting is not lost.
                        (path.clone(), ArtifactKind::Class)
                    }
                }
            } else {
                (file_name(&path).to_string(), ArtifactKind::Jar)
            };

            parsed.entries.push(ListingEntry {
                path,
                artifact_name,
                kind,
                byte_size,
                last_modified,
            });
        }
        parsed
    }

    /// Derive a class full name from a compiled class path:
    /// `.../classes/com/example/Foo.class` becomes `com.example.Foo`.
    #[must_use]
    pub fn extract_class_name(&self, path: &str) -> Option<String> {
        let marker = format!("/{}/", self.classes_dir);
        let rest = match path.find(&marker) {
            Some(pos) => &path[pos + marker.len()..],
            None => {
                let marker = format!("{}/", self.classes_dir);
                let pos = path.find(&marker)?;
                &path[pos + marker.len()..]
            }
        };
        let rest = rest.strip_suffix(".class")?;
        if rest.is_empty() {
            return None;
        }
        Some(rest.replace('/', "."))
    }
}

/// Timestamps come with or without seconds depending on the remote ls.
fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M"))
        .ok()
}

/// Final path component.
fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
