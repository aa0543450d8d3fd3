//! Content hashing utilities.
//!
//! Two hash flavors with distinct roles: SHA-256 hex digests are the durable
//! content identity stored on [`crate::model::SourceFileVersion`] rows and
//! used in equivalence keys; xxh3 is a cheap in-memory prefilter for equality
//! checks before comparing digests.

use sha2::{Digest, Sha256};
use xxhash_rust::xxh3::xxh3_64;

/// SHA-256 digest of arbitrary bytes, lowercase hex encoded.
#[must_use]
pub fn sha256_hex(data: &[u8]) -> String {
    let digest = Sha256::digest(data);
    let mut out = String::with_capacity(64);
    for byte in digest {
        use std::fmt::Write as _;
        let _ = write!(out, "{byte:02x}");
    }
    out
}

/// Cheap non-cryptographic content hash for quick equality checks.
#[must_use]
pub fn quick_hash(data: &[u8]) -> u64 {
    xxh3_64(data)
}
