//! Content digests for built indexes.
//!
//! Two builds of the same source tree must yield the same digest even when the
//! directory listing order differs, so entries are hashed in `(lang, slug)` order.

use crate::types::IndexEntry;
use std::fmt;
use xxhash_rust::xxh3::Xxh3;

/// xxh3 digest over the canonical serialization of an index.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct IndexDigest(u64);

impl IndexDigest {
    /// Computes the digest of `entries`, independent of their order.
    pub fn of(entries: &[IndexEntry]) -> Self {
        let mut sorted: Vec<&IndexEntry> = entries.iter().collect();
        sorted.sort_by(|a, b| a.key().cmp(&b.key()));

        let mut hasher = Xxh3::new();
        for entry in sorted {
            // Serializing plain strings and vectors cannot fail
            if let Ok(bytes) = serde_json::to_vec(entry) {
                hasher.update(&bytes);
            }
            hasher.update(b"\n");
        }
        Self(hasher.digest())
    }
}

impl fmt::Display for IndexDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}
