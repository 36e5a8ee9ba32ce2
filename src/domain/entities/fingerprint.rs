use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Cache lookup key: a check namespace plus a SHA-256 fingerprint.
///
/// Keys are always safe file names: the namespace is restricted to
/// `[a-z0-9_-]` and the fingerprint is lowercase hex.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FingerprintKey(String);

impl FingerprintKey {
    /// Key derived from the tracked items themselves (order-independent).
    #[must_use]
    pub fn for_items<S: AsRef<str>>(namespace: &str, items: &[S]) -> Self {
        let joined = normalize_items(items).join("|");
        Self::build(namespace, &joined)
    }

    /// Key derived from a fixed scan scope, e.g. a scanned directory.
    #[must_use]
    pub fn for_scope(namespace: &str, scope: &str) -> Self {
        Self::build(namespace, scope)
    }

    fn build(namespace: &str, material: &str) -> Self {
        let digest = hex::encode(Sha256::digest(material.as_bytes()));
        Self(format!("{}_{digest}", sanitize_namespace(namespace)))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FingerprintKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn sanitize_namespace(namespace: &str) -> String {
    let cleaned: String = namespace
        .chars()
        .map(|c| {
            let c = c.to_ascii_lowercase();
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "default".to_string()
    } else {
        cleaned
    }
}

/// Sorts and deduplicates an item list so it can be compared as a set.
#[must_use]
pub fn normalize_items<S: AsRef<str>>(items: &[S]) -> Vec<String> {
    items
        .iter()
        .map(|s| s.as_ref().to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Hex SHA-256 of arbitrary content, used by integrity watches.
#[must_use]
pub fn content_digest(content: &[u8]) -> String {
    hex::encode(Sha256::digest(content))
}

/// Last observed item set for one fingerprint key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheRecord {
    /// Seconds since the Unix epoch of the last write
    pub timestamp: i64,
    pub items: Vec<String>,
}

impl CacheRecord {
    #[must_use]
    pub fn new<S: AsRef<str>>(items: &[S], timestamp: i64) -> Self {
        Self {
            timestamp,
            items: normalize_items(items),
        }
    }

    /// Set equality with `items`, ignoring order and duplicates.
    #[must_use]
    pub fn same_items<S: AsRef<str>>(&self, items: &[S]) -> bool {
        let cached: BTreeSet<&str> = self.items.iter().map(String::as_str).collect();
        let current: BTreeSet<&str> = items.iter().map(AsRef::as_ref).collect();
        cached == current
    }

    /// Seconds elapsed between the record and `now` (negative under clock skew).
    #[must_use]
    pub const fn age_secs(&self, now: i64) -> i64 {
        now.saturating_sub(self.timestamp)
    }
}
