use thiserror::Error;

use crate::domain::entities::fingerprint::{CacheRecord, FingerprintKey};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage write failed: {0}")]
    WriteFailed(String),
}

/// Durable key → record storage backing the change detector.
///
/// Reads never fail: a missing, unreadable or malformed entry is reported
/// as `None` so callers treat it as a first observation.
pub trait FingerprintStore: Send + Sync {
    /// Load the record stored under `key`, if a well-formed one exists.
    fn load(&self, key: &FingerprintKey) -> Option<CacheRecord>;

    /// Persist `record` under `key`, replacing any previous content.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::WriteFailed` if the record cannot be written.
    fn store(&self, key: &FingerprintKey, record: &CacheRecord) -> Result<(), StoreError>;

    /// Load a bare content digest stored under `key`.
    fn load_digest(&self, key: &FingerprintKey) -> Option<String>;

    /// Persist a bare content digest under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::WriteFailed` if the digest cannot be written.
    fn store_digest(&self, key: &FingerprintKey, digest: &str) -> Result<(), StoreError>;
}
