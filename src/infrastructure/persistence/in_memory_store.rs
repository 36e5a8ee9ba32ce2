use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::entities::fingerprint::{CacheRecord, FingerprintKey};
use crate::domain::ports::store::{FingerprintStore, StoreError};

/// In-memory fingerprint store for tests and embedding.
pub struct InMemoryFingerprintStore {
    records: Mutex<HashMap<FingerprintKey, CacheRecord>>,
    digests: Mutex<HashMap<FingerprintKey, String>>,
}

impl InMemoryFingerprintStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            digests: Mutex::new(HashMap::new()),
        }
    }

    /// Number of item-set records held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.lock().map_or(0, |r| r.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryFingerprintStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FingerprintStore for InMemoryFingerprintStore {
    fn load(&self, key: &FingerprintKey) -> Option<CacheRecord> {
        self.records.lock().ok()?.get(key).cloned()
    }

    fn store(&self, key: &FingerprintKey, record: &CacheRecord) -> Result<(), StoreError> {
        self.records
            .lock()
            .map_err(|_| StoreError::WriteFailed("lock poisoned".into()))?
            .insert(key.clone(), record.clone());
        Ok(())
    }

    fn load_digest(&self, key: &FingerprintKey) -> Option<String> {
        self.digests.lock().ok()?.get(key).cloned()
    }

    fn store_digest(&self, key: &FingerprintKey, digest: &str) -> Result<(), StoreError> {
        self.digests
            .lock()
            .map_err(|_| StoreError::WriteFailed("lock poisoned".into()))?
            .insert(key.clone(), digest.to_string());
        Ok(())
    }
}
