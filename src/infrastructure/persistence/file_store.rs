use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::domain::entities::fingerprint::{CacheRecord, FingerprintKey};
use crate::domain::ports::store::{FingerprintStore, StoreError};

/// One file per key under a base directory.
///
/// Item sets live in `<key>.json` as `{"timestamp": .., "items": [..]}`,
/// integrity digests in `<key>.sha256`. Unreadable or malformed files load as
/// absent. Writes go through a temporary file renamed over the target.
/// There is no locking between concurrent processes.
pub struct FileFingerprintStore {
    base_dir: PathBuf,
}

impl FileFingerprintStore {
    #[must_use]
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    #[must_use]
    pub fn record_path(&self, key: &FingerprintKey) -> PathBuf {
        self.base_dir.join(format!("{key}.json"))
    }

    #[must_use]
    pub fn digest_path(&self, key: &FingerprintKey) -> PathBuf {
        self.base_dir.join(format!("{key}.sha256"))
    }

    fn read(path: &Path) -> Option<String> {
        match std::fs::read_to_string(path) {
            Ok(content) => Some(content),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(path = %path.display(), "Failed to read cache file: {e}");
                None
            }
        }
    }

    fn write_atomic(&self, path: &Path, content: &str) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.base_dir).map_err(|e| {
            StoreError::WriteFailed(format!("creating {}: {e}", self.base_dir.display()))
        })?;

        let mut tmp_name = path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);

        std::fs::write(&tmp_path, content).map_err(|e| {
            StoreError::WriteFailed(format!("writing {}: {e}", tmp_path.display()))
        })?;

        std::fs::rename(&tmp_path, path).map_err(|e| {
            let _ = std::fs::remove_file(&tmp_path);
            StoreError::WriteFailed(format!(
                "renaming {} to {}: {e}",
                tmp_path.display(),
                path.display()
            ))
        })
    }
}

impl FingerprintStore for FileFingerprintStore {
    fn load(&self, key: &FingerprintKey) -> Option<CacheRecord> {
        let path = self.record_path(key);
        let content = Self::read(&path)?;
        match serde_json::from_str::<CacheRecord>(&content) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::debug!(path = %path.display(), "Ignoring malformed cache record: {e}");
                None
            }
        }
    }

    fn store(&self, key: &FingerprintKey, record: &CacheRecord) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(record)
            .map_err(|e| StoreError::WriteFailed(format!("serializing record: {e}")))?;
        self.write_atomic(&self.record_path(key), &content)
    }

    fn load_digest(&self, key: &FingerprintKey) -> Option<String> {
        let digest = Self::read(&self.digest_path(key))?.trim().to_string();
        if digest.is_empty() {
            None
        } else {
            Some(digest)
        }
    }

    fn store_digest(&self, key: &FingerprintKey, digest: &str) -> Result<(), StoreError> {
        self.write_atomic(&self.digest_path(key), digest)
    }
}
