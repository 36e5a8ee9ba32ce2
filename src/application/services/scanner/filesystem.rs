//! Filesystem walks shared by the scanners.

use std::fs::Metadata;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use walkdir::WalkDir;

const SECS_PER_DAY: u64 = 86_400;

/// Whether `meta` was modified less than `days` days before `now`.
///
/// Timestamps in the future count as recent.
#[must_use]
pub fn modified_within(meta: &Metadata, days: u64, now: SystemTime) -> bool {
    let Ok(modified) = meta.modified() else {
        return false;
    };
    now.duration_since(modified)
        .map_or(true, |age| age < Duration::from_secs(days.saturating_mul(SECS_PER_DAY)))
}

/// Regular files under `root` (or `root` itself when it is a file).
///
/// Symlinks are not followed; unreadable entries are skipped. Directories
/// for which `prune` returns true are not descended into.
pub fn walk_files<F>(root: &Path, prune: F) -> Vec<(PathBuf, Metadata)>
where
    F: Fn(&Path) -> bool,
{
    if !root.exists() {
        tracing::debug!(path = %root.display(), "Scan root missing, skipping");
        return Vec::new();
    }

    WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !(e.file_type().is_dir() && prune(e.path())))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::debug!("Skipping unreadable entry: {e}");
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| {
            let meta = e.metadata().ok()?;
            Some((e.into_path(), meta))
        })
        .collect()
}

/// Files under every root modified within `days`, as display strings.
#[must_use]
pub fn recent_files(roots: &[PathBuf], days: u64, now: SystemTime) -> Vec<String> {
    roots
        .iter()
        .flat_map(|root| walk_files(root, |_| false))
        .filter(|(_, meta)| modified_within(meta, days, now))
        .map(|(path, _)| path.to_string_lossy().into_owned())
        .collect()
}

/// Directories directly inside `parent`, with their metadata.
#[must_use]
pub fn child_directories(parent: &Path) -> Vec<(PathBuf, Metadata)> {
    let Ok(entries) = std::fs::read_dir(parent) else {
        tracing::debug!(path = %parent.display(), "Cannot list directory");
        return Vec::new();
    };

    let mut dirs: Vec<(PathBuf, Metadata)> = entries
        .filter_map(Result::ok)
        .filter_map(|entry| {
            let meta = std::fs::symlink_metadata(entry.path()).ok()?;
            meta.is_dir().then(|| (entry.path(), meta))
        })
        .collect();
    dirs.sort_by(|a, b| a.0.cmp(&b.0));
    dirs
}
