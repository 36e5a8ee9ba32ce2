//! Whitelist and exclusion rules applied to raw findings.

use std::path::Path;

/// True when `path` contains `/<excluded>/` or `/<excluded>` for any entry.
#[must_use]
pub fn is_excluded(path: &str, excluded: &[String]) -> bool {
    excluded.iter().any(|ex| {
        let ex = ex.trim_matches('/');
        !ex.is_empty() && (path.contains(&format!("/{ex}/")) || path.contains(&format!("/{ex}")))
    })
}

/// Drops files whose path relative to `base` is whitelisted.
#[must_use]
pub fn without_whitelisted_files(files: Vec<String>, base: &Path, whitelisted: &[String]) -> Vec<String> {
    if whitelisted.is_empty() {
        return files;
    }
    let prefix = format!("{}/", base.to_string_lossy().trim_end_matches('/'));
    files
        .into_iter()
        .filter(|file| {
            let relative = file.strip_prefix(prefix.as_str()).unwrap_or(file.as_str());
            !whitelisted.iter().any(|w| w.as_str() == relative)
        })
        .collect()
}

/// Removes home directories that belong to known accounts.
///
/// A directory is dropped when its full path is whitelisted or when its last
/// component is a whitelisted username.
#[must_use]
pub fn unknown_home_directories(
    dirs: Vec<String>,
    whitelisted_dirs: &[String],
    whitelisted_users: &[String],
) -> Vec<String> {
    dirs.into_iter()
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
        .filter(|d| !whitelisted_dirs.iter().any(|w| w.trim_end_matches('/') == d.as_str()))
        .filter(|d| {
            let username = Path::new(d)
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            !whitelisted_users.contains(&username)
        })
        .collect()
}
