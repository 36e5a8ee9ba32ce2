//! Suspicious PHP code and freshly uploaded scripts in the web root.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use regex::bytes::Regex;

use super::filesystem;
use super::filters;
use crate::application::config::{expand_path, SecurityConfig};
use crate::application::services::change_detector::ChangeDetector;
use crate::domain::entities::alert::Alert;
use crate::domain::entities::fingerprint::FingerprintKey;
use crate::domain::ports::store::FingerprintStore;

pub const PATTERNS_NAMESPACE: &str = "malware_patterns";
pub const UPLOADS_NAMESPACE: &str = "recent_uploads";

/// Dynamic code execution on variables and raw superglobal access.
const SUSPICIOUS_PHP: &str = r#"(eval\s*\(\s*\$|base64_decode\s*\(\s*\$|\$\w+\s*=\s*base64_decode|shell_exec\s*\(\s*\$|system\s*\(\s*\$|exec\s*\(\s*\$|passthru\s*\(\s*\$|popen\s*\(\s*\$|proc_open\s*\(\s*\$|file_get_contents\s*\(\s*\$|\$_[A-Z]+\s*\[\s*["'][^"']*["'])"#;

const SCRIPT_EXTENSIONS: &[&str] = &["php", "phtml", "php3", "php4", "php5"];
const UPLOAD_DAYS: u64 = 1;
const UPLOAD_DETAIL_LIMIT: usize = 20;

pub struct MalwareScanner<'a> {
    detector: ChangeDetector<'a>,
    app_root: PathBuf,
    directories: Vec<PathBuf>,
    excluded_paths: &'a [String],
    whitelisted_files: &'a [String],
    cooldown_minutes: i64,
    pattern: Regex,
}

impl<'a> MalwareScanner<'a> {
    /// # Errors
    ///
    /// Returns an error if the code pattern fails to compile.
    pub fn new(store: &'a dyn FingerprintStore, security: &'a SecurityConfig) -> Result<Self, regex::Error> {
        let app_root = expand_path(&security.app_root);
        let mut directories = vec![app_root.clone()];
        directories.extend(security.scan_dirs.iter().map(|d| app_root.join(d)));

        Ok(Self {
            detector: ChangeDetector::new(store),
            app_root,
            directories,
            excluded_paths: &security.excluded_paths,
            whitelisted_files: &security.whitelisted_files,
            cooldown_minutes: security.alert_cooldown_minutes,
            pattern: Regex::new(SUSPICIOUS_PHP)?,
        })
    }

    /// Scans every configured directory; missing directories are skipped.
    #[must_use]
    pub fn scan(&self) -> Vec<Alert> {
        let mut alerts = Vec::new();
        for dir in &self.directories {
            if !dir.is_dir() {
                tracing::debug!(dir = %dir.display(), "Malware scan directory missing");
                continue;
            }
            alerts.extend(self.check_patterns(dir));
            alerts.extend(self.check_recent_uploads(dir));
        }
        alerts
    }

    /// PHP files under `dir` whose content matches the suspicious-code pattern.
    #[must_use]
    pub fn matching_files(&self, dir: &Path) -> Vec<String> {
        let files: Vec<String> = self
            .candidate_files(dir, &["php"])
            .into_iter()
            .filter(|path| match std::fs::read(path) {
                Ok(content) => self.pattern.is_match(&content),
                Err(e) => {
                    tracing::debug!(path = %path.display(), "Cannot read file: {e}");
                    false
                }
            })
            .map(|p| p.to_string_lossy().into_owned())
            .collect();
        filters::without_whitelisted_files(files, &self.app_root, self.whitelisted_files)
    }

    /// Scripts under `dir` modified within the last day.
    #[must_use]
    pub fn recent_uploads(&self, dir: &Path) -> Vec<String> {
        let now = SystemTime::now();
        let files: Vec<String> = self
            .candidate_files(dir, SCRIPT_EXTENSIONS)
            .into_iter()
            .filter(|path| {
                std::fs::metadata(path)
                    .is_ok_and(|meta| filesystem::modified_within(&meta, UPLOAD_DAYS, now))
            })
            .map(|p| p.to_string_lossy().into_owned())
            .collect();
        filters::without_whitelisted_files(files, &self.app_root, self.whitelisted_files)
    }

    fn check_patterns(&self, dir: &Path) -> Option<Alert> {
        let files = self.matching_files(dir);
        if files.is_empty() {
            return None;
        }

        let key = FingerprintKey::for_scope(PATTERNS_NAMESPACE, &dir.to_string_lossy());
        if !self.detector.should_alert(&key, &files, self.cooldown_minutes) {
            tracing::debug!(dir = %dir.display(), "Suspicious files unchanged, alert suppressed");
            return None;
        }

        Some(Alert::security(
            PATTERNS_NAMESPACE,
            "Suspicious PHP Code Patterns",
            format!("Directory: {}\nFiles:\n{}", dir.display(), files.join("\n")),
        ))
    }

    fn check_recent_uploads(&self, dir: &Path) -> Option<Alert> {
        let files = self.recent_uploads(dir);
        if files.is_empty() {
            return None;
        }

        let key = FingerprintKey::for_scope(UPLOADS_NAMESPACE, &dir.to_string_lossy());
        if !self.detector.should_alert(&key, &files, self.cooldown_minutes) {
            tracing::debug!(dir = %dir.display(), "Recent uploads unchanged, alert suppressed");
            return None;
        }

        let shown: Vec<&str> = files
            .iter()
            .take(UPLOAD_DETAIL_LIMIT)
            .map(String::as_str)
            .collect();
        Some(Alert::security(
            UPLOADS_NAMESPACE,
            "Recently Uploaded PHP Files",
            format!("Directory: {}\nFiles:\n{}", dir.display(), shown.join("\n")),
        ))
    }

    fn candidate_files(&self, dir: &Path, extensions: &[&str]) -> Vec<PathBuf> {
        let excluded = self.excluded_paths;
        filesystem::walk_files(dir, |p| filters::is_excluded(&p.to_string_lossy(), excluded))
            .into_iter()
            .map(|(path, _)| path)
            .filter(|path| {
                path.extension()
                    .is_some_and(|ext| extensions.iter().any(|e| ext.eq_ignore_ascii_case(e)))
            })
            .filter(|path| !filters::is_excluded(&path.to_string_lossy(), excluded))
            .collect()
    }
}
