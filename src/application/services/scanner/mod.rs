//! Compromise-indicator checks over processes, sockets and the filesystem.

pub mod crontab;
pub mod filesystem;
pub mod filters;
pub mod malware;

use std::path::PathBuf;
use std::time::SystemTime;

use regex::Regex;

use super::change_detector::ChangeDetector;
use crate::application::config::{expand_path, AppConfig, PathsConfig, SecurityConfig};
use crate::domain::entities::alert::Alert;
use crate::domain::entities::fingerprint::FingerprintKey;
use crate::domain::entities::socket::ListeningSocket;
use crate::domain::ports::inspector::HostInspector;
use crate::domain::ports::store::FingerprintStore;

const SUSPICIOUS_COMMAND: &str = r"(wget|curl).*\.sh";
const SENSITIVE_SYSTEM_FILE: &str = r"(passwd|shadow|sudoers|crontab|ssh)";
const FAILED_LOGIN_MARKER: &str = "Failed password";
const FAILED_LOGIN_WINDOW: usize = 50;
const FAILED_LOGIN_DETAIL_LINES: usize = 20;
const LARGE_FILE_LIMIT: usize = 20;
const BYTES_PER_MB: u64 = 1_048_576;

pub const NEW_USERS_NAMESPACE: &str = "new_users";

/// Runs the host security checks.
///
/// Each check returns `None` (or an empty list) when nothing suspicious was
/// found. Unavailable data sources are logged and treated as clean.
pub struct SecurityScanner<'a> {
    inspector: &'a dyn HostInspector,
    detector: ChangeDetector<'a>,
    security: &'a SecurityConfig,
    paths: &'a PathsConfig,
    suspicious_command: Regex,
    sensitive_file: Regex,
}

impl<'a> SecurityScanner<'a> {
    /// # Errors
    ///
    /// Returns an error if a built-in pattern fails to compile.
    pub fn new(
        inspector: &'a dyn HostInspector,
        store: &'a dyn FingerprintStore,
        config: &'a AppConfig,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            inspector,
            detector: ChangeDetector::new(store),
            security: &config.security,
            paths: &config.paths,
            suspicious_command: Regex::new(SUSPICIOUS_COMMAND)?,
            sensitive_file: Regex::new(SENSITIVE_SYSTEM_FILE)?,
        })
    }

    /// Every check, in reporting order.
    #[must_use]
    pub fn run_all(&self) -> Vec<Alert> {
        let mut alerts = Vec::new();
        alerts.extend(self.check_suspicious_processes());
        alerts.extend(self.check_suspicious_ports());
        alerts.extend(self.check_crontab_modifications());
        alerts.extend(self.check_failed_logins());
        alerts.extend(self.check_new_users());
        alerts.extend(self.check_modified_system_files());
        alerts.extend(self.check_ssh_keys());
        alerts.extend(self.check_large_files());
        alerts.extend(self.check_disk_usage());
        alerts
    }

    /// Processes downloading shell scripts.
    #[must_use]
    pub fn check_suspicious_processes(&self) -> Option<Alert> {
        let processes = match self.inspector.processes() {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!("Process list unavailable: {e}");
                return None;
            }
        };

        let own_pid = std::process::id();
        let lines: Vec<String> = processes
            .iter()
            .filter(|p| p.pid != own_pid && self.suspicious_command.is_match(&p.cmdline))
            .map(ToString::to_string)
            .collect();

        (!lines.is_empty()).then(|| {
            Alert::security("suspicious_processes", "Suspicious Processes", lines.join("\n"))
        })
    }

    /// Non-loopback listeners on known backdoor ports or exposed internal services.
    #[must_use]
    pub fn check_suspicious_ports(&self) -> Vec<Alert> {
        let exposed = self.listening_ports();
        let mut alerts = Vec::new();

        let matching = |ports: &[u16]| -> Vec<String> {
            exposed
                .iter()
                .filter(|s| ports.contains(&s.port))
                .map(ToString::to_string)
                .collect()
        };

        let backdoors = matching(&self.security.suspicious_ports);
        if !backdoors.is_empty() {
            alerts.push(Alert::security(
                "suspicious_ports",
                "Suspicious Network Ports",
                backdoors.join("\n"),
            ));
        }

        let services = matching(&self.security.exposed_service_ports);
        if !services.is_empty() {
            alerts.push(Alert::security(
                "exposed_services",
                "Scrapyd Service Exposed",
                services.join("\n"),
            ));
        }

        alerts
    }

    #[must_use]
    pub fn check_crontab_modifications(&self) -> Option<Alert> {
        let files = filesystem::recent_files(
            &self.cron_paths(),
            self.security.crontab_days,
            SystemTime::now(),
        );
        (!files.is_empty()).then(|| {
            Alert::security("crontabs", "Recently Modified Crontabs", files.join("\n"))
        })
    }

    /// Brute-force indicator: `Failed password` lines among the most recent ones.
    #[must_use]
    pub fn check_failed_logins(&self) -> Option<Alert> {
        let path = expand_path(&self.paths.auth_log);
        let content = match std::fs::read(&path) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => {
                tracing::debug!(path = %path.display(), "Auth log unavailable: {e}");
                return None;
            }
        };

        let failures: Vec<&str> = content
            .lines()
            .filter(|l| l.contains(FAILED_LOGIN_MARKER))
            .collect();
        let window = &failures[failures.len().saturating_sub(FAILED_LOGIN_WINDOW)..];

        if window.len() <= self.security.failed_login_threshold {
            return None;
        }

        let recent = &window[window.len().saturating_sub(FAILED_LOGIN_DETAIL_LINES)..];
        Some(Alert::security(
            "failed_logins",
            "High Failed Login Attempts",
            format!("Count: {}\nRecent attempts:\n{}", window.len(), recent.join("\n")),
        ))
    }

    /// Recently created home directories of unknown accounts, deduplicated
    /// through the change detector.
    #[must_use]
    pub fn check_new_users(&self) -> Option<Alert> {
        let now = SystemTime::now();
        let candidates: Vec<String> =
            filesystem::child_directories(&expand_path(&self.paths.home_dir))
                .into_iter()
                .filter(|(_, meta)| filesystem::modified_within(meta, self.security.new_user_days, now))
                .map(|(path, _)| path.to_string_lossy().into_owned())
                .collect();

        let users = filters::unknown_home_directories(
            candidates,
            &self.security.whitelisted_directories,
            &self.security.whitelisted_users,
        );
        if users.is_empty() {
            return None;
        }

        let key = FingerprintKey::for_items(NEW_USERS_NAMESPACE, &users);
        if !self
            .detector
            .should_alert(&key, &users, self.security.alert_cooldown_minutes)
        {
            tracing::debug!(count = users.len(), "New users unchanged, alert suppressed");
            return None;
        }

        Some(Alert::security(
            "new_users",
            "Recently Created Users",
            users.join("\n"),
        ))
    }

    /// Recently changed account, sudo, cron and ssh configuration.
    #[must_use]
    pub fn check_modified_system_files(&self) -> Option<Alert> {
        let now = SystemTime::now();
        let files: Vec<String> = filesystem::walk_files(&expand_path(&self.paths.etc_dir), |_| false)
            .into_iter()
            .filter(|(_, meta)| filesystem::modified_within(meta, self.security.system_file_days, now))
            .map(|(path, _)| path.to_string_lossy().into_owned())
            .filter(|path| self.sensitive_file.is_match(path))
            .collect();

        (!files.is_empty()).then(|| {
            Alert::security("system_files", "Modified System Files", files.join("\n"))
        })
    }

    #[must_use]
    pub fn check_ssh_keys(&self) -> Option<Alert> {
        let now = SystemTime::now();
        let files: Vec<String> = filesystem::walk_files(&expand_path(&self.paths.home_dir), |_| false)
            .into_iter()
            .filter(|(path, _)| {
                path.file_name()
                    .is_some_and(|n| n.to_string_lossy().starts_with("authorized_keys"))
            })
            .filter(|(_, meta)| filesystem::modified_within(meta, self.security.ssh_key_days, now))
            .map(|(path, _)| path.to_string_lossy().into_owned())
            .collect();

        (!files.is_empty()).then(|| {
            Alert::security("ssh_keys", "Recently Modified SSH Keys", files.join("\n"))
        })
    }

    /// Fresh large files in temp areas (possible data dumps).
    #[must_use]
    pub fn check_large_files(&self) -> Option<Alert> {
        let now = SystemTime::now();
        let min_bytes = self.security.large_file_min_mb.saturating_mul(BYTES_PER_MB);
        let files: Vec<String> = self
            .paths
            .temp_dirs
            .iter()
            .flat_map(|dir| filesystem::walk_files(&expand_path(dir), |_| false))
            .filter(|(_, meta)| meta.len() > min_bytes)
            .filter(|(_, meta)| filesystem::modified_within(meta, self.security.large_file_days, now))
            .take(LARGE_FILE_LIMIT)
            .map(|(path, meta)| format!("{} ({} MB)", path.display(), meta.len() / BYTES_PER_MB))
            .collect();

        (!files.is_empty()).then(|| {
            Alert::security("large_files", "Large Files Created Recently", files.join("\n"))
        })
    }

    #[must_use]
    pub fn check_disk_usage(&self) -> Option<Alert> {
        let disks = match self.inspector.disks() {
            Ok(d) => d,
            Err(e) => {
                tracing::warn!("Disk list unavailable: {e}");
                return None;
            }
        };

        let full: Vec<String> = disks
            .iter()
            .filter(|d| d.usage_percent >= self.security.disk_alert_percent)
            .map(|d| {
                format!(
                    "{} {:.0}% used ({:.1} GB free of {:.1} GB)",
                    d.mount_point, d.usage_percent, d.available_gb, d.total_gb
                )
            })
            .collect();

        (!full.is_empty()).then(|| Alert::security("disk_usage", "High Disk Usage", full.join("\n")))
    }

    /// Listening sockets reachable from outside the host.
    #[must_use]
    pub fn listening_ports(&self) -> Vec<ListeningSocket> {
        match self.inspector.listening_sockets() {
            Ok(sockets) => sockets.into_iter().filter(|s| !s.is_loopback()).collect(),
            Err(e) => {
                tracing::warn!("Socket tables unavailable: {e}");
                Vec::new()
            }
        }
    }

    fn cron_paths(&self) -> Vec<PathBuf> {
        self.paths.cron_paths.iter().map(|p| expand_path(p)).collect()
    }
}
