use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::domain::value_objects::thresholds::{ThresholdPair, ThresholdSet};

/// Top-level application configuration loaded from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub thresholds: ThresholdConfig,
    #[serde(default)]
    pub monitoring: MonitoringConfig,
    #[serde(default)]
    pub security: SecurityConfig,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub notifications: NotificationConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
}

/// Warning/critical percentages for each resource check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdConfig {
    #[serde(default = "default_disk_warning")]
    pub disk_warning: f64,
    #[serde(default = "default_disk_critical")]
    pub disk_critical: f64,
    #[serde(default = "default_memory_warning")]
    pub memory_warning: f64,
    #[serde(default = "default_memory_critical")]
    pub memory_critical: f64,
    /// One-minute load average as a percentage of the core count
    #[serde(default = "default_cpu_warning")]
    pub cpu_warning: f64,
    #[serde(default = "default_cpu_critical")]
    pub cpu_critical: f64,
    /// Only applied while available memory is below 15%
    #[serde(default = "default_swap_warning")]
    pub swap_warning: f64,
    #[serde(default = "default_swap_critical")]
    pub swap_critical: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    /// Process names that must be running
    #[serde(default = "default_required_services")]
    pub required_services: Vec<String>,
}

/// Security scanner tuning: whitelists, look-back windows and cache location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    #[serde(default = "default_whitelisted_users")]
    pub whitelisted_users: Vec<String>,
    #[serde(default = "default_whitelisted_directories")]
    pub whitelisted_directories: Vec<String>,
    #[serde(default = "default_excluded_paths")]
    pub excluded_paths: Vec<String>,
    /// Files (relative to `app_root`) exempt from the malware scan
    #[serde(default)]
    pub whitelisted_files: Vec<String>,
    #[serde(default = "default_alert_cooldown")]
    pub alert_cooldown_minutes: i64,
    // Stored with tilde, expanded at point of use.
    #[serde(default = "default_cache_dir")]
    pub cache_dir: String,
    #[serde(default = "default_failed_login_threshold")]
    pub failed_login_threshold: usize,
    #[serde(default = "default_week")]
    pub new_user_days: u64,
    #[serde(default = "default_week")]
    pub ssh_key_days: u64,
    #[serde(default = "default_day")]
    pub system_file_days: u64,
    #[serde(default = "default_day")]
    pub crontab_days: u64,
    #[serde(default = "default_large_file_min_mb")]
    pub large_file_min_mb: u64,
    #[serde(default = "default_day")]
    pub large_file_days: u64,
    #[serde(default = "default_disk_alert_percent")]
    pub disk_alert_percent: f64,
    #[serde(default = "default_suspicious_ports")]
    pub suspicious_ports: Vec<u16>,
    #[serde(default = "default_exposed_service_ports")]
    pub exposed_service_ports: Vec<u16>,
    /// Base directory of the malware scan
    #[serde(default = "default_app_root")]
    pub app_root: String,
    /// Extra directories scanned, relative to `app_root`
    #[serde(default = "default_scan_dirs")]
    pub scan_dirs: Vec<String>,
}

/// Host locations inspected by the scanners.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_home_dir")]
    pub home_dir: String,
    #[serde(default = "default_etc_dir")]
    pub etc_dir: String,
    #[serde(default = "default_cron_paths")]
    pub cron_paths: Vec<String>,
    #[serde(default = "default_auth_log")]
    pub auth_log: String,
    #[serde(default = "default_temp_dirs")]
    pub temp_dirs: Vec<String>,
}

/// Delivery channels: mail, log file, webhook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    #[serde(default = "default_channels")]
    pub channels: Vec<String>,
    #[serde(default)]
    pub admin_emails: Vec<String>,
    #[serde(default = "default_from")]
    pub from: String,
    #[serde(default = "default_sendmail_path")]
    pub sendmail_path: String,
    #[serde(default)]
    pub log_file: Option<String>,
    #[serde(default)]
    pub webhook_url: Option<String>,
    #[serde(default = "default_app_name")]
    pub app_name: String,
}

/// Daemon job intervals in seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    #[serde(default = "default_monitor_secs")]
    pub monitor_secs: u64,
    #[serde(default = "default_security_secs")]
    pub security_secs: u64,
    #[serde(default = "default_malware_secs")]
    pub malware_secs: u64,
    #[serde(default = "default_crontabs_secs")]
    pub crontabs_secs: u64,
    #[serde(default = "default_comprehensive_secs")]
    pub comprehensive_secs: u64,
}

// --- Defaults ---

const fn default_disk_warning() -> f64 {
    80.0
}

const fn default_disk_critical() -> f64 {
    90.0
}

const fn default_memory_warning() -> f64 {
    80.0
}

const fn default_memory_critical() -> f64 {
    90.0
}

const fn default_cpu_warning() -> f64 {
    70.0
}

const fn default_cpu_critical() -> f64 {
    90.0
}

const fn default_swap_warning() -> f64 {
    50.0
}

const fn default_swap_critical() -> f64 {
    75.0
}

fn default_required_services() -> Vec<String> {
    vec!["mysqld".into()]
}

fn default_whitelisted_users() -> Vec<String> {
    ["forge", "root", "www-data", "mysql", "redis", "nobody"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_whitelisted_directories() -> Vec<String> {
    ["/home/forge", "/home/root", "/var/www"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_excluded_paths() -> Vec<String> {
    [
        "vendor",
        "node_modules",
        "storage/framework/cache",
        "storage/framework/sessions",
        "storage/framework/views",
        "storage/logs",
        "bootstrap/cache",
        ".git",
        "public/storage",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

const fn default_alert_cooldown() -> i64 {
    120
}

fn default_cache_dir() -> String {
    "~/.local/share/hostguard/security_cache".into()
}

const fn default_failed_login_threshold() -> usize {
    20
}

const fn default_week() -> u64 {
    7
}

const fn default_day() -> u64 {
    1
}

const fn default_large_file_min_mb() -> u64 {
    100
}

const fn default_disk_alert_percent() -> f64 {
    90.0
}

fn default_suspicious_ports() -> Vec<u16> {
    vec![4444, 5555, 31337, 12345]
}

fn default_exposed_service_ports() -> Vec<u16> {
    vec![6800, 6801]
}

fn default_app_root() -> String {
    "/var/www/html".into()
}

fn default_scan_dirs() -> Vec<String> {
    vec!["public".into(), "storage/app/public".into()]
}

fn default_home_dir() -> String {
    "/home".into()
}

fn default_etc_dir() -> String {
    "/etc".into()
}

fn default_cron_paths() -> Vec<String> {
    [
        "/var/spool/cron/crontabs",
        "/etc/crontab",
        "/etc/cron.d",
        "/etc/cron.daily",
        "/etc/cron.hourly",
        "/etc/cron.weekly",
        "/etc/cron.monthly",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_auth_log() -> String {
    "/var/log/auth.log".into()
}

fn default_temp_dirs() -> Vec<String> {
    vec!["/tmp".into(), "/var/tmp".into(), "/home".into()]
}

fn default_channels() -> Vec<String> {
    vec!["mail".into()]
}

fn default_from() -> String {
    "hostguard@localhost".into()
}

fn default_sendmail_path() -> String {
    "/usr/sbin/sendmail".into()
}

fn default_app_name() -> String {
    "hostguard".into()
}

const fn default_monitor_secs() -> u64 {
    600
}

const fn default_security_secs() -> u64 {
    1800
}

const fn default_malware_secs() -> u64 {
    3600
}

const fn default_crontabs_secs() -> u64 {
    300
}

const fn default_comprehensive_secs() -> u64 {
    86_400
}

// --- Default impls ---

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            disk_warning: default_disk_warning(),
            disk_critical: default_disk_critical(),
            memory_warning: default_memory_warning(),
            memory_critical: default_memory_critical(),
            cpu_warning: default_cpu_warning(),
            cpu_critical: default_cpu_critical(),
            swap_warning: default_swap_warning(),
            swap_critical: default_swap_critical(),
        }
    }
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            required_services: default_required_services(),
        }
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            whitelisted_users: default_whitelisted_users(),
            whitelisted_directories: default_whitelisted_directories(),
            excluded_paths: default_excluded_paths(),
            whitelisted_files: Vec::new(),
            alert_cooldown_minutes: default_alert_cooldown(),
            cache_dir: default_cache_dir(),
            failed_login_threshold: default_failed_login_threshold(),
            new_user_days: default_week(),
            ssh_key_days: default_week(),
            system_file_days: default_day(),
            crontab_days: default_day(),
            large_file_min_mb: default_large_file_min_mb(),
            large_file_days: default_day(),
            disk_alert_percent: default_disk_alert_percent(),
            suspicious_ports: default_suspicious_ports(),
            exposed_service_ports: default_exposed_service_ports(),
            app_root: default_app_root(),
            scan_dirs: default_scan_dirs(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            home_dir: default_home_dir(),
            etc_dir: default_etc_dir(),
            cron_paths: default_cron_paths(),
            auth_log: default_auth_log(),
            temp_dirs: default_temp_dirs(),
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            channels: default_channels(),
            admin_emails: Vec::new(),
            from: default_from(),
            sendmail_path: default_sendmail_path(),
            log_file: None,
            webhook_url: None,
            app_name: default_app_name(),
        }
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            monitor_secs: default_monitor_secs(),
            security_secs: default_security_secs(),
            malware_secs: default_malware_secs(),
            crontabs_secs: default_crontabs_secs(),
            comprehensive_secs: default_comprehensive_secs(),
        }
    }
}

// --- AppConfig methods ---

impl AppConfig {
    /// Load config from default path or create default config file
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be determined,
    /// the file cannot be read, or the TOML content is invalid.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_or_create(&path)
    }

    /// Load from a specific path, or create a default config file if missing
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML content is invalid,
    /// or the default config file cannot be written.
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from(path)
        } else {
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Load from a specific path
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the TOML content is invalid.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).context("Failed to read config file")?;
        toml::from_str(&content).context("Failed to parse config file")
    }

    /// Save config to a specific path, creating parent directories if needed
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created,
    /// serialization fails, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content).context("Failed to write config file")?;
        Ok(())
    }

    /// Applies `SERVER_MONITOR_*` overrides from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|name| std::env::var(name).ok());
    }

    /// Applies overrides from an arbitrary variable lookup.
    ///
    /// Unparseable values are logged and ignored.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let t = &mut self.thresholds;
        let numeric: [(&str, &mut f64); 8] = [
            ("SERVER_MONITOR_DISK_WARNING", &mut t.disk_warning),
            ("SERVER_MONITOR_DISK_CRITICAL", &mut t.disk_critical),
            ("SERVER_MONITOR_MEMORY_WARNING", &mut t.memory_warning),
            ("SERVER_MONITOR_MEMORY_CRITICAL", &mut t.memory_critical),
            ("SERVER_MONITOR_CPU_WARNING", &mut t.cpu_warning),
            ("SERVER_MONITOR_CPU_CRITICAL", &mut t.cpu_critical),
            ("SERVER_MONITOR_SWAP_WARNING", &mut t.swap_warning),
            ("SERVER_MONITOR_SWAP_CRITICAL", &mut t.swap_critical),
        ];
        for (name, slot) in numeric {
            if let Some(raw) = lookup(name) {
                match raw.trim().parse::<f64>() {
                    Ok(value) => *slot = value,
                    Err(_) => tracing::warn!(variable = name, value = %raw, "ignoring invalid threshold override"),
                }
            }
        }

        if let Some(raw) = lookup("SERVER_MONITOR_ALERT_COOLDOWN") {
            match raw.trim().parse::<i64>() {
                Ok(minutes) => self.security.alert_cooldown_minutes = minutes,
                Err(_) => tracing::warn!(value = %raw, "ignoring invalid alert cooldown override"),
            }
        }

        if let Some(raw) = lookup("SERVER_MONITOR_ADMIN_EMAILS") {
            self.notifications.admin_emails = raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }
    }

    /// Cache directory with `~` expanded.
    #[must_use]
    pub fn cache_dir(&self) -> PathBuf {
        expand_path(&self.security.cache_dir)
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(config_dir.join("hostguard").join("config.toml"))
    }
}

/// Expands a leading `~` against the home directory.
#[must_use]
pub fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).as_ref())
}

fn pair(warning: f64, critical: f64) -> ThresholdPair {
    let warning = warning.clamp(0.0, 100.0);
    let critical = critical.clamp(0.0, 100.0);
    ThresholdPair::new(warning, critical.max(warning))
}

impl From<&ThresholdConfig> for ThresholdSet {
    fn from(config: &ThresholdConfig) -> Self {
        Self {
            disk: pair(config.disk_warning, config.disk_critical),
            memory: pair(config.memory_warning, config.memory_critical),
            // Load can exceed 100% of the cores.
            cpu: ThresholdPair::new(
                config.cpu_warning.max(0.0),
                config.cpu_critical.max(config.cpu_warning.max(0.0)),
            ),
            swap: pair(config.swap_warning, config.swap_critical),
        }
    }
}
