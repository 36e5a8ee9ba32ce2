use sysinfo::Disks;

use crate::domain::entities::disk::DiskInfo;
use crate::domain::ports::collector::CollectionError;

const BYTES_PER_GB: f64 = 1_073_741_824.0;

/// Filesystem types that never hold user data.
const PSEUDO_FILESYSTEMS: &[&str] = &[
    "tmpfs",
    "devtmpfs",
    "sysfs",
    "proc",
    "cgroup2",
    "squashfs",
    "efivarfs",
    "bpf",
    "hugetlbfs",
    "mqueue",
    "pstore",
    "securityfs",
    "debugfs",
    "tracefs",
    "fusectl",
    "rpc_pipefs",
];

#[must_use]
pub fn is_real_filesystem(fs: &str, total_bytes: u64) -> bool {
    total_bytes > 0 && !PSEUDO_FILESYSTEMS.contains(&fs)
}

/// Used share of a filesystem, rounded up like `df` reports it.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn usage_percent(total_bytes: u64, available_bytes: u64) -> f64 {
    if total_bytes == 0 {
        return 0.0;
    }
    let used = total_bytes.saturating_sub(available_bytes);
    ((used as f64 / total_bytes as f64) * 100.0)
        .ceil()
        .clamp(0.0, 100.0)
}

/// Mounted filesystems through `sysinfo::Disks`.
#[derive(Debug, Default)]
pub struct DiskCollector;

impl DiskCollector {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Reads the current mount list and returns every real filesystem.
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::MetricsUnavailable` when no filesystem is mounted.
    #[allow(clippy::cast_precision_loss)]
    pub fn collect(&self) -> Result<Vec<DiskInfo>, CollectionError> {
        let disks = Disks::new_with_refreshed_list();
        if disks.list().is_empty() {
            return Err(CollectionError::MetricsUnavailable(
                "no mounted filesystem reported".into(),
            ));
        }

        let mut infos: Vec<DiskInfo> = disks
            .iter()
            .filter(|d| is_real_filesystem(&d.file_system().to_string_lossy(), d.total_space()))
            .map(|disk| DiskInfo {
                mount_point: disk.mount_point().to_string_lossy().to_string(),
                total_gb: disk.total_space() as f64 / BYTES_PER_GB,
                available_gb: disk.available_space() as f64 / BYTES_PER_GB,
                usage_percent: usage_percent(disk.total_space(), disk.available_space()),
                filesystem: disk.file_system().to_string_lossy().to_string(),
            })
            .collect();

        infos.sort_by(|a, b| a.mount_point.cmp(&b.mount_point));
        infos.dedup_by(|a, b| a.mount_point == b.mount_point);
        Ok(infos)
    }
}
