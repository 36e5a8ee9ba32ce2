use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::disk::DiskInfo;
use super::process::ProcessInfo;

/// Resource measurements taken at a point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceSnapshot {
    pub timestamp: DateTime<Utc>,
    pub memory: MemoryInfo,
    pub cpu: CpuInfo,
    pub disks: Vec<DiskInfo>,
    pub processes: Vec<ProcessInfo>,
}

impl ResourceSnapshot {
    /// The root filesystem, or the fullest disk when `/` is not mounted separately.
    #[must_use]
    pub fn root_disk(&self) -> Option<&DiskInfo> {
        self.disks
            .iter()
            .find(|d| d.mount_point == "/")
            .or_else(|| {
                self.disks
                    .iter()
                    .max_by(|a, b| a.usage_percent.total_cmp(&b.usage_percent))
            })
    }

    #[must_use]
    pub fn is_process_running(&self, name: &str) -> bool {
        self.processes.iter().any(|p| p.name == name)
    }
}

/// System memory usage information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryInfo {
    pub total_mb: u64,
    pub used_mb: u64,
    pub available_mb: u64,
    pub swap_total_mb: u64,
    pub swap_used_mb: u64,
    pub usage_percent: f64,
    pub available_percent: f64,
    pub swap_percent: f64,
}

/// CPU load information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpuInfo {
    pub core_count: usize,
    pub load_avg_1m: f64,
    pub load_avg_5m: f64,
    pub load_avg_15m: f64,
}

impl CpuInfo {
    /// One-minute load expressed as a percentage of the available cores.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn load_percent(&self) -> f64 {
        let cores = self.core_count.max(1) as f64;
        self.load_avg_1m / cores * 100.0
    }
}
