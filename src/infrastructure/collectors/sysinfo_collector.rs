use std::path::PathBuf;
use std::sync::Mutex;

use sysinfo::{System, Users};

use super::disk_collector::DiskCollector;
use super::proc_net;
use crate::domain::entities::disk::DiskInfo;
use crate::domain::entities::process::ProcessInfo;
use crate::domain::entities::snapshot::{CpuInfo, MemoryInfo, ResourceSnapshot};
use crate::domain::entities::socket::ListeningSocket;
use crate::domain::ports::collector::{CollectionError, SystemCollector};
use crate::domain::ports::inspector::HostInspector;

const BYTES_PER_MB: u64 = 1_048_576;
const DEFAULT_PROC_NET: &str = "/proc/net";

/// Returns `(numerator / denominator) * 100.0`, or `0.0` when `denominator` is zero.
#[allow(clippy::cast_precision_loss)]
fn safe_percent(numerator: u64, denominator: u64) -> f64 {
    if denominator > 0 {
        (numerator as f64 / denominator as f64) * 100.0
    } else {
        0.0
    }
}

/// Host metrics, process table and sockets through `sysinfo` and `/proc`.
///
/// Uses `Mutex<System>` for interior mutability since the ports take `&self`
/// but `sysinfo::System` needs `&mut self` for refresh.
pub struct SysinfoCollector {
    sys: Mutex<System>,
    disk_collector: DiskCollector,
    proc_net_dir: PathBuf,
}

impl SysinfoCollector {
    #[must_use]
    pub fn new() -> Self {
        let mut sys = System::new_all();
        sys.refresh_all();
        Self {
            sys: Mutex::new(sys),
            disk_collector: DiskCollector::new(),
            proc_net_dir: PathBuf::from(DEFAULT_PROC_NET),
        }
    }

    fn refreshed(&self) -> Result<std::sync::MutexGuard<'_, System>, CollectionError> {
        let mut sys = self.sys.lock().map_err(|e| {
            CollectionError::MetricsUnavailable(format!("system lock poisoned: {e}"))
        })?;
        sys.refresh_all();
        Ok(sys)
    }
}

impl Default for SysinfoCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCollector for SysinfoCollector {
    fn collect(&self) -> Result<ResourceSnapshot, CollectionError> {
        let sys = self.refreshed()?;
        let memory = collect_memory(&sys);
        let cpu = collect_cpu(&sys);
        let processes = collect_processes(&sys);
        drop(sys);

        if memory.total_mb == 0 {
            return Err(CollectionError::MetricsUnavailable(
                "total memory reported as zero".into(),
            ));
        }

        let disks = self.disk_collector.collect().unwrap_or_else(|e| {
            tracing::warn!("Disk metrics unavailable: {e}");
            Vec::new()
        });

        Ok(ResourceSnapshot {
            timestamp: chrono::Utc::now(),
            memory,
            cpu,
            disks,
            processes,
        })
    }
}

impl HostInspector for SysinfoCollector {
    fn processes(&self) -> Result<Vec<ProcessInfo>, CollectionError> {
        let sys = self.refreshed()?;
        Ok(collect_processes(&sys))
    }

    fn listening_sockets(&self) -> Result<Vec<ListeningSocket>, CollectionError> {
        proc_net::read_listening_sockets(&self.proc_net_dir)
    }

    fn disks(&self) -> Result<Vec<DiskInfo>, CollectionError> {
        self.disk_collector.collect()
    }
}

fn collect_memory(sys: &System) -> MemoryInfo {
    let total = sys.total_memory();
    let used = sys.used_memory();
    let available = sys.available_memory();
    let swap_total = sys.total_swap();
    let swap_used = sys.used_swap();

    MemoryInfo {
        total_mb: total / BYTES_PER_MB,
        used_mb: used / BYTES_PER_MB,
        available_mb: available / BYTES_PER_MB,
        swap_total_mb: swap_total / BYTES_PER_MB,
        swap_used_mb: swap_used / BYTES_PER_MB,
        usage_percent: safe_percent(used, total),
        available_percent: safe_percent(available, total),
        swap_percent: safe_percent(swap_used, swap_total),
    }
}

fn collect_cpu(sys: &System) -> CpuInfo {
    let load_avg = System::load_average();
    CpuInfo {
        core_count: sys.cpus().len().max(1),
        load_avg_1m: load_avg.one,
        load_avg_5m: load_avg.five,
        load_avg_15m: load_avg.fifteen,
    }
}

fn collect_processes(sys: &System) -> Vec<ProcessInfo> {
    let users = Users::new_with_refreshed_list();

    let mut processes: Vec<ProcessInfo> = sys
        .processes()
        .values()
        // Threads share their parent's command line
        .filter(|p| p.thread_kind().is_none())
        .map(|proc_info| {
            let name = proc_info.name().to_string_lossy().to_string();
            let cmdline = proc_info
                .cmd()
                .iter()
                .map(|s| s.to_string_lossy().to_string())
                .collect::<Vec<_>>()
                .join(" ");

            let user = proc_info.user_id().map_or_else(
                || "unknown".to_string(),
                |uid| {
                    users
                        .get_user_by_id(uid)
                        .map_or_else(|| uid.to_string(), |u| u.name().to_string())
                },
            );

            ProcessInfo {
                pid: proc_info.pid().as_u32(),
                cmdline: if cmdline.is_empty() {
                    format!("[{name}]")
                } else {
                    cmdline
                },
                name,
                user,
            }
        })
        .collect();

    processes.sort_by_key(|p| p.pid);
    processes
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn safe_percent_handles_zero_denominator() {
        assert!(safe_percent(5, 0).abs() < f64::EPSILON);
        assert!((safe_percent(1, 4) - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn collect_returns_valid_snapshot() {
        let collector = SysinfoCollector::new();
        let snapshot = collector.collect().expect("collect should succeed");

        assert!(snapshot.memory.total_mb > 0, "total RAM should be > 0");
        assert!((0.0..=100.0).contains(&snapshot.memory.usage_percent));
        assert!((0.0..=100.0).contains(&snapshot.memory.available_percent));
        assert!(snapshot.cpu.core_count > 0, "should have at least 1 core");
    }

    #[test]
    fn processes_include_self() {
        let collector = SysinfoCollector::new();
        let processes = collector.processes().expect("processes");

        let my_pid = std::process::id();
        let me = processes
            .iter()
            .find(|p| p.pid == my_pid)
            .expect("should find own process");
        assert!(!me.name.is_empty(), "process name should not be empty");
        assert!(!me.cmdline.is_empty());
    }

    #[test]
    fn sockets_read_from_custom_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(
            dir.path().join("tcp"),
            "  sl  local_address rem_address   st\n   0: 00000000:115C 00000000:0000 0A 00000000:00000000\n",
        )
        .expect("write");

        let collector = SysinfoCollector {
            proc_net_dir: dir.path().to_path_buf(),
            ..SysinfoCollector::new()
        };
        let sockets = collector.listening_sockets().expect("sockets");
        assert_eq!(sockets.len(), 1);
        assert_eq!(sockets[0].port, 4444);
    }
}
