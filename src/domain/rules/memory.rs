use crate::domain::entities::check::CheckResult;
use crate::domain::entities::snapshot::ResourceSnapshot;
use crate::domain::value_objects::thresholds::ThresholdSet;

use super::ResourceRule;

pub struct MemoryUsageRule;

impl ResourceRule for MemoryUsageRule {
    fn name(&self) -> &'static str {
        "memory_usage"
    }

    fn evaluate(&self, snapshot: &ResourceSnapshot, thresholds: &ThresholdSet) -> Vec<CheckResult> {
        let mem = &snapshot.memory;
        let usage = mem.usage_percent.round();

        vec![CheckResult {
            metric: "memory_usage".to_string(),
            value: usage,
            unit: "%".to_string(),
            status: thresholds.memory.evaluate(usage),
            message: format!(
                "Memory usage is {usage:.0}% ({}/{} MB)",
                mem.used_mb, mem.total_mb
            ),
        }]
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use crate::domain::entities::snapshot::{CpuInfo, MemoryInfo};
    use crate::domain::value_objects::check_status::CheckStatus;
    use chrono::Utc;

    fn make_snapshot(usage_percent: f64) -> ResourceSnapshot {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let used_mb = (usage_percent * 100.0) as u64;
        ResourceSnapshot {
            timestamp: Utc::now(),
            memory: MemoryInfo {
                total_mb: 10000,
                used_mb,
                available_mb: 1000,
                swap_total_mb: 0,
                swap_used_mb: 0,
                usage_percent,
                available_percent: 100.0 - usage_percent,
                swap_percent: 0.0,
            },
            cpu: CpuInfo {
                core_count: 1,
                load_avg_1m: 0.1,
                load_avg_5m: 0.1,
                load_avg_15m: 0.1,
            },
            disks: vec![],
            processes: vec![],
        }
    }

    #[test]
    fn rule_name() {
        assert_eq!(MemoryUsageRule.name(), "memory_usage");
    }

    #[test]
    fn healthy_memory_is_ok() {
        let checks = MemoryUsageRule.evaluate(&make_snapshot(50.0), &ThresholdSet::default());
        assert_eq!(checks.len(), 1);
        assert_eq!(checks[0].status, CheckStatus::Ok);
        assert_eq!(checks[0].message, "Memory usage is 50% (5000/10000 MB)");
    }

    #[test]
    fn warning_band() {
        let checks = MemoryUsageRule.evaluate(&make_snapshot(85.0), &ThresholdSet::default());
        assert_eq!(checks[0].status, CheckStatus::Warning);
    }

    #[test]
    fn critical_band() {
        let checks = MemoryUsageRule.evaluate(&make_snapshot(97.0), &ThresholdSet::default());
        assert_eq!(checks[0].status, CheckStatus::Critical);
    }
}
