use crate::domain::entities::check::CheckResult;
use crate::domain::entities::snapshot::ResourceSnapshot;
use crate::domain::value_objects::thresholds::ThresholdSet;

use super::ResourceRule;

/// Compares the one-minute load average, scaled by core count, to the cpu thresholds.
pub struct CpuLoadRule;

impl ResourceRule for CpuLoadRule {
    fn name(&self) -> &'static str {
        "cpu_load"
    }

    fn evaluate(&self, snapshot: &ResourceSnapshot, thresholds: &ThresholdSet) -> Vec<CheckResult> {
        let cpu = &snapshot.cpu;
        let load_percent = cpu.load_percent().round();

        vec![CheckResult {
            metric: "cpu_load".to_string(),
            value: load_percent,
            unit: "%".to_string(),
            status: thresholds.cpu.evaluate(load_percent),
            message: format!(
                "CPU load is {:.2} ({load_percent:.0}% of {} core(s))",
                cpu.load_avg_1m, cpu.core_count
            ),
        }]
    }
}
