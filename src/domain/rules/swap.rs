use crate::domain::entities::check::CheckResult;
use crate::domain::entities::snapshot::ResourceSnapshot;
use crate::domain::value_objects::check_status::CheckStatus;
use crate::domain::value_objects::thresholds::{
    ThresholdPair, ThresholdSet, MEMORY_PRESSURE_AVAILABLE_PERCENT, SWAP_CRITICAL_CEILING,
    SWAP_WARNING_CEILING,
};

use super::ResourceRule;

/// Classifies swap usage, taking available memory into account.
///
/// Swap used as a cache while plenty of RAM is free is not a problem, so the
/// configured thresholds only apply when available memory is below
/// [`MEMORY_PRESSURE_AVAILABLE_PERCENT`]. Usage above the absolute ceilings
/// is flagged regardless of memory.
#[must_use]
pub fn evaluate_swap(
    swap_percent: f64,
    available_memory_percent: f64,
    thresholds: &ThresholdPair,
) -> CheckStatus {
    let pressure = available_memory_percent < MEMORY_PRESSURE_AVAILABLE_PERCENT;

    if swap_percent >= SWAP_CRITICAL_CEILING || (pressure && swap_percent >= thresholds.critical) {
        CheckStatus::Critical
    } else if swap_percent > SWAP_WARNING_CEILING
        || (pressure && swap_percent >= thresholds.warning)
    {
        CheckStatus::Warning
    } else {
        CheckStatus::Ok
    }
}

pub struct SwapUsageRule;

impl ResourceRule for SwapUsageRule {
    fn name(&self) -> &'static str {
        "swap_usage"
    }

    fn evaluate(&self, snapshot: &ResourceSnapshot, thresholds: &ThresholdSet) -> Vec<CheckResult> {
        let mem = &snapshot.memory;
        if mem.swap_total_mb == 0 {
            return vec![];
        }
        let usage = mem.swap_percent.round();

        vec![CheckResult {
            metric: "swap_usage".to_string(),
            value: usage,
            unit: "%".to_string(),
            status: evaluate_swap(usage, mem.available_percent, &thresholds.swap),
            message: format!(
                "Swap usage is {usage:.0}% ({}/{} MB, {:.0}% memory available)",
                mem.swap_used_mb, mem.swap_total_mb, mem.available_percent
            ),
        }]
    }
}
