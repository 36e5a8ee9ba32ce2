use serde::{Deserialize, Serialize};

use super::check_status::CheckStatus;

/// Available memory below this percentage counts as memory pressure.
pub const MEMORY_PRESSURE_AVAILABLE_PERCENT: f64 = 15.0;

/// Swap usage above this percentage warns even without memory pressure.
pub const SWAP_WARNING_CEILING: f64 = 60.0;

/// Swap usage at or above this percentage is critical regardless of memory.
pub const SWAP_CRITICAL_CEILING: f64 = 80.0;

/// A (warning, critical) pair for one measurement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdPair {
    pub warning: f64,
    pub critical: f64,
}

impl ThresholdPair {
    #[must_use]
    pub const fn new(warning: f64, critical: f64) -> Self {
        Self { warning, critical }
    }

    /// Maps a measurement to a status, checking critical first.
    #[must_use]
    pub fn evaluate(&self, value: f64) -> CheckStatus {
        if value >= self.critical {
            CheckStatus::Critical
        } else if value >= self.warning {
            CheckStatus::Warning
        } else {
            CheckStatus::Ok
        }
    }
}

/// Set of thresholds for resource monitoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdSet {
    /// Root filesystem usage percentage
    pub disk: ThresholdPair,
    /// Memory usage percentage
    pub memory: ThresholdPair,
    /// One-minute load average as a percentage of the core count
    pub cpu: ThresholdPair,
    /// Swap usage percentage, applied only under memory pressure
    pub swap: ThresholdPair,
}

impl Default for ThresholdSet {
    fn default() -> Self {
        Self {
            disk: ThresholdPair::new(80.0, 90.0),
            memory: ThresholdPair::new(80.0, 90.0),
            cpu: ThresholdPair::new(70.0, 90.0),
            swap: ThresholdPair::new(50.0, 75.0),
        }
    }
}
