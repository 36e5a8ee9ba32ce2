use serde::{Deserialize, Serialize};

use crate::domain::value_objects::check_status::CheckStatus;

/// Result of evaluating one resource measurement against its thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    pub metric: String,
    pub value: f64,
    pub unit: String,
    pub status: CheckStatus,
    pub message: String,
}

impl CheckResult {
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self.status, CheckStatus::Ok)
    }
}
