use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::check::CheckResult;
use crate::domain::value_objects::severity::Severity;

/// A detected issue that should reach the administrators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub timestamp: DateTime<Utc>,
    pub severity: Severity,
    /// Machine name of the check that raised the alert
    pub check: String,
    /// Human-readable alert type, e.g. "Suspicious Processes"
    pub title: String,
    pub details: String,
    /// Measured value for resource alerts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

impl Alert {
    /// Builds a security finding. Findings are always `High`.
    #[must_use]
    pub fn security(check: &str, title: &str, details: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            severity: Severity::High,
            check: check.to_string(),
            title: title.to_string(),
            details: details.into(),
            value: None,
        }
    }

    /// Converts a failed resource check into an alert; `None` for ok checks.
    #[must_use]
    pub fn from_check(check: &CheckResult) -> Option<Self> {
        let severity = check.status.severity()?;
        let title = match severity {
            Severity::Critical => "CRITICAL",
            _ => "WARNING",
        };
        Some(Self {
            timestamp: Utc::now(),
            severity,
            check: check.metric.clone(),
            title: title.to_string(),
            details: format!("{} {}", check.status.icon(), check.message),
            value: Some(check.value),
        })
    }
}
