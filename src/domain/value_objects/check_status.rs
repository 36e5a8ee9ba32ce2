use serde::{Deserialize, Serialize};

use super::severity::Severity;

/// Outcome of a single resource check
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    #[default]
    Ok,
    Warning,
    Critical,
}

impl std::fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ok => write!(f, "ok"),
            Self::Warning => write!(f, "warning"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

impl CheckStatus {
    #[must_use]
    pub const fn icon(&self) -> &str {
        match self {
            Self::Ok => "\u{2705}",
            Self::Warning => "\u{1f7e1}",
            Self::Critical => "\u{1f534}",
        }
    }

    /// Alert severity for a non-ok status, `None` when the check passed.
    #[must_use]
    pub const fn severity(&self) -> Option<Severity> {
        match self {
            Self::Ok => None,
            Self::Warning => Some(Severity::Medium),
            Self::Critical => Some(Severity::Critical),
        }
    }
}
