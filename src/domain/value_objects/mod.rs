pub mod check_status;
pub mod severity;
pub mod thresholds;

pub use check_status::CheckStatus;
pub use severity::Severity;
pub use thresholds::{ThresholdPair, ThresholdSet};
