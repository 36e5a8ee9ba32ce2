pub mod alert_fmt;
pub mod check_fmt;
