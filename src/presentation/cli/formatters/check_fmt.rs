use colored::Colorize;

use crate::domain::entities::check::CheckResult;
use crate::domain::value_objects::check_status::CheckStatus;

fn status_label(status: CheckStatus) -> String {
    let label = format!("{:<8}", status.to_string().to_uppercase());
    match status {
        CheckStatus::Ok => format!("{}", label.green()),
        CheckStatus::Warning => format!("{}", label.yellow().bold()),
        CheckStatus::Critical => format!("{}", label.red().bold()),
    }
}

#[must_use]
pub fn render_check(check: &CheckResult) -> String {
    format!(
        "{} {} {:<20} {}",
        check.status.icon(),
        status_label(check.status),
        check.metric,
        check.message
    )
}

pub fn format_checks(checks: &[CheckResult]) {
    println!("{}", "Server checks".bold().cyan());
    println!("{}", "━".repeat(50));
    for check in checks {
        println!("{}", render_check(check));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use colored::control;

    fn make_check(status: CheckStatus) -> CheckResult {
        CheckResult {
            metric: "memory_usage".to_string(),
            value: 84.0,
            unit: "%".to_string(),
            status,
            message: "Memory usage is 84%".to_string(),
        }
    }

    #[test]
    fn render_check_shows_status_metric_and_message() {
        control::set_override(false);
        let line = render_check(&make_check(CheckStatus::Warning));
        assert!(line.contains("WARNING"));
        assert!(line.contains("memory_usage"));
        assert!(line.ends_with("Memory usage is 84%"));
    }

    #[test]
    fn status_labels_are_padded() {
        control::set_override(false);
        assert_eq!(status_label(CheckStatus::Ok), "OK      ");
        assert_eq!(status_label(CheckStatus::Critical), "CRITICAL");
    }
}
