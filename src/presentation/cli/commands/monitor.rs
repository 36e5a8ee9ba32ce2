use colored::Colorize;

use crate::application::services::monitor::{
    MonitorCycleResult, MonitorService, MONITOR_SENT_MESSAGE, MONITOR_UNSENT_MESSAGE,
};
use crate::presentation::cli::formatters::check_fmt::format_checks;

/// Runs one monitoring cycle and prints every check.
///
/// Returns `true` when any check raised an alert.
///
/// # Errors
///
/// Returns an error if metrics collection or JSON serialization fails.
pub fn run_monitor(service: &MonitorService<'_>, json: bool) -> anyhow::Result<bool> {
    let result = service.run_once()?;

    if json {
        let body = serde_json::json!({
            "checks": result.checks,
            "alerts": result.alerts,
            "notified": result.notified,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(result.has_alerts());
    }

    format_checks(&result.checks);
    println!();
    let summary = cycle_summary(&result);
    if !result.has_alerts() {
        println!("{}", summary.green().bold());
    } else if result.notified {
        println!("{}", summary.yellow().bold());
    } else {
        println!("{}", summary.red().bold());
    }

    Ok(result.has_alerts())
}

/// Closing line printed after the checks.
fn cycle_summary(result: &MonitorCycleResult) -> &'static str {
    if !result.has_alerts() {
        "✅ All server checks passed"
    } else if result.notified {
        MONITOR_SENT_MESSAGE
    } else {
        MONITOR_UNSENT_MESSAGE
    }
}
