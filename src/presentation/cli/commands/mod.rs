pub mod comprehensive;
pub mod crontabs;
pub mod daemon;
pub mod malware;
pub mod monitor;
pub mod security;

use crate::application::services::dispatcher::AlertDispatcher;
use crate::domain::entities::alert::Alert;
use crate::presentation::cli::formatters::alert_fmt::{format_alerts, print_no_alerts};

/// Sends a non-empty batch and records the run under `context`.
///
/// Returns whether the batch reached a channel.
fn dispatch(
    dispatcher: &AlertDispatcher<'_>,
    alerts: &[Alert],
    context: &str,
    success_message: &str,
    error_message: &str,
) -> bool {
    if alerts.is_empty() {
        return false;
    }
    let sent = dispatcher.send_alerts(alerts, success_message, error_message);
    dispatcher.log_alerts(alerts, context);
    sent
}

fn print_alerts(alerts: &[Alert], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(alerts)?);
    } else if alerts.is_empty() {
        print_no_alerts();
    } else {
        format_alerts(alerts);
    }
    Ok(())
}
