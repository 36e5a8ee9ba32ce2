use crate::application::services::dispatcher::AlertDispatcher;
use crate::application::services::scanner::SecurityScanner;
use crate::domain::entities::alert::Alert;

pub const SECURITY_SENT_MESSAGE: &str = "Security issues found! Alerts sent.";
pub const SECURITY_UNSENT_MESSAGE: &str =
    "Security issues found! No administrator could be notified.";

/// Runs every scanner check and dispatches what it finds.
pub fn execute_security_check(
    scanner: &SecurityScanner<'_>,
    dispatcher: &AlertDispatcher<'_>,
) -> Vec<Alert> {
    let alerts = scanner.run_all();
    super::dispatch(
        dispatcher,
        &alerts,
        "security-check",
        SECURITY_SENT_MESSAGE,
        SECURITY_UNSENT_MESSAGE,
    );
    alerts
}

/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn run_security_check(
    scanner: &SecurityScanner<'_>,
    dispatcher: &AlertDispatcher<'_>,
    json: bool,
) -> anyhow::Result<bool> {
    let alerts = execute_security_check(scanner, dispatcher);
    super::print_alerts(&alerts, json)?;
    Ok(!alerts.is_empty())
}
