use chrono::Local;

use crate::application::services::dispatcher::AlertDispatcher;
use crate::application::services::report::daily_report;
use crate::application::services::scanner::malware::MalwareScanner;
use crate::application::services::scanner::SecurityScanner;
use crate::domain::entities::alert::Alert;

pub const AUDIT_SENT_MESSAGE: &str = "Comprehensive check found issues! Alerts sent.";
pub const AUDIT_UNSENT_MESSAGE: &str =
    "Comprehensive check found issues! No administrator could be notified.";

pub struct AuditOutcome {
    pub alerts: Vec<Alert>,
    pub report: String,
}

/// Full security and malware scan summarized in a daily report.
///
/// Findings are dispatched as alerts; a clean run sends the report instead.
pub fn execute_comprehensive_check(
    scanner: &SecurityScanner<'_>,
    malware: &MalwareScanner<'_>,
    dispatcher: &AlertDispatcher<'_>,
    app_name: &str,
) -> AuditOutcome {
    let mut alerts = scanner.run_all();
    alerts.extend(malware.scan());
    let ports = scanner.listening_ports();
    let report = daily_report(app_name, Local::now(), &alerts, &ports);

    if alerts.is_empty() {
        if dispatcher.send_report(&[], Some(&report)) {
            tracing::info!("Daily security report sent");
        }
    } else {
        dispatcher.send_alerts(&alerts, AUDIT_SENT_MESSAGE, AUDIT_UNSENT_MESSAGE);
    }
    dispatcher.log_alerts(&alerts, "comprehensive-check");

    AuditOutcome { alerts, report }
}

/// Prints the report. The audit never fails the process.
pub fn run_comprehensive_check(
    scanner: &SecurityScanner<'_>,
    malware: &MalwareScanner<'_>,
    dispatcher: &AlertDispatcher<'_>,
    app_name: &str,
) {
    let outcome = execute_comprehensive_check(scanner, malware, dispatcher, app_name);
    println!("{}", outcome.report);
}
