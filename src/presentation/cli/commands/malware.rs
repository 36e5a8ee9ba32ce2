use crate::application::services::dispatcher::AlertDispatcher;
use crate::application::services::scanner::malware::MalwareScanner;
use crate::domain::entities::alert::Alert;

pub const MALWARE_SENT_MESSAGE: &str = "Potential malware detected! Alerts sent.";
pub const MALWARE_UNSENT_MESSAGE: &str =
    "Potential malware detected! No administrator could be notified.";

pub fn execute_malware_check(
    scanner: &MalwareScanner<'_>,
    dispatcher: &AlertDispatcher<'_>,
) -> Vec<Alert> {
    let alerts = scanner.scan();
    super::dispatch(
        dispatcher,
        &alerts,
        "malware-check",
        MALWARE_SENT_MESSAGE,
        MALWARE_UNSENT_MESSAGE,
    );
    alerts
}

/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn run_malware_check(
    scanner: &MalwareScanner<'_>,
    dispatcher: &AlertDispatcher<'_>,
    json: bool,
) -> anyhow::Result<bool> {
    let alerts = execute_malware_check(scanner, dispatcher);
    super::print_alerts(&alerts, json)?;
    Ok(!alerts.is_empty())
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::in_memory_store::InMemoryFingerprintStore;
    use crate::presentation::cli::commands::test_support::{sandbox_config, RecordingNotifier};

    #[test]
    fn repeated_finding_is_sent_once() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = sandbox_config(dir.path());
        let www = dir.path().join("www");
        std::fs::create_dir_all(&www).expect("mkdir");
        std::fs::write(www.join("shell.php"), "<?php eval($_POST['x']); ?>").expect("write");

        let store = InMemoryFingerprintStore::new();
        let scanner = MalwareScanner::new(&store, &config.security).expect("scanner");
        let notifier = RecordingNotifier::default();
        let dispatcher = AlertDispatcher::new(&notifier);

        let first = execute_malware_check(&scanner, &dispatcher);
        assert!(first.iter().any(|a| a.title == "Suspicious PHP Code Patterns"));
        assert_eq!(notifier.count(), 1);

        let second = execute_malware_check(&scanner, &dispatcher);
        assert!(second.is_empty());
        assert_eq!(notifier.count(), 1);
    }
}
