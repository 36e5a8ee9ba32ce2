use std::io::Write;
use std::path::PathBuf;

use crate::domain::entities::notification::Notification;
use crate::domain::ports::notifier::{NotificationError, Notifier};

const DEFAULT_LOG_PATH: &str = "~/.local/share/hostguard/alerts.jsonl";

/// Appends one JSON line per alert (or per report) to a log file.
pub struct LogFileNotifier {
    path: PathBuf,
}

impl LogFileNotifier {
    #[must_use]
    pub fn new(path: &str) -> Self {
        let expanded = shellexpand::tilde(path);
        Self {
            path: PathBuf::from(expanded.as_ref()),
        }
    }

    fn append_json_lines(&self, values: &[serde_json::Value]) -> Result<(), NotificationError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                NotificationError::SendFailed(format!("cannot create log directory: {e}"))
            })?;
        }

        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| NotificationError::SendFailed(format!("cannot open log file: {e}")))?;

        for value in values {
            let json = serde_json::to_string(value).map_err(|e| {
                NotificationError::SendFailed(format!("JSON serialization error: {e}"))
            })?;
            writeln!(file, "{json}").map_err(|e| {
                NotificationError::SendFailed(format!("cannot write log file: {e}"))
            })?;
        }
        Ok(())
    }
}

impl Default for LogFileNotifier {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_PATH)
    }
}

impl Notifier for LogFileNotifier {
    fn channel(&self) -> &'static str {
        "log"
    }

    fn notify(&self, notification: &Notification) -> Result<(), NotificationError> {
        let mut entries: Vec<serde_json::Value> = notification
            .alerts
            .iter()
            .map(|alert| {
                serde_json::json!({
                    "timestamp": alert.timestamp.to_rfc3339(),
                    "severity": alert.severity.to_string(),
                    "check": alert.check,
                    "title": alert.title,
                    "details": alert.details,
                    "value": alert.value,
                })
            })
            .collect();

        if let Some(report) = &notification.report {
            entries.push(serde_json::json!({
                "timestamp": notification.created_at.to_rfc3339(),
                "subject": notification.subject(),
                "report": report,
            }));
        }

        self.append_json_lines(&entries)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;
    use crate::domain::entities::alert::Alert;

    fn read_lines(path: &std::path::Path) -> Vec<serde_json::Value> {
        std::fs::read_to_string(path)
            .expect("read log")
            .lines()
            .map(|l| serde_json::from_str(l).expect("valid json line"))
            .collect()
    }

    #[test]
    fn writes_one_line_per_alert() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("logs").join("alerts.jsonl");
        let notifier = LogFileNotifier::new(path.to_str().expect("utf8 path"));

        let notification = Notification::new(
            vec![
                Alert::security("ssh_keys", "SSH Keys Modified", "/home/eve/.ssh/authorized_keys"),
                Alert::security("new_users", "New Users Detected", "/home/eve"),
            ],
            None,
        );
        notifier.notify(&notification).expect("notify");

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["check"], "ssh_keys");
        assert_eq!(lines[0]["severity"], "HIGH");
        assert_eq!(lines[1]["title"], "New Users Detected");
    }

    #[test]
    fn appends_and_records_reports() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("alerts.jsonl");
        let notifier = LogFileNotifier::new(path.to_str().expect("utf8 path"));

        notifier
            .notify(&Notification::new(vec![Alert::security("a", "A", "x")], None))
            .expect("first");
        notifier
            .notify(&Notification::new(vec![], Some("all clear".to_string())))
            .expect("second");

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1]["subject"], "Security Report");
        assert_eq!(lines[1]["report"], "all clear");
    }

    #[test]
    fn tilde_is_expanded() {
        let notifier = LogFileNotifier::default();
        assert!(notifier.path.ends_with("hostguard/alerts.jsonl"));
        assert_eq!(notifier.channel(), "log");
    }
}
