use std::time::Duration;

use serde_json::{json, Value};
use tokio::runtime::RuntimeFlavor;

use crate::domain::entities::notification::Notification;
use crate::domain::ports::notifier::{NotificationError, Notifier};
use crate::domain::value_objects::severity::Severity;

/// Webhook payload format, auto-detected from the URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WebhookFormat {
    Slack,
    Discord,
    Generic,
}

/// Posts notifications to an HTTP webhook.
///
/// Slack and Discord URLs get a chat-friendly payload; anything else gets a
/// generic JSON document carrying every alert. Delivery needs a running
/// multi-threaded tokio runtime.
pub struct WebhookNotifier {
    url: String,
    app_name: String,
    client: reqwest::Client,
}

impl WebhookNotifier {
    /// Creates a notifier with a 5-second request timeout.
    ///
    /// # Errors
    ///
    /// Returns `NotificationError::ChannelUnavailable` if the HTTP client
    /// cannot be initialized (e.g. TLS backend failure).
    pub fn new(url: String, app_name: String) -> Result<Self, NotificationError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| {
                NotificationError::ChannelUnavailable(format!("cannot build HTTP client: {e}"))
            })?;

        Ok(Self {
            url,
            app_name,
            client,
        })
    }

    fn detect_format(&self) -> WebhookFormat {
        // Match on the host only to avoid substring false positives
        let host = self
            .url
            .split("//")
            .nth(1)
            .and_then(|s| s.split('/').next())
            .and_then(|h| h.split(':').next())
            .unwrap_or("");

        if host == "hooks.slack.com" {
            WebhookFormat::Slack
        } else if host == "discord.com" || host == "discordapp.com" {
            WebhookFormat::Discord
        } else {
            WebhookFormat::Generic
        }
    }

    fn highest_severity(notification: &Notification) -> Severity {
        notification
            .alerts
            .iter()
            .map(|a| a.severity)
            .max()
            .unwrap_or(Severity::Low)
    }

    fn format_payload(&self, notification: &Notification) -> Value {
        match self.detect_format() {
            WebhookFormat::Slack => self.format_slack(notification),
            WebhookFormat::Discord => self.format_discord(notification),
            WebhookFormat::Generic => self.format_generic(notification),
        }
    }

    fn format_slack(&self, notification: &Notification) -> Value {
        let severity = Self::highest_severity(notification);
        json!({
            "text": format!(
                "{} [{}] {}\n```{}```",
                severity.emoji(),
                self.app_name,
                notification.subject(),
                notification.render_text()
            )
        })
    }

    fn format_discord(&self, notification: &Notification) -> Value {
        let severity = Self::highest_severity(notification);
        let fields: Vec<Value> = notification
            .alerts
            .iter()
            .map(|a| json!({ "name": &a.title, "value": &a.details, "inline": false }))
            .collect();

        json!({
            "username": &self.app_name,
            "embeds": [{
                "title": format!("{} {}", severity.emoji(), notification.subject()),
                "description": notification.report.clone().unwrap_or_default(),
                "fields": fields,
                "timestamp": notification.created_at.to_rfc3339()
            }]
        })
    }

    fn format_generic(&self, notification: &Notification) -> Value {
        json!({
            "source": &self.app_name,
            "subject": notification.subject(),
            "severity": Self::highest_severity(notification).to_string(),
            "timestamp": notification.created_at.to_rfc3339(),
            "alerts": &notification.alerts,
            "report": &notification.report,
            "text": notification.render_text(),
        })
    }
}

impl Notifier for WebhookNotifier {
    fn channel(&self) -> &'static str {
        "webhook"
    }

    fn notify(&self, notification: &Notification) -> Result<(), NotificationError> {
        let payload = self.format_payload(notification);
        let handle = tokio::runtime::Handle::try_current().map_err(|_| {
            NotificationError::ChannelUnavailable("webhook requires an async runtime".into())
        })?;
        if handle.runtime_flavor() == RuntimeFlavor::CurrentThread {
            return Err(NotificationError::ChannelUnavailable(
                "webhook requires a multi-threaded runtime".into(),
            ));
        }

        let response = tokio::task::block_in_place(|| {
            handle.block_on(self.client.post(&self.url).json(&payload).send())
        })
        .map_err(|e| NotificationError::SendFailed(format!("webhook error: {e}")))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(NotificationError::SendFailed(format!(
                "webhook HTTP {}",
                response.status()
            )))
        }
    }
}
