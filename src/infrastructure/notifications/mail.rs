use std::io::Write;
use std::process::{Command, Stdio};

use crate::domain::entities::notification::Notification;
use crate::domain::ports::notifier::{NotificationError, Notifier};

const MAX_STDERR_BYTES: usize = 2048;

/// Delivers notifications as plain-text mail through a local `sendmail`.
///
/// One message is addressed to every administrator; the recipients are taken
/// from the headers (`sendmail -t`).
pub struct MailNotifier {
    sendmail_path: String,
    from: String,
    recipients: Vec<String>,
}

impl MailNotifier {
    #[must_use]
    pub fn new(sendmail_path: String, from: String, recipients: Vec<String>) -> Self {
        Self {
            sendmail_path,
            from,
            recipients,
        }
    }

    /// RFC 5322 message with CRLF line endings.
    #[must_use]
    pub fn build_message(&self, notification: &Notification) -> String {
        let headers = [
            format!("From: {}", self.from),
            format!("To: {}", self.recipients.join(", ")),
            format!("Subject: {}", notification.subject()),
            format!("Date: {}", notification.created_at.to_rfc2822()),
            "MIME-Version: 1.0".to_string(),
            "Content-Type: text/plain; charset=utf-8".to_string(),
            "Content-Transfer-Encoding: 8bit".to_string(),
        ];

        let body = notification
            .render_text()
            .lines()
            // Lone dots end the message for some MTAs
            .map(|line| if line == "." { ".." } else { line })
            .collect::<Vec<_>>()
            .join("\r\n");

        format!("{}\r\n\r\n{body}\r\n", headers.join("\r\n"))
    }
}

impl Notifier for MailNotifier {
    fn channel(&self) -> &'static str {
        "mail"
    }

    fn notify(&self, notification: &Notification) -> Result<(), NotificationError> {
        if self.recipients.is_empty() {
            return Err(NotificationError::ChannelUnavailable(
                "no administrator email addresses configured".into(),
            ));
        }

        let message = self.build_message(notification);

        let mut child = Command::new(&self.sendmail_path)
            .args(["-t", "-i"])
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                NotificationError::ChannelUnavailable(format!(
                    "cannot run {}: {e}",
                    self.sendmail_path
                ))
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            if let Err(e) = stdin.write_all(message.as_bytes()) {
                drop(stdin);
                if let Err(wait_err) = child.wait() {
                    tracing::warn!("Failed to reap sendmail: {wait_err}");
                }
                return Err(NotificationError::SendFailed(format!(
                    "cannot write message to sendmail: {e}"
                )));
            }
        }

        let output = child
            .wait_with_output()
            .map_err(|e| NotificationError::SendFailed(format!("sendmail did not finish: {e}")))?;

        if output.status.success() {
            tracing::info!(recipients = self.recipients.len(), "Mail handed to sendmail");
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(
                &output.stderr[..output.stderr.len().min(MAX_STDERR_BYTES)],
            );
            Err(NotificationError::SendFailed(format!(
                "sendmail exited with {}: {}",
                output.status,
                stderr.trim()
            )))
        }
    }
}
