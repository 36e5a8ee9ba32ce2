use crate::domain::entities::alert::Alert;
use crate::domain::entities::notification::Notification;
use crate::domain::ports::notifier::Notifier;

/// Hands alert batches and reports to the notification channels.
pub struct AlertDispatcher<'a> {
    notifier: &'a dyn Notifier,
}

impl<'a> AlertDispatcher<'a> {
    #[must_use]
    pub const fn new(notifier: &'a dyn Notifier) -> Self {
        Self { notifier }
    }

    /// Sends one notification carrying every alert.
    ///
    /// Returns `false` without sending when `alerts` is empty. When delivery
    /// fails, `error_message` is logged with the alert count.
    pub fn send_alerts(&self, alerts: &[Alert], success_message: &str, error_message: &str) -> bool {
        if alerts.is_empty() {
            return false;
        }

        match self.notifier.notify(&Notification::new(alerts.to_vec(), None)) {
            Ok(()) => {
                tracing::info!(alerts_count = alerts.len(), "{success_message}");
                true
            }
            Err(e) => {
                tracing::error!(alerts_count = alerts.len(), error = %e, "{error_message}");
                false
            }
        }
    }

    /// Sends a report, optionally alongside alerts. An empty report still goes out.
    pub fn send_report(&self, alerts: &[Alert], report: Option<&str>) -> bool {
        let notification = Notification::new(alerts.to_vec(), report.map(str::to_string));
        match self.notifier.notify(&notification) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Security report not delivered: {e}");
                false
            }
        }
    }

    /// Records a completed check run in the log.
    pub fn log_alerts(&self, alerts: &[Alert], context: &str) {
        let titles: Vec<&str> = alerts.iter().map(|a| a.title.as_str()).collect();
        tracing::info!(
            context,
            alerts_count = alerts.len(),
            alerts = ?titles,
            "Security check completed: {context}"
        );
    }
}
