use crate::domain::entities::notification::Notification;
use crate::domain::ports::notifier::{NotificationError, Notifier};

/// Fans a notification out to every configured channel.
///
/// Calls each notifier in order. Returns the first error encountered (if any),
/// but always calls all notifiers; succeeds when at least one channel
/// delivered or no channel is configured.
pub struct CompositeNotifier {
    notifiers: Vec<Box<dyn Notifier>>,
}

impl CompositeNotifier {
    #[must_use]
    pub fn new(notifiers: Vec<Box<dyn Notifier>>) -> Self {
        Self { notifiers }
    }

    #[must_use]
    pub fn channels(&self) -> Vec<&'static str> {
        self.notifiers.iter().map(|n| n.channel()).collect()
    }
}

impl Default for CompositeNotifier {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Notifier for CompositeNotifier {
    fn channel(&self) -> &'static str {
        "composite"
    }

    fn notify(&self, notification: &Notification) -> Result<(), NotificationError> {
        let mut delivered = 0usize;
        let mut first_error = None;
        for notifier in &self.notifiers {
            match notifier.notify(notification) {
                Ok(()) => {
                    tracing::debug!(channel = notifier.channel(), "Notification delivered");
                    delivered += 1;
                }
                Err(e) => {
                    tracing::warn!(channel = notifier.channel(), "Notification failed: {e}");
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                }
            }
        }
        match first_error {
            Some(e) if delivered == 0 => Err(e),
            _ => Ok(()),
        }
    }
}
