use thiserror::Error;

use crate::domain::entities::notification::Notification;

#[derive(Error, Debug)]
pub enum NotificationError {
    #[error("failed to send notification: {0}")]
    SendFailed(String),
    #[error("notification channel unavailable: {0}")]
    ChannelUnavailable(String),
}

pub trait Notifier: Send + Sync {
    /// Short channel name used in logs ("mail", "log", ...).
    fn channel(&self) -> &'static str;

    /// Deliver a notification to the administrators.
    ///
    /// # Errors
    ///
    /// Returns `NotificationError` if the notification fails to send
    /// or the channel is unavailable.
    fn notify(&self, notification: &Notification) -> Result<(), NotificationError>;
}
