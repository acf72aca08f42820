//! User notifications.

use mockall::automock;
use petgo::notifications::{Level, Notification};
use tracing::{error, info, warn};

/// Shows transient notifications to the user.
#[automock]
pub trait Notifier: Send + Sync {
    /// Show a notification.
    fn notify(&self, notification: &Notification);
}

/// Writes notifications as tracing events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: &Notification) {
        let level = notification.level.as_str();
        let message = notification.message.as_str();

        match notification.level {
            Level::Info | Level::Success => info!(level, "{message}"),
            Level::Warning => warn!(level, "{message}"),
            Level::Error => error!(level, "{message}"),
        }
    }
}
