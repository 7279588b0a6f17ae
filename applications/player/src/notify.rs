//! Desktop notifications
//!
//! Fire-and-forget: a notification that fails to show is logged and
//! never interrupts playback.

use notify_rust::{Notification, Timeout};
use tracing::warn;

const NOTIFICATION_TIMEOUT_MS: u32 = 4000;

/// Sends "now playing" notifications to the desktop shell
#[derive(Debug, Clone)]
pub struct Notifier {
    enabled: bool,
}

impl Notifier {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Show a notification without waiting for the shell to ack it
    pub fn send(&self, title: String, body: String) {
        if !self.enabled {
            return;
        }

        // show() blocks on the D-Bus round trip, so keep it off the UI loop.
        tokio::task::spawn_blocking(move || {
            let result = Notification::new()
                .summary(&title)
                .body(&body)
                .timeout(Timeout::Milliseconds(NOTIFICATION_TIMEOUT_MS))
                .show();
            if let Err(e) = result {
                warn!("Failed to show notification: {e}");
            }
        });
    }
}
