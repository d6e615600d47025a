//! Broadcast badge notifier.
//!
//! Announcements fan out over a `tokio::sync::broadcast` channel. The
//! notifier is a producer only; interested parties hold a receiver from
//! [`BroadcastBadgeNotifier::subscribe`]. Sending with no receivers is not
//! an error, the announcement is simply dropped.

use tokio::sync::broadcast;
use tracing::debug;

use crate::domain::ports::{BadgeNotifier, BadgesEarned};

const DEFAULT_CAPACITY: usize = 16;

/// Badge announcement bus.
#[derive(Debug)]
pub struct BroadcastBadgeNotifier {
    sender: broadcast::Sender<BadgesEarned>,
}

impl BroadcastBadgeNotifier {
    /// Bus with the default buffer capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Bus buffering up to `capacity` undelivered announcements per receiver.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// A new receiver observing announcements made after this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<BadgesEarned> {
        self.sender.subscribe()
    }
}

impl Default for BroadcastBadgeNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl BadgeNotifier for BroadcastBadgeNotifier {
    fn announce(&self, event: BadgesEarned) {
        debug!(user = %event.user, badges = ?event.badges, "badges earned");
        // Err means no live receivers; nothing to deliver to.
        let _ = self.sender.send(event);
    }
}
