//! Broadcast seam for schedule publication.
//!
//! The scheduler announces a published schedule strictly after the commit
//! is durable. Delivery is fire-and-forget: a notifier never reports
//! failure to the scheduler, and the persisted schedule is never rolled
//! back because observers missed a message.

use async_trait::async_trait;
use barcamp_events::{Broadcast, ScheduleSnapshot};
use tokio::sync::broadcast;
use tracing::debug;

/// Receiver of post-commit schedule announcements.
#[async_trait]
pub trait ScheduleNotifier: Send + Sync {
    /// Announce a committed schedule. Must not fail from the caller's
    /// perspective; implementations swallow their own delivery errors.
    async fn notify(&self, message: Broadcast<ScheduleSnapshot>);
}

/// In-process notifier backed by a tokio broadcast channel.
///
/// The transport layer (websocket fan-out, owned by the backend) holds the
/// receiving end; this side never learns whether anyone is listening.
#[derive(Clone)]
pub struct ChannelNotifier {
    tx: broadcast::Sender<Broadcast<ScheduleSnapshot>>,
}

impl ChannelNotifier {
    /// Create a notifier with the given channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Subscribe to schedule announcements.
    pub fn subscribe(&self) -> broadcast::Receiver<Broadcast<ScheduleSnapshot>> {
        self.tx.subscribe()
    }
}

#[async_trait]
impl ScheduleNotifier for ChannelNotifier {
    async fn notify(&self, message: Broadcast<ScheduleSnapshot>) {
        // send only errors when no receiver is subscribed, which is fine
        let receivers = self.tx.send(message).unwrap_or(0);
        debug!(receivers, "Schedule broadcast emitted");
    }
}
