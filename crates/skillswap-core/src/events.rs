//! In-process event bus.
//!
//! Replaces the browser-era same-tab custom events and cross-tab
//! storage events with a single broadcast channel. Publishing never
//! blocks and never fails; events sent while nobody is subscribed are
//! dropped, which matches fire-and-forget notification semantics.

use tokio::sync::broadcast;

use crate::types::id::UserId;

/// Events published between components in the same process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusEvent {
    /// A notification for this user was persisted somewhere (any channel).
    NotificationStored {
        /// The recipient.
        user_id: UserId,
    },
    /// A chat message arrived for this user.
    MessageReceived {
        /// The recipient.
        user_id: UserId,
    },
    /// The local durable queue wrote a record for this user.
    ///
    /// The remote push channel cannot observe local writes, so the
    /// queue announces them here for same-process observers.
    LocalQueueWrite {
        /// The recipient.
        user_id: UserId,
    },
}

impl BusEvent {
    /// The user this event concerns.
    pub fn user_id(&self) -> &UserId {
        match self {
            Self::NotificationStored { user_id }
            | Self::MessageReceived { user_id }
            | Self::LocalQueueWrite { user_id } => user_id,
        }
    }
}

/// Cloneable handle to the process-wide event bus.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<BusEvent>,
}

impl EventBus {
    /// Create a new bus with the given buffer size.
    pub fn new(buffer_size: usize) -> Self {
        let (sender, _) = broadcast::channel(buffer_size);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    pub fn publish(&self, event: BusEvent) {
        // A send error only means there are no subscribers right now.
        let _ = self.sender.send(event);
    }

    /// Subscribe to all bus events.
    pub fn subscribe(&self) -> broadcast::Receiver<BusEvent> {
        self.sender.subscribe()
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_publish_subscribe() {
        let bus = EventBus::new(8);
        let mut rx = bus.subscribe();
        bus.publish(BusEvent::MessageReceived {
            user_id: UserId::new("u1"),
        });
        let event = rx.recv().await.unwrap();
        assert_eq!(event.user_id(), &UserId::new("u1"));
    }

    #[test]
    fn test_publish_without_subscribers_is_silent() {
        let bus = EventBus::new(8);
        bus.publish(BusEvent::LocalQueueWrite {
            user_id: UserId::new("u2"),
        });
        assert_eq!(bus.subscriber_count(), 0);
    }
}
