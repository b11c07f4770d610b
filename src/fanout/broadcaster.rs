//! Broadcast engine
//!
//! Offers each published payload to every connected subscriber. Mailboxes
//! are unbounded, so publishing never waits on a slow consumer.

use std::sync::Arc;

use tracing::trace;

use super::registry::SubscriberRegistry;

/// Fans one payload out to all registered mailboxes
#[derive(Debug, Clone)]
pub struct Broadcaster {
    registry: Arc<SubscriberRegistry>,
}

impl Broadcaster {
    pub fn new(registry: Arc<SubscriberRegistry>) -> Self {
        Self { registry }
    }

    /// Enqueue `payload` into every connected subscriber's mailbox.
    ///
    /// Returns the number of mailboxes that received it. A subscriber that
    /// disconnects right after the liveness check may get an item it never
    /// drains; it is dropped with the mailbox.
    pub fn publish(&self, payload: &Arc<str>) -> usize {
        let mut delivered = 0;
        for subscriber in self.registry.snapshot() {
            if subscriber.is_connected() {
                subscriber.mailbox().push(Arc::clone(payload));
                trace!("Queued event for {}", subscriber.id());
                delivered += 1;
            }
        }
        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fanout::subscriber::Subscriber;

    #[test]
    fn test_publish_reaches_connected_only() {
        let registry = Arc::new(SubscriberRegistry::new());
        let broadcaster = Broadcaster::new(Arc::clone(&registry));

        let live = Arc::new(Subscriber::new(registry.next_id()));
        let leaving = Arc::new(Subscriber::new(registry.next_id()));
        registry.register(Arc::clone(&live)).unwrap();
        registry.register(Arc::clone(&leaving)).unwrap();
        leaving.begin_disconnect();

        let payload: Arc<str> = Arc::from(r#"{"sender":"x"}"#);
        assert_eq!(broadcaster.publish(&payload), 1);

        assert_eq!(live.mailbox().pop(), Some(payload));
        assert!(leaving.mailbox().is_empty());
    }

    #[test]
    fn test_publish_without_subscribers() {
        let registry = Arc::new(SubscriberRegistry::new());
        let broadcaster = Broadcaster::new(registry);
        assert_eq!(broadcaster.publish(&Arc::from("{}")), 0);
    }

    #[test]
    fn test_undrained_mailbox_does_not_block() {
        let registry = Arc::new(SubscriberRegistry::new());
        let broadcaster = Broadcaster::new(Arc::clone(&registry));

        let stalled = Arc::new(Subscriber::new(registry.next_id()));
        let active = Arc::new(Subscriber::new(registry.next_id()));
        registry.register(Arc::clone(&stalled)).unwrap();
        registry.register(Arc::clone(&active)).unwrap();

        for i in 0..10_000 {
            let payload: Arc<str> = Arc::from(i.to_string());
            broadcaster.publish(&payload);
            assert_eq!(active.mailbox().pop().as_deref(), Some(i.to_string().as_str()));
        }

        assert_eq!(stalled.mailbox().len(), 10_000);
    }
}
