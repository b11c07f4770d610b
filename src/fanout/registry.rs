//! Subscriber registry
//!
//! The set of live subscribers used for fan-out. Register, unregister,
//! snapshot and close all take the same lock.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use super::subscriber::{Subscriber, SubscriberId};
use crate::types::SubscribeError;

#[derive(Debug, Default)]
struct RegistryState {
    subscribers: HashMap<SubscriberId, Arc<Subscriber>>,
    /// Set once by shutdown; no registration succeeds afterwards
    closed: bool,
}

/// Thread-safe set of active subscribers
#[derive(Debug, Default)]
pub struct SubscriberRegistry {
    state: Mutex<RegistryState>,
    next_id: AtomicU64,
}

impl SubscriberRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh subscriber identity
    pub fn next_id(&self) -> SubscriberId {
        SubscriberId(self.next_id.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Add a subscriber, returning the new registry size
    pub fn register(&self, subscriber: Arc<Subscriber>) -> Result<usize, SubscribeError> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(SubscribeError::ShuttingDown);
        }
        state.subscribers.insert(subscriber.id(), subscriber);
        Ok(state.subscribers.len())
    }

    /// Remove a subscriber and mark it gone in the same critical section.
    ///
    /// Returns `false` when it was already absent.
    pub fn unregister(&self, subscriber: &Subscriber) -> bool {
        let removed = {
            let mut state = self.state.lock();
            subscriber.mark_gone();
            state.subscribers.remove(&subscriber.id()).is_some()
        };
        subscriber.mailbox().wake();
        removed
    }

    /// Current subscribers; safe to iterate without holding the lock
    pub fn snapshot(&self) -> Vec<Arc<Subscriber>> {
        self.state.lock().subscribers.values().cloned().collect()
    }

    pub fn size(&self) -> usize {
        self.state.lock().subscribers.len()
    }

    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    /// Refuse new registrations and tell every subscriber to disconnect.
    ///
    /// Returns how many subscribers were signalled.
    pub fn close(&self) -> usize {
        let mut state = self.state.lock();
        state.closed = true;
        for subscriber in state.subscribers.values() {
            subscriber.begin_disconnect();
        }
        state.subscribers.len()
    }
}
