//! Subscriber handle: identity, mailbox and liveness

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

use super::mailbox::Mailbox;

/// Opaque subscriber identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriberId(pub u64);

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "client_{}", self.0)
    }
}

/// Connection state of a subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Liveness {
    /// Eligible for new events
    Connected = 0,
    /// Told to stop; the pump may still be draining its mailbox
    Disconnecting = 1,
    /// Torn down and removed from the registry
    Gone = 2,
}

impl Liveness {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => Liveness::Connected,
            1 => Liveness::Disconnecting,
            _ => Liveness::Gone,
        }
    }
}

/// One connected stream client
#[derive(Debug)]
pub struct Subscriber {
    id: SubscriberId,
    mailbox: Mailbox,
    liveness: AtomicU8,
}

impl Subscriber {
    pub fn new(id: SubscriberId) -> Self {
        Self {
            id,
            mailbox: Mailbox::new(),
            liveness: AtomicU8::new(Liveness::Connected as u8),
        }
    }

    pub fn id(&self) -> SubscriberId {
        self.id
    }

    pub fn mailbox(&self) -> &Mailbox {
        &self.mailbox
    }

    pub fn liveness(&self) -> Liveness {
        Liveness::from_u8(self.liveness.load(Ordering::SeqCst))
    }

    pub fn is_connected(&self) -> bool {
        self.liveness() == Liveness::Connected
    }

    /// Move `Connected` to `Disconnecting` and wake the pump.
    /// A subscriber already past `Connected` is left alone.
    pub fn begin_disconnect(&self) {
        let _ = self.liveness.compare_exchange(
            Liveness::Connected as u8,
            Liveness::Disconnecting as u8,
            Ordering::SeqCst,
            Ordering::SeqCst,
        );
        self.mailbox.wake();
    }

    pub(crate) fn mark_gone(&self) {
        self.liveness.store(Liveness::Gone as u8, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_id() {
        assert_eq!(SubscriberId(7).to_string(), "client_7");
    }

    #[test]
    fn test_liveness_transitions() {
        let subscriber = Subscriber::new(SubscriberId(1));
        assert_eq!(subscriber.liveness(), Liveness::Connected);
        assert!(subscriber.is_connected());

        subscriber.begin_disconnect();
        assert_eq!(subscriber.liveness(), Liveness::Disconnecting);
        assert!(!subscriber.is_connected());

        subscriber.mark_gone();
        subscriber.begin_disconnect();
        assert_eq!(subscriber.liveness(), Liveness::Gone);
    }
}
