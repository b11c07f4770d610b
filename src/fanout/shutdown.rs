//! Shutdown coordinator
//!
//! A write-once process flag plus a sweep that wakes every mailbox, so each
//! stream pump notices shutdown within one wait cycle. The whole operation is
//! synchronous and can run from a signal handler thread.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tracing::info;

use super::registry::SubscriberRegistry;

/// Process-wide shutdown signal
#[derive(Debug)]
pub struct Shutdown {
    flag: AtomicBool,
    registry: Arc<SubscriberRegistry>,
    stop_tx: watch::Sender<bool>,
}

impl Shutdown {
    pub fn new(registry: Arc<SubscriberRegistry>) -> Self {
        let (stop_tx, _) = watch::channel(false);
        Self {
            flag: AtomicBool::new(false),
            registry,
            stop_tx,
        }
    }

    /// Start shutdown: set the flag, signal every subscriber, then release
    /// the listener. Returns `false` if shutdown had already begun.
    pub fn initiate(&self) -> bool {
        if self.flag.swap(true, Ordering::SeqCst) {
            return false;
        }

        let signalled = self.registry.close();
        info!("Shutdown initiated, signalled {} SSE client(s)", signalled);

        self.stop_tx.send_replace(true);
        true
    }

    pub fn is_shutting_down(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Resolve once [`initiate`](Self::initiate) has been called
    pub async fn wait(&self) {
        let mut rx = self.stop_tx.subscribe();
        let _ = rx.wait_for(|stopped| *stopped).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fanout::subscriber::{Liveness, Subscriber};
    use std::time::Duration;

    #[test]
    fn test_initiate_once() {
        let registry = Arc::new(SubscriberRegistry::new());
        let shutdown = Shutdown::new(Arc::clone(&registry));

        assert!(!shutdown.is_shutting_down());
        assert!(shutdown.initiate());
        assert!(shutdown.is_shutting_down());
        assert!(!shutdown.initiate());
        assert!(registry.is_closed());
    }

    #[test]
    fn test_initiate_signals_subscribers() {
        let registry = Arc::new(SubscriberRegistry::new());
        let shutdown = Shutdown::new(Arc::clone(&registry));

        let subscriber = Arc::new(Subscriber::new(registry.next_id()));
        registry.register(Arc::clone(&subscriber)).unwrap();

        shutdown.initiate();
        assert_eq!(subscriber.liveness(), Liveness::Disconnecting);
    }

    #[tokio::test]
    async fn test_wait_resolves_after_initiate() {
        let registry = Arc::new(SubscriberRegistry::new());
        let shutdown = Arc::new(Shutdown::new(registry));

        let waiter = {
            let shutdown = Arc::clone(&shutdown);
            tokio::spawn(async move { shutdown.wait().await })
        };

        tokio::time::sleep(Duration::from_millis(10)).await;
        shutdown.initiate();

        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("wait did not resolve")
            .unwrap();
    }

    #[tokio::test]
    async fn test_wait_after_initiate_returns_immediately() {
        let shutdown = Shutdown::new(Arc::new(SubscriberRegistry::new()));
        shutdown.initiate();

        tokio::time::timeout(Duration::from_secs(1), shutdown.wait())
            .await
            .expect("wait did not resolve");
    }
}
