//! Per-subscriber mailbox
//!
//! An unbounded FIFO of serialized events paired with a wake signal. The
//! producer side never blocks; only the owning stream pump ever waits.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::Notify;
use tokio::time::{self, Instant};

/// Unbounded FIFO queue with a wake signal
#[derive(Debug, Default)]
pub struct Mailbox {
    queue: Mutex<VecDeque<Arc<str>>>,
    wake: Notify,
}

impl Mailbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a payload and wake the drain side. Never blocks.
    pub fn push(&self, payload: Arc<str>) {
        self.queue.lock().push_back(payload);
        self.wake.notify_one();
    }

    /// Dequeue the oldest payload
    pub fn pop(&self) -> Option<Arc<str>> {
        self.queue.lock().pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.lock().is_empty()
    }

    /// Wake a pending [`wait_until`](Self::wait_until) without enqueuing
    pub fn wake(&self) {
        self.wake.notify_one();
    }

    /// Suspend until `ready` holds or `timeout` elapses.
    ///
    /// `ready` is re-checked after every wake. A wake delivered while nobody
    /// is waiting is kept as a permit, so the next wait returns immediately.
    /// Callers re-check their own state afterwards.
    pub async fn wait_until<F>(&self, ready: F, timeout: Duration)
    where
        F: Fn() -> bool,
    {
        let deadline = Instant::now() + timeout;
        while !ready() {
            if time::timeout_at(deadline, self.wake.notified()).await.is_err() {
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(s: &str) -> Arc<str> {
        Arc::from(s)
    }

    #[test]
    fn test_fifo_order() {
        let mailbox = Mailbox::new();
        mailbox.push(payload("1"));
        mailbox.push(payload("2"));
        mailbox.push(payload("2"));

        assert_eq!(mailbox.len(), 3);
        assert_eq!(mailbox.pop().as_deref(), Some("1"));
        assert_eq!(mailbox.pop().as_deref(), Some("2"));
        assert_eq!(mailbox.pop().as_deref(), Some("2"));
        assert!(mailbox.pop().is_none());
        assert!(mailbox.is_empty());
    }

    #[tokio::test]
    async fn test_wait_times_out_when_empty() {
        let mailbox = Mailbox::new();
        let timeout = Duration::from_millis(20);

        let started = Instant::now();
        mailbox.wait_until(|| !mailbox.is_empty(), timeout).await;
        assert!(started.elapsed() >= timeout);
        assert!(mailbox.is_empty());
    }

    #[tokio::test]
    async fn test_wait_returns_immediately_when_ready() {
        let mailbox = Mailbox::new();
        mailbox.push(payload("x"));

        let started = Instant::now();
        mailbox
            .wait_until(|| !mailbox.is_empty(), Duration::from_secs(5))
            .await;
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_push_wakes_waiter() {
        let mailbox = Arc::new(Mailbox::new());

        let producer = Arc::clone(&mailbox);
        tokio::spawn(async move {
            time::sleep(Duration::from_millis(20)).await;
            producer.push(payload("late"));
        });

        let started = Instant::now();
        mailbox
            .wait_until(|| !mailbox.is_empty(), Duration::from_secs(5))
            .await;
        assert!(started.elapsed() < Duration::from_secs(5));
        assert_eq!(mailbox.pop().as_deref(), Some("late"));
    }
}
