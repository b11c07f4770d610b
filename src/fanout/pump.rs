//! Stream pump
//!
//! One pump per `/events` connection. Each activation waits on the
//! mailbox (bounded by the keep-alive interval) and then either delivers one
//! queued payload, emits a keep-alive, or ends the stream.
//!
//! ```text
//! WAITING ──► DELIVERING  mailbox non-empty (even while closing)
//!         ──► KEEPALIVE   timed out, empty, still connected
//!         ──► CLOSING     disconnected or shutting down, and empty ──► CLOSED
//! ```
//!
//! Dropping the pump, either because the stream ended or because the
//! transport discarded it, unregisters the subscriber.

use std::sync::Arc;
use std::time::Duration;

use futures::Stream;
use tracing::{debug, info, trace};

use super::registry::SubscriberRegistry;
use super::shutdown::Shutdown;
use super::subscriber::{Subscriber, SubscriberId};

const KEEPALIVE_COMMENT: &str = "keep-alive";

/// One unit of output on an event stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// A serialized event
    Data(Arc<str>),
    /// Comment frame sent when nothing arrived within the interval
    KeepAlive,
}

impl Frame {
    /// Comment text carried by keep-alive frames
    pub fn keepalive_comment() -> &'static str {
        KEEPALIVE_COMMENT
    }
}

/// Drains one subscriber's mailbox into its transport
#[derive(Debug)]
pub struct StreamPump {
    subscriber: Arc<Subscriber>,
    registry: Arc<SubscriberRegistry>,
    shutdown: Arc<Shutdown>,
    interval: Duration,
    closed: bool,
}

impl StreamPump {
    pub fn new(
        subscriber: Arc<Subscriber>,
        registry: Arc<SubscriberRegistry>,
        shutdown: Arc<Shutdown>,
        interval: Duration,
    ) -> Self {
        Self {
            subscriber,
            registry,
            shutdown,
            interval,
            closed: false,
        }
    }

    pub fn id(&self) -> SubscriberId {
        self.subscriber.id()
    }

    pub fn subscriber(&self) -> &Arc<Subscriber> {
        &self.subscriber
    }

    fn closing(&self) -> bool {
        !self.subscriber.is_connected() || self.shutdown.is_shutting_down()
    }

    /// Run one activation. `None` means end of stream; once returned, every
    /// later call returns `None` as well.
    pub async fn next_frame(&mut self) -> Option<Frame> {
        if self.closed {
            return None;
        }

        let mailbox = self.subscriber.mailbox();
        mailbox
            .wait_until(|| !mailbox.is_empty() || self.closing(), self.interval)
            .await;

        match mailbox.pop() {
            Some(payload) => {
                debug!("SSE client {} sending message", self.id());
                Some(Frame::Data(payload))
            }
            None if self.closing() => {
                info!(
                    "SSE client {} signaling disconnect (server shutdown or client disconnected)",
                    self.id()
                );
                self.closed = true;
                None
            }
            None => {
                trace!("SSE client {} sending keep-alive", self.id());
                Some(Frame::KeepAlive)
            }
        }
    }

    /// Turn the pump into a stream of frames that ends on close
    pub fn into_stream(mut self) -> impl Stream<Item = Frame> + Send + 'static {
        async_stream::stream! {
            while let Some(frame) = self.next_frame().await {
                yield frame;
            }
        }
    }
}

impl Drop for StreamPump {
    fn drop(&mut self) {
        self.registry.unregister(&self.subscriber);
        info!(
            "SSE client {} disconnected. Total: {}",
            self.id(),
            self.registry.size()
        );
    }
}
