//! SMS relay service
//!
//! `SmsService` owns every piece of shared state: the event store, the
//! durable log, the subscriber registry, the broadcaster and the shutdown
//! coordinator. HTTP handlers are thin wrappers over its operations.

use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info};

use crate::config::ServerConfig;
use crate::event_store::{EventLog, EventStore};
use crate::fanout::{Broadcaster, Shutdown, StreamPump, Subscriber, SubscriberRegistry};
use crate::types::{IngestError, SmsEvent, SubscribeError};
use crate::utils::current_utc_time;

/// Response body for `GET /stats`
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Stats {
    pub total_sms: usize,
    pub connected_sse_clients: usize,
    /// Current UTC time, not elapsed time
    pub uptime: String,
}

/// Top-level service shared by all handlers
#[derive(Debug)]
pub struct SmsService {
    config: ServerConfig,
    store: EventStore,
    log: EventLog,
    registry: Arc<SubscriberRegistry>,
    broadcaster: Broadcaster,
    shutdown: Arc<Shutdown>,
}

impl SmsService {
    /// Create a service with empty state
    pub fn new(config: ServerConfig) -> Self {
        let registry = Arc::new(SubscriberRegistry::new());
        Self {
            log: EventLog::new(&config.log_path),
            store: EventStore::new(),
            broadcaster: Broadcaster::new(Arc::clone(&registry)),
            shutdown: Arc::new(Shutdown::new(Arc::clone(&registry))),
            registry,
            config,
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Ingest a posted body: store, fan out, then persist.
    ///
    /// Each step runs exactly once per accepted event and never for a
    /// rejected one.
    pub fn ingest(&self, body: &[u8]) -> Result<Arc<SmsEvent>, IngestError> {
        // Publish under the store lock so every mailbox sees arrival order
        let (event, delivered) = self
            .store
            .ingest_then(body, |event| self.broadcaster.publish(event.payload()))?;
        self.log.persist(&event);
        info!(
            "Received SMS from {}, delivered to {} SSE client(s)",
            event.sender(),
            delivered
        );
        Ok(event)
    }

    /// Register a new stream subscriber
    pub fn subscribe(&self) -> Result<StreamPump, SubscribeError> {
        if self.shutdown.is_shutting_down() {
            return Err(SubscribeError::ShuttingDown);
        }

        let subscriber = Arc::new(Subscriber::new(self.registry.next_id()));
        match self.registry.register(Arc::clone(&subscriber)) {
            Ok(total) => info!("New SSE client connected: {}, total: {}", subscriber.id(), total),
            Err(e) => {
                error!("Rejected SSE client {}: {}", subscriber.id(), e);
                return Err(e);
            }
        }

        Ok(StreamPump::new(
            subscriber,
            Arc::clone(&self.registry),
            Arc::clone(&self.shutdown),
            self.config.keepalive_interval,
        ))
    }

    pub fn latest(&self) -> Option<Arc<SmsEvent>> {
        self.store.latest()
    }

    pub fn all(&self) -> Vec<Arc<SmsEvent>> {
        self.store.all()
    }

    /// Counts are read store first, registry second
    pub fn stats(&self) -> Stats {
        let total_sms = self.store.count();
        let connected_sse_clients = self.registry.size();
        Stats {
            total_sms,
            connected_sse_clients,
            uptime: current_utc_time(),
        }
    }

    pub fn shutdown(&self) -> &Arc<Shutdown> {
        &self.shutdown
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }
}
