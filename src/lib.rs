//! SMS Relay Server
//!
//! Receives SMS events over HTTP and republishes each one in real time to
//! every connected Server-Sent Events client, while keeping an in-memory and
//! on-disk log for later retrieval.
//!
//! # Modules
//!
//! - `types`: The SMS event record and error types
//! - `event_store`: In-memory event log and durable JSONL file
//! - `fanout`: Mailboxes, subscriber registry, broadcaster, stream pumps, shutdown
//! - `service`: `SmsService`, the top-level object owning all shared state
//! - `api`: Axum router and HTTP handlers
//! - `config`: Environment-driven server configuration
//! - `utils`: Timestamp helpers
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use sms_relay::{api, ServerConfig, SmsService};
//!
//! #[tokio::main]
//! async fn main() {
//!     let service = Arc::new(SmsService::new(ServerConfig::from_env()));
//!     api::serve(service).await.unwrap();
//! }
//! ```

pub mod api;
pub mod config;
pub mod event_store;
pub mod fanout;
pub mod service;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::ServerConfig;
pub use event_store::{EventLog, EventStore};
pub use fanout::{Broadcaster, Frame, Shutdown, StreamPump, SubscriberRegistry};
pub use service::{SmsService, Stats};
pub use types::{IngestError, ServerError, ServerResult, SmsEvent, SubscribeError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
