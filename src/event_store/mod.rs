//! Event Store Module
//!
//! - `EventStore`: in-memory, append-only log of ingested SMS events
//! - `EventLog`: durable JSONL file, one event per line
//!
//! ```text
//! POST /sms ──► EventStore::ingest ──► EventLog::persist ──► Broadcaster::publish
//!                 (append + latest)     (best-effort)         (every mailbox)
//! ```

mod log;
mod store;

pub use log::EventLog;
pub use store::EventStore;
