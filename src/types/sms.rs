//! SMS event record
//!
//! An `SmsEvent` is the JSON object posted by the sender, stamped with the
//! server receipt time. Fields other than `sender` and `message` pass through
//! untouched.

use std::sync::Arc;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use super::error::IngestError;

/// Field names with special meaning
pub const SENDER_FIELD: &str = "sender";
pub const MESSAGE_FIELD: &str = "message";
pub const RECEIVED_AT_FIELD: &str = "received_at";

static NULL: Value = Value::Null;

/// One ingested SMS, immutable once created
#[derive(Debug, Clone, PartialEq)]
pub struct SmsEvent {
    record: Map<String, Value>,
    /// Compact JSON form, shared with every subscriber mailbox
    payload: Arc<str>,
}

impl SmsEvent {
    /// Parse a raw request body into an event stamped with `received_at`.
    ///
    /// The body must be a JSON object containing both `sender` and `message`.
    /// Any `received_at` supplied by the client is replaced.
    pub fn parse(body: &[u8], received_at: String) -> Result<Self, IngestError> {
        let value: Value = serde_json::from_slice(body)?;
        let Value::Object(mut record) = value else {
            return Err(IngestError::Validation);
        };

        if !record.contains_key(SENDER_FIELD) || !record.contains_key(MESSAGE_FIELD) {
            return Err(IngestError::Validation);
        }

        record.insert(RECEIVED_AT_FIELD.to_string(), Value::String(received_at));
        Self::from_record(record)
    }

    fn from_record(record: Map<String, Value>) -> Result<Self, IngestError> {
        let payload = serde_json::to_string(&record)
            .map_err(|e| IngestError::Internal(format!("failed to serialize event: {}", e)))?;
        Ok(Self {
            record,
            payload: Arc::from(payload),
        })
    }

    pub fn sender(&self) -> &Value {
        self.record.get(SENDER_FIELD).unwrap_or(&NULL)
    }

    pub fn message(&self) -> &Value {
        self.record.get(MESSAGE_FIELD).unwrap_or(&NULL)
    }

    /// Server-side receipt timestamp (ISO 8601, UTC)
    pub fn received_at(&self) -> &str {
        self.record
            .get(RECEIVED_AT_FIELD)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// Look up any field, including pass-through extras
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.record.get(field)
    }

    /// Serialized JSON, one line, suitable for JSONL and SSE `data:` frames
    pub fn payload(&self) -> &Arc<str> {
        &self.payload
    }
}

impl Serialize for SmsEvent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.record.serialize(serializer)
    }
}
