//! HTTP API
//!
//! - `POST /sms` - ingest one SMS
//! - `GET /sms/latest` - most recent SMS, or `{}`
//! - `GET /sms/all` - every SMS in arrival order
//! - `GET /stats` - counts and current server time
//! - `GET /events` - Server-Sent Events stream of new SMS
//! - `GET /health` - liveness probe

pub mod handlers;
pub mod http;
pub mod sse;

use serde::Serialize;

/// Error response body
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }

    pub fn internal() -> Self {
        Self::new("Internal server error")
    }
}

pub use http::{create_router, serve};
