//! SMS ingestion and snapshot handlers

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use tracing::{error, warn};

use super::ApiError;
use crate::service::SmsService;
use crate::types::{IngestError, SmsEvent, SubscribeError};

impl IntoResponse for IngestError {
    fn into_response(self) -> Response {
        let status = match &self {
            IngestError::Parse(e) => {
                warn!("Rejected SMS with invalid JSON: {}", e);
                StatusCode::BAD_REQUEST
            }
            IngestError::Validation => {
                warn!("Rejected SMS without sender or message");
                StatusCode::BAD_REQUEST
            }
            IngestError::Internal(detail) => {
                error!("Failed to ingest SMS: {}", detail);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = match self {
            IngestError::Internal(_) => ApiError::internal(),
            other => ApiError::new(other.to_string()),
        };
        (status, Json(body)).into_response()
    }
}

impl IntoResponse for SubscribeError {
    fn into_response(self) -> Response {
        (StatusCode::SERVICE_UNAVAILABLE, Json(ApiError::new(self.to_string()))).into_response()
    }
}

/// Serialize with two-space indentation
fn pretty_json<T: Serialize>(value: &T) -> Response {
    match serde_json::to_string_pretty(value) {
        Ok(body) => ([(header::CONTENT_TYPE, "application/json")], body).into_response(),
        Err(e) => {
            error!("Failed to serialize response: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, Json(ApiError::internal())).into_response()
        }
    }
}

/// POST /sms - Ingest one SMS
pub async fn post_sms(State(service): State<Arc<SmsService>>, body: Bytes) -> Response {
    match service.ingest(&body) {
        Ok(_) => Json(json!({ "status": "ok" })).into_response(),
        Err(e) => e.into_response(),
    }
}

/// GET /sms/latest - Most recent SMS, or `{}` before the first one
pub async fn get_latest(State(service): State<Arc<SmsService>>) -> Response {
    match service.latest() {
        Some(event) => Json(event.as_ref()).into_response(),
        None => Json(json!({})).into_response(),
    }
}

/// GET /sms/all - Every SMS in arrival order
pub async fn get_all(State(service): State<Arc<SmsService>>) -> Response {
    let events = service.all();
    let records: Vec<&SmsEvent> = events.iter().map(Arc::as_ref).collect();
    pretty_json(&records)
}

/// GET /stats - Message count, connected clients and current time
pub async fn get_stats(State(service): State<Arc<SmsService>>) -> Response {
    pretty_json(&service.stats())
}
