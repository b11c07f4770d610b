//! HTTP server setup with Axum

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use super::handlers::{get_all, get_latest, get_stats, post_sms};
use super::sse::events_handler;
use crate::service::SmsService;
use crate::types::{ServerError, ServerResult};

/// Create the Axum router with all endpoints
pub fn create_router(service: Arc<SmsService>) -> Router {
    // Browser dashboards subscribe from other origins
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/sms", post(post_sms))
        .route("/sms/latest", get(get_latest))
        .route("/sms/all", get(get_all))
        .route("/stats", get(get_stats))
        .route("/events", get(events_handler))
        .route("/health", get(health_check))
        .layer(cors)
        .with_state(service)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Bind the configured address and serve until shutdown is initiated
pub async fn serve(service: Arc<SmsService>) -> ServerResult<()> {
    let addr = service.config().bind_addr;
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;

    info!("📡 Server with SSE running on http://{}", addr);
    info!("Logging SMS to {}", service.log().path().display());

    let shutdown = Arc::clone(service.shutdown());
    axum::serve(listener, create_router(service))
        .with_graceful_shutdown(async move { shutdown.wait().await })
        .await?;

    info!("Server gracefully stopped.");
    Ok(())
}
