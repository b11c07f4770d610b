//! SMS Relay Server - Binary Entry Point

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use sms_relay::{api, ServerConfig, ServerResult, SmsService};

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> ServerResult<()> {
    init_logging();

    let config = ServerConfig::from_env();
    info!("Starting {} v{}", sms_relay::NAME, sms_relay::VERSION);
    let service = Arc::new(SmsService::new(config));

    let signal_service = Arc::clone(&service);
    ctrlc::set_handler(move || {
        info!("Interrupt received. Initiating server shutdown...");
        signal_service.shutdown().initiate();
    })?;

    api::serve(service).await
}
