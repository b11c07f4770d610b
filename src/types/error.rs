//! Error types

use thiserror::Error;

/// Errors produced while ingesting a posted SMS
#[derive(Debug, Error)]
pub enum IngestError {
    /// Body is not well-formed JSON
    #[error("Invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Body parsed but lacks a required field
    #[error("Missing sender or message")]
    Validation,

    /// Anything unexpected; the detail is logged, never returned to the client
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Errors produced when opening a new event stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubscribeError {
    #[error("Server is shutting down")]
    ShuttingDown,
}

/// Errors that stop the server from starting or serving
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to install signal handler: {0}")]
    Signal(#[from] ctrlc::Error),
}

/// Result type for server startup and serving
pub type ServerResult<T> = Result<T, ServerError>;
