//! Server error types

use cwbridge_core::{CoreError, UpstreamError};

pub type ServerResult<T> = Result<T, ServerError>;

/// Failures while starting or running the server.
///
/// Per-request failures are `cwbridge_api::ApiError` instead.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Core error: {0}")]
    Core(#[from] CoreError),

    #[error("Upstream client error: {0}")]
    Upstream(#[from] UpstreamError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error in {key}: {message}")]
    Config { key: String, message: String },
}
