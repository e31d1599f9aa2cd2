//! Error types for Squirrels
//!
//! Provides a unified error type for all operations.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Result type alias using SquirrelError
pub type Result<T> = std::result::Result<T, SquirrelError>;

/// Unified error type for Squirrels operations
#[derive(Debug, Error)]
pub enum SquirrelError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Storage Errors
    // -------------------------------------------------------------------------
    #[error("Corrupt store: {0}")]
    CorruptStore(String),

    // -------------------------------------------------------------------------
    // Domain Errors
    // -------------------------------------------------------------------------
    #[error("Not found")]
    NotFound,

    #[error("Validation error: {0}")]
    Validation(String),

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(String),

    // -------------------------------------------------------------------------
    // Request Errors
    // -------------------------------------------------------------------------
    #[error("Protocol error: {0}")]
    Protocol(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SquirrelError {
    /// Status code a request failing with this error is answered with
    pub fn status_code(&self) -> StatusCode {
        match self {
            SquirrelError::NotFound => StatusCode::NOT_FOUND,
            SquirrelError::Validation(_) | SquirrelError::Protocol(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Error responses carry no body; storage failures are never reported as 4xx
impl IntoResponse for SquirrelError {
    fn into_response(self) -> Response {
        match &self {
            SquirrelError::NotFound => {}
            SquirrelError::Validation(msg) => tracing::debug!("Rejected request: {}", msg),
            SquirrelError::Protocol(msg) => tracing::warn!("Malformed request: {}", msg),
            e => tracing::error!("Request failed: {}", e),
        }

        self.status_code().into_response()
    }
}
