// Custom error types for better error handling and debugging
//
// Using thiserror for ergonomic error definitions with:
// - Context preservation
// - Type-safe error matching
// - Automatic Display/Error trait implementations

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid provider endpoint {name}: {reason}")]
    InvalidEndpoint { name: &'static str, reason: String },

    #[error("Timeout {name} must be > 0 seconds")]
    InvalidTimeout { name: &'static str },

    #[error("Invalid caption bounds for {format} format: min {min} must be below max {max}")]
    InvalidCaptionBounds {
        format: &'static str,
        min: usize,
        max: usize,
    },
}

/// Text-generation strategy errors
///
/// Every variant is an upstream failure: logged by the chain, never
/// surfaced to the caller (the template pool is the unconditional
/// fallback).
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("request to text provider failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("text provider returned HTTP {status}")]
    Status { status: StatusCode },

    #[error("generated text rejected: {reason}")]
    Rejected { reason: String },

    #[error("text endpoint cannot carry a prompt path segment")]
    InvalidEndpoint,
}

/// Background image fetch errors
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to image provider failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("image provider returned HTTP {status}")]
    Status { status: StatusCode },

    #[error("image endpoint cannot carry a prompt path segment")]
    InvalidEndpoint,
}

/// Compositing errors on a fetched background
#[derive(Debug, Error)]
pub enum ComposeError {
    #[error("background decode failed: {0}")]
    Decode(#[from] image::ImageError),
}

/// Handler-facing error, rendered as the JSON error body
pub enum ApiError {
    /// Missing/blank required field. Terminal, no fallback applies.
    BadRequest(&'static str),
    /// Unexpected internal fault. The public message hides the detail.
    Internal {
        public: &'static str,
        source: anyhow::Error,
    },
}

impl ApiError {
    pub fn internal(public: &'static str, source: anyhow::Error) -> Self {
        Self::Internal { public, source }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Internal { public, source } => {
                tracing::error!("request handler failed: {source:?}");
                (StatusCode::INTERNAL_SERVER_ERROR, public)
            }
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

pub type GenerationResult<T> = Result<T, GenerationError>;
pub type FetchResult<T> = Result<T, FetchError>;
