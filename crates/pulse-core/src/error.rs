//! Error types for the Pulse client.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Pulse operations.
#[derive(Error, Debug, Clone)]
pub enum PulseError {
    /// No base URL configured; checked before any network I/O is attempted.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Network failure or malformed response body. Carries no HTTP status.
    #[error("transport error: {0}")]
    Transport(String),

    /// Non-2xx HTTP response with best-effort detail.
    #[error("request failed with status {status}: {detail}")]
    Request {
        status: u16,
        detail: String,
        /// The error body as received: a JSON value, or a string for
        /// plain-text bodies.
        body: Option<serde_json::Value>,
    },

    /// A log field fell outside its declared range. Blocks submission
    /// before any network call.
    #[error("invalid {field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// JSON encode/decode failure.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Convenience Result type for Pulse operations.
pub type Result<T> = std::result::Result<T, PulseError>;

impl From<serde_json::Error> for PulseError {
    fn from(err: serde_json::Error) -> Self {
        PulseError::Serialization(err.to_string())
    }
}

/// Normalized failure value shown to presentation.
///
/// Every failure path converges to this shape at the orchestrator boundary;
/// no transport-level error type crosses into display code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    /// Human-readable description, always present.
    pub message: String,

    /// HTTP status code, when the failure was a non-2xx response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,

    /// Opaque detail payload: the error body as JSON, or the raw text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<&PulseError> for ApiError {
    fn from(err: &PulseError) -> Self {
        match err {
            PulseError::Request {
                status,
                detail,
                body,
            } => ApiError {
                message: detail.clone(),
                status: Some(*status),
                details: body.clone(),
            },
            other => ApiError {
                message: other.to_string(),
                status: None,
                details: None,
            },
        }
    }
}

impl From<PulseError> for ApiError {
    fn from(err: PulseError) -> Self {
        ApiError::from(&err)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "[{}] {}", status, self.message),
            None => f.write_str(&self.message),
        }
    }
}
