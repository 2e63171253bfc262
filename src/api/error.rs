//! API error types for the Backlog client.

use thiserror::Error;

/// A caller-supplied value was rejected before any request was sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {field}: {constraint}")]
pub struct ValidationError {
    /// The request parameter or argument that was rejected.
    pub field: String,
    /// The constraint it violated.
    pub constraint: String,
}

impl ValidationError {
    /// Create a validation error for `field`.
    pub fn new(field: impl Into<String>, constraint: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            constraint: constraint.into(),
        }
    }

    pub(crate) fn empty(field: &str) -> Self {
        Self::new(field, "must not be empty")
    }

    pub(crate) fn not_positive(field: &str, value: i64) -> Self {
        Self::new(field, format!("must be greater than 0, got {}", value))
    }
}

/// Errors that can occur when interacting with the Backlog API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// An argument or option failed validation; nothing was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Authentication failed - invalid API key or access token.
    #[error("Authentication failed: check your API key")]
    Unauthorized,

    /// Permission denied - user lacks access to the resource.
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Rate limited by the Backlog API.
    #[error("Rate limited: please wait before retrying")]
    RateLimited,

    /// Backlog rejected the request or failed to process it.
    #[error("Backlog server error: {0}")]
    ServerError(String),

    /// Network or HTTP error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body was not the JSON we expected.
    #[error("Invalid API response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Keyring error when storing/retrieving API keys.
    #[error("Keyring error: {0}")]
    Keyring(String),

    /// Reading a file to upload failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// Create an error from an HTTP status code.
    pub fn from_status(status: reqwest::StatusCode, context: &str) -> Self {
        match status.as_u16() {
            401 => ApiError::Unauthorized,
            403 => ApiError::Forbidden(context.to_string()),
            404 => ApiError::NotFound(context.to_string()),
            429 => ApiError::RateLimited,
            _ => ApiError::ServerError(format!("HTTP {}: {}", status, context)),
        }
    }

    /// Whether the error was raised locally by argument validation.
    pub fn is_validation(&self) -> bool {
        matches!(self, ApiError::Validation(_))
    }
}
