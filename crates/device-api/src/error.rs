//! Error types for the device API crate.

use paydesk_core::ApiError;
use thiserror::Error;

/// Result type alias for device API operations.
pub type Result<T> = std::result::Result<T, DeviceApiError>;

/// Errors that can occur while talking to the device API.
#[derive(Debug, Error)]
pub enum DeviceApiError {
    /// HTTP client error (connect, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Non-success response from the API
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Invalid request (bad base URL, unrepresentable delta, etc.)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl DeviceApiError {
    /// Create an API error from status and message
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create an invalid request error
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }
}

impl From<DeviceApiError> for ApiError {
    fn from(err: DeviceApiError) -> Self {
        match err {
            DeviceApiError::Http(e) => match e.status() {
                Some(status) => ApiError::http_status(status.as_u16(), e.to_string()),
                None if e.is_decode() => ApiError::decode(e.to_string()),
                None => ApiError::transport(e.to_string()),
            },
            DeviceApiError::Json(e) => ApiError::decode(e.to_string()),
            DeviceApiError::Api { status, message } => ApiError::http_status(status, message),
            DeviceApiError::InvalidRequest(message) => ApiError::transport(message),
        }
    }
}
