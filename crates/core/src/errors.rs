//! Core error types for the Paydesk console.
//!
//! Transport-specific errors (reqwest, JSON decoding) are converted to
//! [`ApiError`] by the API client crate so this module stays transport-agnostic.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the console.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Remote API call failed: {0}")]
    Api(#[from] ApiError),

    #[error("Invalid configuration value: {0}")]
    InvalidConfigValue(String),
}

/// Local input validation failures. Never reaches the network layer.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a valid number")]
    NotANumber,

    #[error("Amount must be greater than zero")]
    NonPositive,

    /// Finite and positive, but not representable as a balance amount.
    #[error("Amount is out of range")]
    OutOfRange,
}

/// Uniform failure of a remote API call.
///
/// An empty device list is data, not an error, and is never represented here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Network unreachable, timeout, connection reset.
    #[error("Network error: {message}")]
    Transport { message: String },

    /// Non-2xx response.
    #[error("HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    /// 2xx response whose body could not be decoded.
    #[error("Invalid response: {message}")]
    Decode { message: String },
}

impl ApiError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn http_status(status: u16, message: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// HTTP status code, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Human-readable message, surfaced verbatim for mutation failures.
    pub fn message(&self) -> &str {
        match self {
            Self::Transport { message }
            | Self::HttpStatus { message, .. }
            | Self::Decode { message } => message,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}
