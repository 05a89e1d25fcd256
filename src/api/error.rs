//! API Error Types
//!
//! Errors raised while talking to the rooms API. Transport failures,
//! non-success statuses and malformed bodies each get their own variant so
//! callers can log them apart, even though the submission flow treats them
//! all the same way.

use thiserror::Error;

/// Errors that can occur when communicating with the rooms API
#[derive(Error, Debug)]
pub enum ApiError {
    /// Server could not be reached
    #[error("Rooms API unavailable")]
    Unavailable,

    /// Request did not complete within the configured timeout
    #[error("Request timeout")]
    Timeout,

    /// Any other transport-level failure
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("API error {status}: {message}")]
    Status { status: u16, message: String },

    /// Response body did not match the expected shape
    #[error("Malformed response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Classify a reqwest transport error
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_connect() {
            ApiError::Unavailable
        } else {
            ApiError::Request(err)
        }
    }

    /// Whether the failure happened before the server produced a response
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ApiError::Unavailable | ApiError::Timeout | ApiError::Request(_)
        )
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
