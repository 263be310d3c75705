//! HTTP client error types.

use grocer_commerce::StoreError;
use thiserror::Error;

/// Errors that can occur when talking to the storefront backend.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request could not be sent or the connection dropped.
    #[error("Request failed: {0}")]
    RequestError(String),

    /// The configured base URL is unusable.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Non-2xx response.
    #[error("HTTP {status}: {message}")]
    HttpError { status: u16, message: String },

    /// The response body was not what we expected.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// No response within the configured timeout.
    #[error("Request timed out")]
    Timeout,

    /// A request body could not be encoded.
    #[error("JSON error: {0}")]
    JsonError(String),
}

impl FetchError {
    /// HTTP status of the failed response, if there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::JsonError(e.to_string())
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else if e.is_builder() {
            FetchError::InvalidUrl(e.to_string())
        } else if e.is_decode() {
            FetchError::ParseError(e.to_string())
        } else {
            FetchError::RequestError(e.to_string())
        }
    }
}

impl From<FetchError> for StoreError {
    fn from(e: FetchError) -> Self {
        match e {
            FetchError::HttpError { status, message } => StoreError::Http { status, message },
            FetchError::ParseError(msg) | FetchError::JsonError(msg) => StoreError::Decode(msg),
            other => StoreError::Transport(other.to_string()),
        }
    }
}
