//! API error types for the count refresh client.

use thiserror::Error;

/// Error type for count requests.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP/network error from reqwest
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Resource not found (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid request parameters (400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Too many requests (429)
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Server-side error (5xx)
    #[error("Server error: {0}")]
    ServerError(String),

    /// Response body is not a base-10 integer
    #[error("Invalid count in response body: {0:?}")]
    InvalidCount(String),

    /// Invalid parameter provided
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Unexpected HTTP status code
    #[error("Unexpected status {0}: {1}")]
    UnexpectedStatus(u16, String),
}

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
