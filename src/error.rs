//! Error types for request dispatch and caching

use thiserror::Error;

/// Errors that can occur when dispatching a request
#[derive(Debug, Error)]
pub enum FetchError {
    /// Request settings carried an empty target URL
    #[error("request url is empty")]
    MissingUrl,

    /// Cache parameters carried an empty cache key
    #[error("cache key is empty")]
    EmptyCacheKey,

    /// HTTP request failed at the transport level
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body was not valid JSON
    #[error("failed to parse response body: {0}")]
    Parse(#[from] serde_json::Error),

    /// Server responded, but the envelope's result code was not the
    /// success sentinel. Carries the code the server reported.
    #[error("server reported non-success result {0:?}")]
    NonSuccess(String),
}

impl FetchError {
    /// Whether this error was raised before any network activity
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, FetchError::MissingUrl | FetchError::EmptyCacheKey)
    }
}
