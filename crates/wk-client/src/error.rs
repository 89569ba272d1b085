//! Upstream and cache error types.

use thiserror::Error;

/// Errors that can occur when talking to the learning-progress API.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the API.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The API answered 429 Too Many Requests.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// The API answered with an error object in an otherwise successful body
    /// (unknown user, bad key).
    #[error("request rejected ({code}): {message}")]
    Rejected { code: String, message: String },

    /// Failed to parse a response.
    #[error("parse error: {0}")]
    Parse(String),
}

/// Errors from the response cache. Never fatal: the fetcher degrades to an
/// uncached call.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The backing store could not be reached.
    #[error("cache unavailable: {0}")]
    Unavailable(String),

    /// The request identity could not be canonicalized into a cache key.
    #[error("malformed request identity: {reason}")]
    MalformedKey { reason: String },
}
