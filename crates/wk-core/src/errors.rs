//! Cross-cutting error types for wkcal.
//!
//! Upstream transport errors live in `wk-client` and configuration errors in
//! `wk-config`. A unified error is deferred to `wk-cli` where all crate errors
//! converge into `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any wkcal crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The API key is empty, too long, or contains characters outside `[A-Za-z0-9_-]`.
    #[error("invalid API key: {0}")]
    InvalidApiKey(String),

    /// A stage name that is not part of the SRS ladder.
    #[error("unknown SRS stage: {0}")]
    UnknownStage(String),
}
