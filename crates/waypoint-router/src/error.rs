//! Error types for dispatch.

use thiserror::Error;

/// Errors a handler can signal back through the dispatch pipeline.
#[derive(Debug, Error)]
pub enum RouteError {
    /// A handler aborted while processing an otherwise routable request.
    #[error("handler failed: {0}")]
    Handler(String),

    /// A handler could not decode a JSON payload it required.
    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
}

impl RouteError {
    /// Creates a handler-abort error from any displayable message.
    pub fn handler(message: impl Into<String>) -> Self {
        Self::Handler(message.into())
    }
}

/// Result type alias for handler and dispatch operations.
pub type Result<T> = std::result::Result<T, RouteError>;
