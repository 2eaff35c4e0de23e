//! Error types for the fallible edges of the crate.
//!
//! The parser and the view reducer are total and never produce these. They cover decoding of
//! inbound iframe messages and loading of persisted chat sessions.

use thiserror::Error;

/// Errors raised while decoding a `postMessage` payload from the preview iframe.
#[derive(Debug, Error)]
pub enum IframeMessageError {
    #[error("Malformed iframe message: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Unsupported iframe message type: {0}")]
    UnsupportedType(String),
}

/// Errors related to chat session persistence.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Invalid session document: {0}")]
    InvalidDocument(#[from] serde_json::Error),

    #[error("No response is currently streaming")]
    NotStreaming,

    #[error("Session operation failed: {0}")]
    OperationFailed(#[from] anyhow::Error),
}
