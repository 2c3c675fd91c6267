//! Error types for the order interpreter.

use thiserror::Error;

/// Errors that can occur while interpreting a request.
#[derive(Debug, Error)]
pub enum InterpreterError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Inference API returned an error status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Authentication failed.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The model answered, but not with a usable intent.
    #[error("parse error: {0}")]
    Parse(String),
}
