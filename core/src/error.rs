//! Error types for the todo API client.

use thiserror::Error;

/// Errors returned by `TodoClient` build and parse methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404. Carries the server's message, which tells an
    /// unknown user apart from an unknown todo.
    #[error("not found: {0}")]
    NotFound(String),

    /// The server turned the request down with a JSON `{"error": ...}` body.
    #[error("HTTP {status}: {message}")]
    Rejected { status: u16, message: String },

    /// The server returned an unexpected status without an error body.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    #[error("serialization failed: {0}")]
    SerializationError(String),
}
