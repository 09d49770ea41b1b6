//! Server error types.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Every way a request can be turned away. Each variant renders as a JSON
/// body of the form `{"error": "<message>"}`.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// No user matches the supplied username or id.
    #[error("User not found.")]
    UserNotFound,

    /// A todo id in the path is not a well-formed UUID.
    #[error("The provided id is not a uuid.")]
    InvalidId,

    /// The user has no todo with the given id.
    #[error("User's todo not found.")]
    TodoNotFound,

    /// Another user already holds the requested username.
    #[error("Username already exists")]
    DuplicateUsername,

    /// The user is already on the pro plan.
    #[error("Pro plan is already activated.")]
    AlreadyPro,

    /// A free-plan user already holds the maximum number of todos.
    #[error("Free plan limit reached. Please upgrade to pro.")]
    PlanLimitReached,

    /// The deadline is neither a `YYYY-MM-DD` date nor an RFC 3339 timestamp.
    #[error("The provided deadline is not a valid date.")]
    InvalidDeadline,

    /// The JSON body could not be read into the expected payload.
    #[error("{1}")]
    InvalidBody(StatusCode, String),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::UserNotFound | ServerError::TodoNotFound => StatusCode::NOT_FOUND,
            ServerError::InvalidId
            | ServerError::DuplicateUsername
            | ServerError::AlreadyPro
            | ServerError::InvalidDeadline => StatusCode::BAD_REQUEST,
            ServerError::PlanLimitReached => StatusCode::FORBIDDEN,
            ServerError::InvalidBody(status, _) => *status,
        }
    }
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        ServerError::InvalidBody(rejection.status(), rejection.body_text())
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::debug!(status = %status, error = %self, "Request rejected");

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Result type alias for server operations.
pub type ServerResult<T> = Result<T, ServerError>;
