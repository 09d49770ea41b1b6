//! DTOs for the todo API.
//!
//! These mirror the server's JSON shapes but are defined independently; the
//! end-to-end test catches any drift between the two crates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered user as returned by the user endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub username: String,
    pub pro: bool,
    pub todos: Vec<Todo>,
}

/// A single todo item returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: Uuid,
    pub title: String,
    pub deadline: DateTime<Utc>,
    pub done: bool,
    pub created_at: DateTime<Utc>,
}

/// Request payload for registering a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub username: String,
}

/// Request payload for creating or replacing a todo. The deadline is sent
/// as given, either `YYYY-MM-DD` or an RFC 3339 timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoInput {
    pub title: String,
    pub deadline: String,
}
