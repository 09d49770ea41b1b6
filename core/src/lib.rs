//! Synchronous API client core for the todo service.
//!
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network. The caller executes the HTTP round-trip, so the
//! core stays deterministic and testable.

pub mod client;
pub mod error;
pub mod http;
pub mod types;

pub use client::{TodoClient, USERNAME_HEADER};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{CreateUser, Todo, TodoInput, User};
