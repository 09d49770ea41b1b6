//! Stateless HTTP request builder and response parser for the todo API.
//!
//! `TodoClient` holds only a `base_url`. Each endpoint is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method
//! that consumes an `HttpResponse`.

use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateUser, Todo, TodoInput, User};

/// Header the server reads the caller's username from.
pub const USERNAME_HEADER: &str = "username";

/// Synchronous, stateless client for the todo API.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    // --- users ---

    pub fn build_create_user(&self, input: &CreateUser) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/users", self.base_url),
            headers: vec![json_content_type()],
            body: Some(to_json(input)?),
        })
    }

    pub fn build_get_user(&self, id: Uuid) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/users/{id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_upgrade_to_pro(&self, id: Uuid) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Patch,
            path: format!("{}/users/{id}/pro", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_create_user(&self, response: HttpResponse) -> Result<User, ApiError> {
        parse_json(response, 201)
    }

    pub fn parse_get_user(&self, response: HttpResponse) -> Result<User, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_upgrade_to_pro(&self, response: HttpResponse) -> Result<User, ApiError> {
        parse_json(response, 200)
    }

    // --- todos ---

    pub fn build_list_todos(&self, username: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/todos", self.base_url),
            headers: vec![username_header(username)],
            body: None,
        }
    }

    pub fn build_create_todo(&self, username: &str, input: &TodoInput) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/todos", self.base_url),
            headers: vec![json_content_type(), username_header(username)],
            body: Some(to_json(input)?),
        })
    }

    pub fn build_update_todo(
        &self,
        username: &str,
        id: Uuid,
        input: &TodoInput,
    ) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: format!("{}/todos/{id}", self.base_url),
            headers: vec![json_content_type(), username_header(username)],
            body: Some(to_json(input)?),
        })
    }

    pub fn build_mark_todo_done(&self, username: &str, id: Uuid) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Patch,
            path: format!("{}/todos/{id}/done", self.base_url),
            headers: vec![username_header(username)],
            body: None,
        }
    }

    pub fn build_delete_todo(&self, username: &str, id: Uuid) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: format!("{}/todos/{id}", self.base_url),
            headers: vec![username_header(username)],
            body: None,
        }
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        parse_json(response, 201)
    }

    pub fn parse_update_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_mark_todo_done(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 204)
    }
}

fn json_content_type() -> (String, String) {
    ("content-type".to_string(), "application/json".to_string())
}

fn username_header(username: &str) -> (String, String) {
    (USERNAME_HEADER.to_string(), username.to_string())
}

fn to_json<T: Serialize>(input: &T) -> Result<String, ApiError> {
    serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))
}

fn parse_json<T: DeserializeOwned>(response: HttpResponse, expected: u16) -> Result<T, ApiError> {
    check_status(&response, expected)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }

    let message = serde_json::from_str::<serde_json::Value>(&response.body)
        .ok()
        .and_then(|body| body.get("error")?.as_str().map(str::to_string));

    match (response.status, message) {
        (404, message) => Err(ApiError::NotFound(
            message.unwrap_or_else(|| response.body.clone()),
        )),
        (status, Some(message)) => Err(ApiError::Rejected { status, message }),
        (status, None) => Err(ApiError::HttpError {
            status,
            body: response.body.clone(),
        }),
    }
}
