//! Request checks that run before a handler touches any state.
//!
//! Each check either rejects the request or hands back the entity it found.
//! Handlers chain them with `?` in a fixed order, so the first failing check
//! decides which error the client sees.

use axum::http::HeaderMap;
use uuid::Uuid;

use crate::error::{ServerError, ServerResult};
use crate::model::{Todo, User};
use crate::store::UserStore;

/// Header carrying the caller's username on todo routes.
pub const USERNAME_HEADER: &str = "username";

/// Returns the `username` header, if present and valid UTF-8.
pub fn username_header(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(USERNAME_HEADER)
        .and_then(|value| std::str::from_utf8(value.as_bytes()).ok())
}

/// Parses an id in the hyphenated `8-4-4-4-12` form only. The simple,
/// braced and URN forms `Uuid::parse_str` also takes are refused.
pub fn parse_hyphenated_id(raw_id: &str) -> Option<Uuid> {
    if raw_id.len() != 36 {
        return None;
    }
    Uuid::parse_str(raw_id).ok()
}

/// Resolves the user named in the `username` header.
pub fn checks_exists_user_account<'a>(
    store: &'a mut UserStore,
    username: Option<&str>,
) -> ServerResult<&'a mut User> {
    let Some(username) = username else {
        return Err(ServerError::UserNotFound);
    };
    store
        .find_by_username_mut(username)
        .ok_or(ServerError::UserNotFound)
}

/// Lets the request through while the user's plan has room for another todo.
pub fn checks_create_todos_user_availability(user: &User) -> ServerResult<()> {
    if user.can_create_todo() {
        Ok(())
    } else {
        tracing::debug!(user_id = %user.id, todos = user.todos.len(), "Free plan limit reached");
        Err(ServerError::PlanLimitReached)
    }
}

/// A user together with one of their todos.
#[derive(Debug)]
pub struct TodoContext<'a> {
    user: &'a mut User,
    position: usize,
}

impl<'a> TodoContext<'a> {
    pub fn user(&self) -> &User {
        &*self.user
    }

    pub fn todo(&self) -> &Todo {
        &self.user.todos[self.position]
    }

    pub fn todo_mut(&mut self) -> &mut Todo {
        &mut self.user.todos[self.position]
    }

    /// Releases the user, keeping only the id of the todo that was found.
    pub fn into_parts(self) -> (&'a mut User, Uuid) {
        let todo_id = self.user.todos[self.position].id;
        (self.user, todo_id)
    }
}

/// Resolves the caller and then the todo named by `raw_id`, checking in this
/// order: the user exists, the id is a UUID, the user owns such a todo.
pub fn checks_todo_exists<'a>(
    store: &'a mut UserStore,
    username: Option<&str>,
    raw_id: &str,
) -> ServerResult<TodoContext<'a>> {
    let user = checks_exists_user_account(store, username)?;
    let todo_id = parse_hyphenated_id(raw_id).ok_or(ServerError::InvalidId)?;
    let position = user
        .todo_position(todo_id)
        .ok_or(ServerError::TodoNotFound)?;

    Ok(TodoContext { user, position })
}

/// Resolves a user by the id in the route path. An id that is not a UUID
/// cannot match anyone.
pub fn find_user_by_id<'a>(store: &'a mut UserStore, raw_id: &str) -> ServerResult<&'a mut User> {
    let id = parse_hyphenated_id(raw_id).ok_or(ServerError::UserNotFound)?;
    store.find_by_id_mut(id).ok_or(ServerError::UserNotFound)
}
