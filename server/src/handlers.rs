//! Route handlers for the user and todo endpoints.
//!
//! JSON bodies are taken as `Result<Json<_>, JsonRejection>` so that a bad
//! body is only reported once every check ahead of it has passed.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};

use crate::error::{ServerError, ServerResult};
use crate::model::{parse_deadline, CreateUser, Todo, TodoInput, User};
use crate::store::Db;
use crate::validators::{
    checks_create_todos_user_availability, checks_exists_user_account, checks_todo_exists,
    find_user_by_id, username_header,
};

/// `POST /users`
pub async fn create_user(
    State(db): State<Db>,
    payload: Result<Json<CreateUser>, JsonRejection>,
) -> ServerResult<(StatusCode, Json<User>)> {
    let Json(input) = payload?;

    let mut store = db.write().await;
    let user = store.create_user(&input.name, &input.username)?.clone();

    tracing::info!(user_id = %user.id, username = %user.username, "User created");
    Ok((StatusCode::CREATED, Json(user)))
}

/// `GET /users/{id}`
pub async fn get_user(State(db): State<Db>, Path(id): Path<String>) -> ServerResult<Json<User>> {
    let mut store = db.write().await;
    let user = find_user_by_id(&mut store, &id)?;
    Ok(Json(user.clone()))
}

/// `PATCH /users/{id}/pro`
pub async fn upgrade_user_to_pro(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> ServerResult<Json<User>> {
    let mut store = db.write().await;
    let user = find_user_by_id(&mut store, &id)?;
    user.upgrade_to_pro()?;

    tracing::info!(user_id = %user.id, "User upgraded to pro");
    Ok(Json(user.clone()))
}

/// `GET /todos`
pub async fn list_todos(State(db): State<Db>, headers: HeaderMap) -> ServerResult<Json<Vec<Todo>>> {
    let mut store = db.write().await;
    let user = checks_exists_user_account(&mut store, username_header(&headers))?;
    Ok(Json(user.todos.clone()))
}

/// `POST /todos`
pub async fn create_todo(
    State(db): State<Db>,
    headers: HeaderMap,
    payload: Result<Json<TodoInput>, JsonRejection>,
) -> ServerResult<(StatusCode, Json<Todo>)> {
    let mut store = db.write().await;
    let user = checks_exists_user_account(&mut store, username_header(&headers))?;
    checks_create_todos_user_availability(user)?;

    let Json(input) = payload?;
    let todo = Todo::new(input.title, parse_deadline(&input.deadline)?);
    user.todos.push(todo.clone());

    tracing::info!(user_id = %user.id, todo_id = %todo.id, "Todo created");
    Ok((StatusCode::CREATED, Json(todo)))
}

/// `PUT /todos/{id}`
pub async fn update_todo(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<String>,
    payload: Result<Json<TodoInput>, JsonRejection>,
) -> ServerResult<Json<Todo>> {
    let mut store = db.write().await;
    let mut context = checks_todo_exists(&mut store, username_header(&headers), &id)?;

    let Json(input) = payload?;
    let deadline = parse_deadline(&input.deadline)?;
    let todo = context.todo_mut();
    todo.update(input.title, deadline);

    tracing::info!(todo_id = %todo.id, "Todo updated");
    Ok(Json(todo.clone()))
}

/// `PATCH /todos/{id}/done`
pub async fn mark_todo_done(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ServerResult<Json<Todo>> {
    let mut store = db.write().await;
    let mut context = checks_todo_exists(&mut store, username_header(&headers), &id)?;

    let todo = context.todo_mut();
    todo.mark_done();

    tracing::info!(todo_id = %todo.id, "Todo marked done");
    Ok(Json(todo.clone()))
}

/// `DELETE /todos/{id}`
pub async fn delete_todo(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ServerResult<StatusCode> {
    let username = username_header(&headers);
    let mut store = db.write().await;
    checks_exists_user_account(&mut store, username)?;
    let (user, todo_id) = checks_todo_exists(&mut store, username, &id)?.into_parts();

    let Some(position) = user.todo_position(todo_id) else {
        tracing::warn!(user_id = %user.id, todo_id = %todo_id, "Resolved todo vanished before delete");
        return Err(ServerError::TodoNotFound);
    };
    user.todos.remove(position);

    tracing::info!(user_id = %user.id, todo_id = %todo_id, "Todo deleted");
    Ok(StatusCode::NO_CONTENT)
}
