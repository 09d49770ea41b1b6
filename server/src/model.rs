//! Users, their todos, and the JSON payloads the API accepts.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ServerError, ServerResult};

/// Number of todos a user on the free plan may hold.
pub const FREE_PLAN_TODO_LIMIT: usize = 10;

/// A registered user together with the todos they own.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub username: String,
    pub pro: bool,
    pub todos: Vec<Todo>,
}

impl User {
    /// Creates a free-plan user with no todos.
    pub fn new(name: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            username: username.into(),
            pro: false,
            todos: Vec::new(),
        }
    }

    /// Moves the user onto the pro plan. There is no way back.
    pub fn upgrade_to_pro(&mut self) -> ServerResult<()> {
        if self.pro {
            return Err(ServerError::AlreadyPro);
        }
        self.pro = true;
        Ok(())
    }

    /// Whether the user's plan leaves room for another todo.
    pub fn can_create_todo(&self) -> bool {
        self.pro || self.todos.len() < FREE_PLAN_TODO_LIMIT
    }

    pub fn todo_position(&self, id: Uuid) -> Option<usize> {
        self.todos.iter().position(|todo| todo.id == id)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Todo {
    pub id: Uuid,
    pub title: String,
    pub deadline: DateTime<Utc>,
    pub done: bool,
    pub created_at: DateTime<Utc>,
}

impl Todo {
    pub fn new(title: impl Into<String>, deadline: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            deadline,
            done: false,
            created_at: Utc::now(),
        }
    }

    /// Overwrites both editable fields; partial updates are not supported.
    pub fn update(&mut self, title: impl Into<String>, deadline: DateTime<Utc>) {
        self.title = title.into();
        self.deadline = deadline;
    }

    pub fn mark_done(&mut self) {
        self.done = true;
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub username: String,
}

/// Body of both the create and the update todo requests.
#[derive(Debug, Deserialize)]
pub struct TodoInput {
    pub title: String,
    pub deadline: String,
}

/// Parses a deadline given either as an RFC 3339 timestamp or as a bare
/// `YYYY-MM-DD` date, which is taken as midnight UTC.
pub fn parse_deadline(raw: &str) -> ServerResult<DateTime<Utc>> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(timestamp.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
        .ok_or(ServerError::InvalidDeadline)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn new_user_starts_on_free_plan() {
        let user = User::new("Ana", "ana");
        assert_eq!(user.name, "Ana");
        assert_eq!(user.username, "ana");
        assert!(!user.pro);
        assert!(user.todos.is_empty());
    }

    #[test]
    fn upgrade_is_one_way() {
        let mut user = User::new("Ana", "ana");
        user.upgrade_to_pro().unwrap();
        assert!(user.pro);
        assert!(matches!(user.upgrade_to_pro(), Err(ServerError::AlreadyPro)));
        assert!(user.pro);
    }

    #[test]
    fn free_plan_stops_at_limit() {
        let mut user = User::new("Ana", "ana");
        let deadline = Utc::now();
        for i in 0..FREE_PLAN_TODO_LIMIT {
            assert!(user.can_create_todo(), "todo #{i} should be allowed");
            user.todos.push(Todo::new(format!("todo {i}"), deadline));
        }
        assert!(!user.can_create_todo());

        user.upgrade_to_pro().unwrap();
        assert!(user.can_create_todo());
    }

    #[test]
    fn todo_position_finds_by_id() {
        let mut user = User::new("Ana", "ana");
        let first = Todo::new("first", Utc::now());
        let second = Todo::new("second", Utc::now());
        let second_id = second.id;
        user.todos.push(first);
        user.todos.push(second);

        assert_eq!(user.todo_position(second_id), Some(1));
        assert_eq!(user.todo_position(Uuid::nil()), None);
    }

    #[test]
    fn todo_update_and_done() {
        let mut todo = Todo::new("Buy milk", Utc::now());
        let created_at = todo.created_at;
        let deadline = Utc.with_ymd_and_hms(2030, 5, 1, 0, 0, 0).unwrap();

        todo.update("Buy oat milk", deadline);
        todo.mark_done();

        assert_eq!(todo.title, "Buy oat milk");
        assert_eq!(todo.deadline, deadline);
        assert!(todo.done);
        assert_eq!(todo.created_at, created_at);
    }

    #[test]
    fn todo_serializes_with_api_field_names() {
        let deadline = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let todo = Todo {
            id: Uuid::nil(),
            title: "Test".to_string(),
            deadline,
            done: false,
            created_at: deadline,
        };
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["id"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(json["title"], "Test");
        assert_eq!(json["deadline"], "2024-01-01T00:00:00Z");
        assert_eq!(json["done"], false);
        assert_eq!(json["created_at"], "2024-01-01T00:00:00Z");
    }

    #[test]
    fn user_serializes_with_todos() {
        let user = User::new("Ana", "ana");
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["name"], "Ana");
        assert_eq!(json["username"], "ana");
        assert_eq!(json["pro"], false);
        assert_eq!(json["todos"], serde_json::json!([]));
    }

    #[test]
    fn todo_input_requires_both_fields() {
        let result: Result<TodoInput, _> = serde_json::from_str(r#"{"title":"No deadline"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn parse_deadline_accepts_bare_date() {
        let deadline = parse_deadline("2024-01-01").unwrap();
        assert_eq!(deadline, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn parse_deadline_accepts_rfc3339() {
        let deadline = parse_deadline("2024-01-01T12:30:00-03:00").unwrap();
        assert_eq!(deadline, Utc.with_ymd_and_hms(2024, 1, 1, 15, 30, 0).unwrap());
    }

    #[test]
    fn parse_deadline_rejects_garbage() {
        assert!(matches!(parse_deadline("tomorrow"), Err(ServerError::InvalidDeadline)));
        assert!(matches!(parse_deadline("2024-13-01"), Err(ServerError::InvalidDeadline)));
    }
}
