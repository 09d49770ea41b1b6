//! In-memory user store.
//!
//! Users are kept in insertion order and own their todos outright, so every
//! todo lookup goes through its owner. Nothing here is persisted.

use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{ServerError, ServerResult};
use crate::model::User;

/// Store shared between request handlers. Handlers hold the guard for the
/// whole of their check-then-mutate sequence.
pub type Db = Arc<RwLock<UserStore>>;

#[derive(Debug, Default)]
pub struct UserStore {
    users: Vec<User>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared(self) -> Db {
        Arc::new(RwLock::new(self))
    }

    /// Registers a new user. Usernames are compared by exact, case-sensitive
    /// equality.
    pub fn create_user(&mut self, name: &str, username: &str) -> ServerResult<&User> {
        if self.find_by_username(username).is_some() {
            return Err(ServerError::DuplicateUsername);
        }
        self.users.push(User::new(name, username));
        Ok(&self.users[self.users.len() - 1])
    }

    pub fn find_by_username(&self, username: &str) -> Option<&User> {
        self.users.iter().find(|user| user.username == username)
    }

    pub fn find_by_username_mut(&mut self, username: &str) -> Option<&mut User> {
        self.users.iter_mut().find(|user| user.username == username)
    }

    pub fn find_by_id(&self, id: Uuid) -> Option<&User> {
        self.users.iter().find(|user| user.id == id)
    }

    pub fn find_by_id_mut(&mut self, id: Uuid) -> Option<&mut User> {
        self.users.iter_mut().find(|user| user.id == id)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_user_assigns_identity() {
        let mut store = UserStore::new();
        let user = store.create_user("Ana", "ana").unwrap().clone();

        assert_eq!(store.len(), 1);
        assert_eq!(store.find_by_id(user.id), Some(&user));
        assert_eq!(store.find_by_username("ana"), Some(&user));
    }

    #[test]
    fn duplicate_username_is_rejected() {
        let mut store = UserStore::new();
        store.create_user("Ana", "ana").unwrap();
        store.create_user("Bob", "bob").unwrap();

        let err = store.create_user("Another Ana", "ana").unwrap_err();
        assert!(matches!(err, ServerError::DuplicateUsername));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn username_match_is_case_sensitive() {
        let mut store = UserStore::new();
        store.create_user("Ana", "ana").unwrap();

        assert!(store.create_user("ANA", "ANA").is_ok());
        assert!(store.find_by_username("Ana").is_none());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn lookups_miss_on_unknown_keys() {
        let store = UserStore::new();
        assert!(store.is_empty());
        assert!(store.find_by_username("ghost").is_none());
        assert!(store.find_by_id(Uuid::new_v4()).is_none());
    }

    #[test]
    fn mutable_lookup_edits_in_place() {
        let mut store = UserStore::new();
        let id = store.create_user("Ana", "ana").unwrap().id;

        store.find_by_id_mut(id).unwrap().upgrade_to_pro().unwrap();
        assert!(store.find_by_username("ana").unwrap().pro);

        store.find_by_username_mut("ana").unwrap().name = "Ana Maria".to_string();
        assert_eq!(store.find_by_id(id).unwrap().name, "Ana Maria");
    }
}
