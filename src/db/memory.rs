use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{AuthError, Result};
use crate::models::User;

use super::UserStore;

/// In-memory user store keyed by username.
#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_username(&self, username: &str) -> Result<User> {
        self.users
            .read()
            .await
            .get(username)
            .cloned()
            .ok_or(AuthError::UserNotFound)
    }

    async fn insert(&self, user: User) -> Result<User> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.username) {
            return Err(AuthError::UsernameTaken);
        }
        users.insert(user.username.clone(), user.clone());
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(username: &str) -> User {
        User::new(username.to_string(), "hash".to_string())
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let store = InMemoryUserStore::new();
        let inserted = store.insert(user("alice")).await.unwrap();

        let found = store.find_by_username("alice").await.unwrap();
        assert_eq!(found.id, inserted.id);
        assert_eq!(found.username, "alice");
    }

    #[tokio::test]
    async fn test_missing_user_is_not_found() {
        let store = InMemoryUserStore::new();
        assert!(matches!(
            store.find_by_username("ghost").await,
            Err(AuthError::UserNotFound)
        ));
    }

    #[tokio::test]
    async fn test_lookup_is_case_sensitive() {
        let store = InMemoryUserStore::new();
        store.insert(user("Alice")).await.unwrap();

        assert!(store.find_by_username("alice").await.is_err());
        assert!(store.find_by_username("Alice").await.is_ok());
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let store = InMemoryUserStore::new();
        store.insert(user("alice")).await.unwrap();

        assert!(matches!(
            store.insert(user("alice")).await,
            Err(AuthError::UsernameTaken)
        ));
    }
}
