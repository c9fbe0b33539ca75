//! Document-store backed user repository

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::warn;

use crate::domain::DomainError;
use crate::domain::storage::DocumentStore;
use crate::domain::user::{NewUser, User, UserId, UserRepository};

/// Attempts at drawing an unused identifier before giving up
const MAX_ID_ATTEMPTS: usize = 3;

/// UserRepository over a `DocumentStore<User>` collection
#[derive(Debug)]
pub struct StorageUserRepository {
    store: Arc<dyn DocumentStore<User>>,
}

impl StorageUserRepository {
    pub fn new(store: Arc<dyn DocumentStore<User>>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserRepository for StorageUserRepository {
    async fn insert(&self, user: NewUser) -> Result<User, DomainError> {
        let mut last_error = None;

        for _ in 0..MAX_ID_ATTEMPTS {
            let document = User::from_new(UserId::generate(), user.clone());

            match self.store.insert(document).await {
                Ok(created) => return Ok(created),
                Err(DomainError::Conflict { message }) => {
                    warn!(%message, "Generated user id collided, retrying");
                    last_error = Some(DomainError::conflict(message));
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or_else(|| DomainError::internal("Failed to allocate user id")))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, DomainError> {
        let user_id = UserId::new(id).map_err(|e| DomainError::invalid_id(e.to_string()))?;
        self.store.get(&user_id).await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let matches = self
            .store
            .find_by_field("username", &Value::from(username))
            .await?;

        Ok(matches.into_iter().next())
    }

    async fn find_all(&self) -> Result<Vec<User>, DomainError> {
        self.store.find_all().await
    }

    async fn save(&self, user: &User) -> Result<User, DomainError> {
        self.store.update(user.clone()).await
    }

    async fn ping(&self) -> Result<(), DomainError> {
        self.store.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::storage::mock::MockDocumentStore;
    use crate::infrastructure::storage::InMemoryDocumentStore;

    fn new_user(username: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            password_hash: "hashed_password".to_string(),
            user_type: 1,
        }
    }

    fn in_memory_repo() -> StorageUserRepository {
        StorageUserRepository::new(Arc::new(InMemoryDocumentStore::new()))
    }

    #[tokio::test]
    async fn test_insert_assigns_id() {
        let repo = in_memory_repo();

        let user = repo.insert(new_user("testuser")).await.unwrap();
        assert_eq!(user.id().as_str().len(), 24);
        assert_eq!(user.username(), "testuser");

        let found = repo.find_by_id(user.id().as_str()).await.unwrap();
        assert_eq!(found, Some(user));
    }

    #[tokio::test]
    async fn test_find_by_id_absent() {
        let repo = in_memory_repo();

        let found = repo.find_by_id("507f1f77bcf86cd799439011").await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_find_by_id_invalid_skips_store() {
        let store = Arc::new(MockDocumentStore::<User>::new());
        let repo = StorageUserRepository::new(store.clone());

        let result = repo.find_by_id("0123456789").await;
        assert!(matches!(result, Err(DomainError::InvalidId { .. })));
        assert_eq!(store.reads(), 0);
    }

    #[tokio::test]
    async fn test_store_failure_is_storage_error() {
        let store = Arc::new(MockDocumentStore::<User>::new().with_error("connection reset"));
        let repo = StorageUserRepository::new(store);

        let result = repo.find_by_id("507f1f77bcf86cd799439011").await;
        assert!(matches!(result, Err(DomainError::Storage { .. })));

        let result = repo.insert(new_user("testuser")).await;
        assert!(matches!(result, Err(DomainError::Storage { .. })));
    }

    #[tokio::test]
    async fn test_find_by_username() {
        let repo = in_memory_repo();

        repo.insert(new_user("alice")).await.unwrap();
        repo.insert(new_user("bob_1")).await.unwrap();

        let found = repo.find_by_username("bob_1").await.unwrap();
        assert_eq!(found.unwrap().username(), "bob_1");

        assert!(repo.find_by_username("carol").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_replaces_hash() {
        let repo = in_memory_repo();
        let mut user = repo.insert(new_user("testuser")).await.unwrap();

        user.set_password_hash("new_hash");
        repo.save(&user).await.unwrap();

        let stored = repo.find_by_id(user.id().as_str()).await.unwrap().unwrap();
        assert_eq!(stored.password_hash(), "new_hash");
    }

    #[tokio::test]
    async fn test_find_all() {
        let repo = in_memory_repo();

        repo.insert(new_user("user1")).await.unwrap();
        repo.insert(new_user("user2")).await.unwrap();

        let all = repo.find_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].username(), "user1");
    }
}
