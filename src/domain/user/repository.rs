//! User repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{NewUser, User};
use crate::domain::DomainError;

/// Repository trait for the user collection
#[async_trait]
pub trait UserRepository: Send + Sync + Debug {
    /// Persist a new user and assign its identifier
    async fn insert(&self, user: NewUser) -> Result<User, DomainError>;

    /// Get a user by identifier
    ///
    /// An identifier that is not 24 characters long yields
    /// `DomainError::InvalidId` without querying the store.
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, DomainError>;

    /// Get a user by username
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// List all users in store order
    async fn find_all(&self) -> Result<Vec<User>, DomainError>;

    /// Update an existing user by identifier
    async fn save(&self, user: &User) -> Result<User, DomainError>;

    /// Check the underlying store is reachable
    async fn ping(&self) -> Result<(), DomainError>;
}
