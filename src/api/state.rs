//! Application state for shared services

use std::sync::Arc;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::domain::user::{AccountError, User, UserRepository};
use crate::infrastructure::user::{
    AccountService, ChangePasswordRequest, PasswordHasher, RegisterRequest,
};

/// Application state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<dyn AccountServiceTrait>,
    /// Include password hashes in user payloads
    pub expose_password_hash: bool,
}

impl AppState {
    pub fn new(account_service: Arc<dyn AccountServiceTrait>) -> Self {
        Self {
            account_service,
            expose_password_hash: false,
        }
    }

    pub fn with_password_hash_exposed(mut self, expose: bool) -> Self {
        self.expose_password_hash = expose;
        self
    }
}

/// Trait for account service operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AccountServiceTrait: Send + Sync {
    async fn register(&self, request: RegisterRequest) -> Result<User, AccountError>;
    async fn lookup(&self, id: &str) -> Result<User, AccountError>;
    async fn validate_password(&self, id: &str, candidate: &str) -> Result<bool, AccountError>;
    async fn change_password(
        &self,
        id: &str,
        request: ChangePasswordRequest,
    ) -> Result<User, AccountError>;
    async fn list_all(&self) -> Result<Vec<User>, AccountError>;
    async fn ping(&self) -> Result<(), AccountError>;
}

#[async_trait]
impl<R, H> AccountServiceTrait for AccountService<R, H>
where
    R: UserRepository + ?Sized + 'static,
    H: PasswordHasher + ?Sized + 'static,
{
    async fn register(&self, request: RegisterRequest) -> Result<User, AccountError> {
        AccountService::register(self, request).await
    }

    async fn lookup(&self, id: &str) -> Result<User, AccountError> {
        AccountService::lookup(self, id).await
    }

    async fn validate_password(&self, id: &str, candidate: &str) -> Result<bool, AccountError> {
        AccountService::validate_password(self, id, candidate).await
    }

    async fn change_password(
        &self,
        id: &str,
        request: ChangePasswordRequest,
    ) -> Result<User, AccountError> {
        AccountService::change_password(self, id, request).await
    }

    async fn list_all(&self) -> Result<Vec<User>, AccountError> {
        AccountService::list_all(self).await
    }

    async fn ping(&self) -> Result<(), AccountError> {
        AccountService::ping(self).await
    }
}
