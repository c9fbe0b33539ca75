//! Account service: registration, lookup and password management

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::domain::DomainError;
use crate::domain::user::{
    validate_password, validate_username, AccountError, NewUser, User, UserRepository,
};

use super::password::PasswordHasher;

/// Request for registering a new account
#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub user_type: i64,
}

/// Request for changing a user's password
#[derive(Debug, Clone)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
    pub new_password_duplicate: String,
}

/// Account service over a user repository and a password hasher
#[derive(Debug)]
pub struct AccountService<R: UserRepository + ?Sized, H: PasswordHasher + ?Sized> {
    repository: Arc<R>,
    hasher: Arc<H>,
}

impl<R, H> AccountService<R, H>
where
    R: UserRepository + ?Sized,
    H: PasswordHasher + ?Sized + 'static,
{
    pub fn new(repository: Arc<R>, hasher: Arc<H>) -> Self {
        Self { repository, hasher }
    }

    /// Register a new account
    ///
    /// The password rule is checked before the username rule.
    pub async fn register(&self, request: RegisterRequest) -> Result<User, AccountError> {
        validate_password(&request.password)?;
        validate_username(&request.username)?;

        match self.repository.find_by_username(&request.username).await {
            Ok(Some(_)) => return Err(AccountError::UsernameTaken(request.username)),
            Ok(None) => {}
            Err(e) => return Err(store_error("checking username", e)),
        }

        let password_hash = self.hash_password(request.password).await?;

        let user = self
            .repository
            .insert(NewUser {
                username: request.username,
                password_hash,
                user_type: request.user_type,
            })
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to insert user");
                AccountError::CreationFailed(e.to_string())
            })?;

        info!(user_id = %user.id(), username = %user.username(), "User registered");
        Ok(user)
    }

    /// Get a user by identifier
    pub async fn lookup(&self, id: &str) -> Result<User, AccountError> {
        match self.repository.find_by_id(id).await {
            Ok(Some(user)) => Ok(user),
            Ok(None) => Err(AccountError::NotFound),
            Err(DomainError::InvalidId { .. }) => Err(AccountError::InvalidIdentifier),
            Err(e) => Err(store_error("looking up user", e)),
        }
    }

    /// Check a candidate password against the stored hash
    ///
    /// Returns the comparison result only; no session or token is created.
    pub async fn validate_password(&self, id: &str, candidate: &str) -> Result<bool, AccountError> {
        let user = self.lookup(id).await?;
        self.verify_password(candidate.to_string(), user.password_hash().to_string())
            .await
    }

    /// Change a user's password after confirming the current one
    pub async fn change_password(
        &self,
        id: &str,
        request: ChangePasswordRequest,
    ) -> Result<User, AccountError> {
        let mut user = self.lookup(id).await?;

        if request.new_password != request.new_password_duplicate {
            return Err(AccountError::PasswordMismatch);
        }

        validate_password(&request.new_password)?;

        let verified = self
            .verify_password(request.current_password, user.password_hash().to_string())
            .await?;

        if !verified {
            warn!(user_id = %user.id(), "Password change rejected: current password incorrect");
            return Err(AccountError::IncorrectCurrentPassword);
        }

        let new_hash = self.hash_password(request.new_password).await?;
        user.set_password_hash(new_hash);

        let updated = self.repository.save(&user).await.map_err(|e| {
            error!(user_id = %user.id(), error = %e, "Failed to persist new password");
            AccountError::PersistFailed(e.to_string())
        })?;

        info!(user_id = %updated.id(), "Password changed");
        Ok(updated)
    }

    /// List every user in store order
    pub async fn list_all(&self) -> Result<Vec<User>, AccountError> {
        self.repository
            .find_all()
            .await
            .map_err(|e| store_error("listing users", e))
    }

    /// Check the user store is reachable
    pub async fn ping(&self) -> Result<(), AccountError> {
        self.repository
            .ping()
            .await
            .map_err(|e| store_error("pinging store", e))
    }

    async fn hash_password(&self, password: String) -> Result<String, AccountError> {
        let hasher = Arc::clone(&self.hasher);

        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| hash_error(DomainError::internal(format!("Hashing task failed: {}", e))))?
            .map_err(hash_error)
    }

    async fn verify_password(&self, password: String, hash: String) -> Result<bool, AccountError> {
        let hasher = Arc::clone(&self.hasher);

        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| hash_error(DomainError::internal(format!("Hashing task failed: {}", e))))?
            .map_err(hash_error)
    }
}

fn store_error(action: &str, e: DomainError) -> AccountError {
    error!(error = %e, "Store failure while {}", action);
    AccountError::Store(e.to_string())
}

fn hash_error(e: DomainError) -> AccountError {
    error!(error = %e, "Password hashing failure");
    AccountError::Hash(e.to_string())
}
