//! Account operation outcomes

use thiserror::Error;

use super::validation::UserValidationError;

pub const INVALID_PARAMS_MESSAGE: &str = "Invalid params";
pub const USER_NOT_FOUND_MESSAGE: &str = "Cannot find user";
pub const PASSWORD_MISMATCH_MESSAGE: &str = "The new password and its duplicate don't match.";
pub const INCORRECT_PASSWORD_MESSAGE: &str = "Current password is incorrect";

/// Failures returned by the account service
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AccountError {
    #[error("{0}")]
    ValidationFailed(String),

    #[error("{}", PASSWORD_MISMATCH_MESSAGE)]
    PasswordMismatch,

    #[error("{}", INCORRECT_PASSWORD_MESSAGE)]
    IncorrectCurrentPassword,

    #[error("{}", INVALID_PARAMS_MESSAGE)]
    InvalidIdentifier,

    #[error("{}", USER_NOT_FOUND_MESSAGE)]
    NotFound,

    #[error("Username '{0}' already exists")]
    UsernameTaken(String),

    #[error("Failed to create user: {0}")]
    CreationFailed(String),

    #[error("Failed to update password: {0}")]
    PersistFailed(String),

    #[error("Storage error: {0}")]
    Store(String),

    #[error("Password hashing failed: {0}")]
    Hash(String),
}

impl From<UserValidationError> for AccountError {
    fn from(err: UserValidationError) -> Self {
        match err {
            UserValidationError::InvalidIdLength { .. } => Self::InvalidIdentifier,
            other => Self::ValidationFailed(other.to_string()),
        }
    }
}
