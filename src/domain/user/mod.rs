//! User domain
//!
//! Domain types for user accounts: the user document, format rules,
//! the repository trait and the account operation outcomes.

mod entity;
mod error;
mod repository;
mod validation;

pub use entity::{NewUser, User, UserId};
pub use error::{
    AccountError, INCORRECT_PASSWORD_MESSAGE, INVALID_PARAMS_MESSAGE, PASSWORD_MISMATCH_MESSAGE,
    USER_NOT_FOUND_MESSAGE,
};
pub use repository::UserRepository;
pub use validation::{
    validate_password, validate_user_id, validate_username, FormatRule, UserValidationError,
    PASSWORD_RULE, USERNAME_RULE, USER_ID_LENGTH,
};
