//! Username, password and identifier format rules

use thiserror::Error;

/// Errors that can occur during user validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserValidationError {
    #[error("Invalid {field} format: {allowed}; min: {min}; max: {max}")]
    InvalidFormat {
        field: &'static str,
        allowed: &'static str,
        min: usize,
        max: usize,
    },

    #[error("User ID must be exactly {expected} characters, got {actual}")]
    InvalidIdLength { expected: usize, actual: usize },
}

/// Length of a user identifier accepted by lookups
pub const USER_ID_LENGTH: usize = 24;

/// A format rule: allowed characters plus inclusive length bounds
#[derive(Debug, Clone, Copy)]
pub struct FormatRule {
    pub field: &'static str,
    pub allowed: &'static str,
    pub min: usize,
    pub max: usize,
    accepts: fn(char) -> bool,
}

impl FormatRule {
    /// Check a value against the rule; length is counted in characters
    pub fn matches(&self, value: &str) -> bool {
        let len = value.chars().count();
        len >= self.min && len <= self.max && value.chars().all(self.accepts)
    }

    /// Check a value and produce the descriptive error on failure
    pub fn check(&self, value: &str) -> Result<(), UserValidationError> {
        if self.matches(value) {
            Ok(())
        } else {
            Err(UserValidationError::InvalidFormat {
                field: self.field,
                allowed: self.allowed,
                min: self.min,
                max: self.max,
            })
        }
    }
}

fn is_username_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-')
}

fn is_any_char(_: char) -> bool {
    true
}

pub const USERNAME_RULE: FormatRule = FormatRule {
    field: "username",
    allowed: "Lower or upper case letters; numbers; underscore; hyphen, dot.",
    min: 4,
    max: 16,
    accepts: is_username_char,
};

pub const PASSWORD_RULE: FormatRule = FormatRule {
    field: "password",
    allowed: "Lower or upper case letters; numbers; symbols",
    min: 8,
    max: 254,
    accepts: is_any_char,
};

/// Validate a username
///
/// Rules:
/// - 4 to 16 characters
/// - Only ASCII letters, digits, underscore, hyphen and dot
pub fn validate_username(username: &str) -> Result<(), UserValidationError> {
    USERNAME_RULE.check(username)
}

/// Validate a password
///
/// Rules:
/// - 8 to 254 characters, any character allowed
pub fn validate_password(password: &str) -> Result<(), UserValidationError> {
    PASSWORD_RULE.check(password)
}

/// Validate a user identifier (length only)
pub fn validate_user_id(id: &str) -> Result<(), UserValidationError> {
    let actual = id.chars().count();

    if actual != USER_ID_LENGTH {
        return Err(UserValidationError::InvalidIdLength {
            expected: USER_ID_LENGTH,
            actual,
        });
    }

    Ok(())
}
