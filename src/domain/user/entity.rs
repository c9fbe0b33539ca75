//! User entity and related types

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use super::validation::{validate_user_id, UserValidationError};
use crate::domain::storage::{Document, DocumentKey};

/// User identifier - exactly 24 characters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Create a UserId after validation
    pub fn new(id: impl Into<String>) -> Result<Self, UserValidationError> {
        let id = id.into();
        validate_user_id(&id)?;
        Ok(Self(id))
    }

    /// Generate a fresh identifier: 4-byte big-endian seconds since the
    /// epoch followed by 8 random bytes, hex encoded
    pub fn generate() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as u32)
            .unwrap_or_default();
        let random: [u8; 8] = rand::random();

        let mut bytes = [0u8; 12];
        bytes[..4].copy_from_slice(&secs.to_be_bytes());
        bytes[4..].copy_from_slice(&random);

        Self(hex::encode(bytes))
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl DocumentKey for UserId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// A user that has not been persisted yet and has no identifier
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub user_type: i64,
}

/// User account document
///
/// Field names match the persisted collection: `_id`, `username`,
/// `password` (the hash, never plaintext) and `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    id: UserId,
    username: String,
    #[serde(rename = "password")]
    password_hash: String,
    #[serde(rename = "type")]
    user_type: i64,
}

impl User {
    /// Assign an identifier to a new user
    pub fn from_new(id: UserId, new_user: NewUser) -> Self {
        Self {
            id,
            username: new_user.username,
            password_hash: new_user.password_hash,
            user_type: new_user.user_type,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn user_type(&self) -> i64 {
        self.user_type
    }

    /// Replace the password hash; the only mutation a user supports
    pub fn set_password_hash(&mut self, password_hash: impl Into<String>) {
        self.password_hash = password_hash.into();
    }
}

impl Document for User {
    type Key = UserId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_user(username: &str) -> User {
        User::from_new(
            UserId::generate(),
            NewUser {
                username: username.to_string(),
                password_hash: "hashed_password".to_string(),
                user_type: 1,
            },
        )
    }

    #[test]
    fn test_user_id_valid() {
        let id = UserId::new("507f1f77bcf86cd799439011").unwrap();
        assert_eq!(id.as_str(), "507f1f77bcf86cd799439011");
    }

    #[test]
    fn test_user_id_invalid() {
        assert!(UserId::new("").is_err());
        assert!(UserId::new("short").is_err());
        assert!(UserId::new("x".repeat(25)).is_err());
    }

    #[test]
    fn test_generated_ids_are_valid_and_distinct() {
        let a = UserId::generate();
        let b = UserId::generate();

        assert_eq!(a.as_str().len(), 24);
        assert!(a.as_str().chars().all(|c| c.is_ascii_hexdigit()));
        assert!(UserId::new(a.as_str()).is_ok());
        assert_ne!(a, b);
    }

    #[test]
    fn test_user_creation() {
        let user = create_test_user("testuser");

        assert_eq!(user.username(), "testuser");
        assert_eq!(user.password_hash(), "hashed_password");
        assert_eq!(user.user_type(), 1);
    }

    #[test]
    fn test_set_password_hash_keeps_identity() {
        let mut user = create_test_user("testuser");
        let id = user.id().clone();

        user.set_password_hash("new_hash");
        assert_eq!(user.password_hash(), "new_hash");
        assert_eq!(user.id(), &id);
        assert_eq!(user.username(), "testuser");
    }

    #[test]
    fn test_document_field_names() {
        let user = create_test_user("testuser");
        let json = serde_json::to_value(&user).unwrap();

        assert_eq!(json["_id"], user.id().as_str());
        assert_eq!(json["username"], "testuser");
        assert_eq!(json["password"], "hashed_password");
        assert_eq!(json["type"], 1);
    }

    #[test]
    fn test_document_round_trip_rejects_bad_id() {
        let json = serde_json::json!({
            "_id": "too-short",
            "username": "testuser",
            "password": "hash",
            "type": 0
        });

        assert!(serde_json::from_value::<User>(json).is_err());
    }
}
