//! Password hashing with bcrypt (default) or Argon2

use std::borrow::Cow;
use std::fmt::Debug;
use std::ops::RangeInclusive;
use std::sync::Arc;

use argon2::{
    password_hash::{
        rand_core::OsRng, Error as PasswordHashError, PasswordHash,
        PasswordHasher as Argon2PasswordHasher, PasswordVerifier, SaltString,
    },
    Argon2,
};

use sha2::{Digest, Sha256};

use crate::domain::DomainError;

/// bcrypt work factor used unless configured otherwise
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// Work factors bcrypt accepts
pub const BCRYPT_COST_RANGE: RangeInclusive<u32> = 4..=31;

/// bcrypt ignores input past this many bytes
const BCRYPT_MAX_INPUT_BYTES: usize = 72;

/// Trait for password hashing operations
///
/// Implementations are CPU-bound and synchronous; async callers should run
/// them on the blocking pool.
pub trait PasswordHasher: Send + Sync + Debug {
    /// Hash a password with a fresh random salt
    fn hash(&self, password: &str) -> Result<String, DomainError>;

    /// Verify a password against a stored hash
    ///
    /// Returns `Ok(false)` on mismatch and `DomainError::Hash` when the
    /// stored hash cannot be parsed.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError>;
}

/// bcrypt-based password hasher
///
/// Passwords longer than 72 bytes are reduced to a SHA-256 digest first so
/// that every byte of the password counts.
#[derive(Debug, Clone)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub fn new() -> Self {
        Self {
            cost: DEFAULT_BCRYPT_COST,
        }
    }

    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    fn input(password: &str) -> Cow<'_, str> {
        if password.len() <= BCRYPT_MAX_INPUT_BYTES {
            return Cow::Borrowed(password);
        }

        let digest = Sha256::digest(password.as_bytes());
        Cow::Owned(format!("sha256${}", hex::encode(digest)))
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher for BcryptHasher {
    fn hash(&self, password: &str) -> Result<String, DomainError> {
        bcrypt::hash(Self::input(password).as_ref(), self.cost)
            .map_err(|e| DomainError::hash(format!("Failed to hash password: {}", e)))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError> {
        bcrypt::verify(Self::input(password).as_ref(), hash)
            .map_err(|e| DomainError::hash(format!("Invalid hash format: {}", e)))
    }
}

/// Argon2-based password hasher
#[derive(Debug, Clone, Default)]
pub struct Argon2Hasher;

impl Argon2Hasher {
    pub fn new() -> Self {
        Self
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, DomainError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| DomainError::hash(format!("Failed to hash password: {}", e)))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| DomainError::hash(format!("Invalid hash format: {}", e)))?;

        match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(PasswordHashError::Password) => Ok(false),
            Err(e) => Err(DomainError::hash(format!("Failed to verify password: {}", e))),
        }
    }
}

/// Hashing algorithm selectable from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HasherKind {
    Bcrypt,
    Argon2,
}

impl HasherKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "bcrypt" => Some(Self::Bcrypt),
            "argon2" | "argon2id" => Some(Self::Argon2),
            _ => None,
        }
    }

    /// Build the hasher; `bcrypt_cost` is ignored for Argon2
    pub fn build(self, bcrypt_cost: u32) -> Arc<dyn PasswordHasher> {
        match self {
            Self::Bcrypt => Arc::new(BcryptHasher::with_cost(bcrypt_cost)),
            Self::Argon2 => Arc::new(Argon2Hasher::new()),
        }
    }
}
