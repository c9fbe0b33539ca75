//! User infrastructure module
//!
//! Password hashing (bcrypt or Argon2), the document-store backed user
//! repository and the account service.

mod password;
mod repository;
mod service;

pub use password::{
    Argon2Hasher, BCRYPT_COST_RANGE, BcryptHasher, DEFAULT_BCRYPT_COST, HasherKind, PasswordHasher,
};
pub use repository::StorageUserRepository;
pub use service::{AccountService, ChangePasswordRequest, RegisterRequest};
