//! Domain layer - accounts, validation rules and storage contracts

pub mod error;
pub mod storage;
pub mod user;

pub use error::DomainError;
