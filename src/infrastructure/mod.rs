//! Infrastructure layer - storage backends, hashing and logging

pub mod logging;
pub mod storage;
pub mod user;
