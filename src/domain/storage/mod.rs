//! Storage domain - Document store abstraction
//!
//! Documents are serde-serializable records addressed by a string key.
//! Backends live in `infrastructure::storage`.

mod document;
mod store;

pub use document::{Document, DocumentKey};
pub use store::DocumentStore;

#[cfg(test)]
pub use store::mock;
