//! Document and key traits for the document store

use std::fmt::Debug;

use serde::{de::DeserializeOwned, Serialize};

/// Trait for types that address a document in a collection
pub trait DocumentKey: Clone + Debug + Send + Sync + Eq + std::hash::Hash {
    /// Returns the key as stored by the backend
    fn as_str(&self) -> &str;
}

/// Trait for records persisted in a document collection
pub trait Document: Clone + Debug + Send + Sync + Serialize + DeserializeOwned {
    /// The key type for this document
    type Key: DocumentKey;

    /// Returns the document's key
    fn key(&self) -> &Self::Key;
}
