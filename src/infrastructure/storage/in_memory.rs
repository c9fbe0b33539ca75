//! In-memory document store

use std::fmt::Debug;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::DomainError;
use crate::domain::storage::{Document, DocumentKey, DocumentStore};

/// Thread-safe in-memory collection that keeps insertion order
///
/// Useful for testing and development. Data is lost when the process terminates.
#[derive(Debug)]
pub struct InMemoryDocumentStore<D>
where
    D: Document,
{
    documents: RwLock<Vec<D>>,
}

impl<D> Default for InMemoryDocumentStore<D>
where
    D: Document,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<D> InMemoryDocumentStore<D>
where
    D: Document,
{
    /// Creates a new empty collection
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(Vec::new()),
        }
    }
}

#[async_trait]
impl<D> DocumentStore<D> for InMemoryDocumentStore<D>
where
    D: Document + 'static,
{
    async fn get(&self, key: &D::Key) -> Result<Option<D>, DomainError> {
        let documents = self.documents.read().map_err(|e| {
            DomainError::storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(documents.iter().find(|d| d.key() == key).cloned())
    }

    async fn find_all(&self) -> Result<Vec<D>, DomainError> {
        let documents = self.documents.read().map_err(|e| {
            DomainError::storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(documents.clone())
    }

    async fn insert(&self, document: D) -> Result<D, DomainError> {
        let mut documents = self.documents.write().map_err(|e| {
            DomainError::storage(format!("Failed to acquire write lock: {}", e))
        })?;

        if documents.iter().any(|d| d.key() == document.key()) {
            return Err(DomainError::conflict(format!(
                "Document with key '{}' already exists",
                document.key().as_str()
            )));
        }

        documents.push(document.clone());
        Ok(document)
    }

    async fn update(&self, document: D) -> Result<D, DomainError> {
        let mut documents = self.documents.write().map_err(|e| {
            DomainError::storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let existing = documents
            .iter_mut()
            .find(|d| d.key() == document.key())
            .ok_or_else(|| {
                DomainError::not_found(format!(
                    "Document with key '{}' not found",
                    document.key().as_str()
                ))
            })?;

        *existing = document.clone();
        Ok(document)
    }
}
