//! Document store trait definition

use std::fmt::Debug;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::DomainError;

use super::document::{Document, DocumentKey};

/// Generic document collection: insert, find by key, update, find all
#[async_trait]
pub trait DocumentStore<D>: Send + Sync + Debug
where
    D: Document + 'static,
{
    /// Retrieves a document by its key
    async fn get(&self, key: &D::Key) -> Result<Option<D>, DomainError>;

    /// Retrieves every document in store iteration order
    async fn find_all(&self) -> Result<Vec<D>, DomainError>;

    /// Retrieves documents whose top-level `field` equals `value`
    async fn find_by_field(&self, field: &str, value: &Value) -> Result<Vec<D>, DomainError> {
        let mut matches = Vec::new();

        for document in self.find_all().await? {
            let json = serde_json::to_value(&document).map_err(|e| {
                DomainError::storage(format!("Failed to serialize document: {}", e))
            })?;

            if json.get(field) == Some(value) {
                matches.push(document);
            }
        }

        Ok(matches)
    }

    /// Inserts a new document, returns a conflict if the key is taken
    async fn insert(&self, document: D) -> Result<D, DomainError>;

    /// Replaces an existing document, returns not found if absent
    async fn update(&self, document: D) -> Result<D, DomainError>;

    /// Verifies the backend is reachable
    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Mock document store that counts reads and can be told to fail
    #[derive(Debug)]
    pub struct MockDocumentStore<D>
    where
        D: Document,
    {
        documents: Mutex<Vec<D>>,
        error: Mutex<Option<String>>,
        insert_error: Mutex<Option<String>>,
        update_error: Mutex<Option<String>>,
        reads: AtomicUsize,
    }

    impl<D> Default for MockDocumentStore<D>
    where
        D: Document,
    {
        fn default() -> Self {
            Self::new()
        }
    }

    impl<D> MockDocumentStore<D>
    where
        D: Document,
    {
        pub fn new() -> Self {
            Self {
                documents: Mutex::new(Vec::new()),
                error: Mutex::new(None),
                insert_error: Mutex::new(None),
                update_error: Mutex::new(None),
                reads: AtomicUsize::new(0),
            }
        }

        pub fn with_document(self, document: D) -> Self {
            self.documents.lock().unwrap().push(document);
            self
        }

        /// Every operation fails with a storage error
        pub fn with_error(self, error: impl Into<String>) -> Self {
            *self.error.lock().unwrap() = Some(error.into());
            self
        }

        /// Only inserts fail; reads and updates succeed
        pub fn with_insert_error(self, error: impl Into<String>) -> Self {
            *self.insert_error.lock().unwrap() = Some(error.into());
            self
        }

        /// Only updates fail; reads and inserts succeed
        pub fn with_update_error(self, error: impl Into<String>) -> Self {
            *self.update_error.lock().unwrap() = Some(error.into());
            self
        }

        /// Number of get/find_all calls that reached the store
        pub fn reads(&self) -> usize {
            self.reads.load(Ordering::SeqCst)
        }

        fn check_error(&self) -> Result<(), DomainError> {
            if let Some(error) = self.error.lock().unwrap().clone() {
                return Err(DomainError::storage(error));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl<D> DocumentStore<D> for MockDocumentStore<D>
    where
        D: Document + 'static,
    {
        async fn get(&self, key: &D::Key) -> Result<Option<D>, DomainError> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            self.check_error()?;
            Ok(self
                .documents
                .lock()
                .unwrap()
                .iter()
                .find(|d| d.key() == key)
                .cloned())
        }

        async fn find_all(&self) -> Result<Vec<D>, DomainError> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            self.check_error()?;
            Ok(self.documents.lock().unwrap().clone())
        }

        async fn insert(&self, document: D) -> Result<D, DomainError> {
            self.check_error()?;

            if let Some(error) = self.insert_error.lock().unwrap().clone() {
                return Err(DomainError::storage(error));
            }

            let mut documents = self.documents.lock().unwrap();

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
            self.check_error()?;

            if let Some(error) = self.update_error.lock().unwrap().clone() {
                return Err(DomainError::storage(error));
            }

            let mut documents = self.documents.lock().unwrap();

            match documents.iter_mut().find(|d| d.key() == document.key()) {
                Some(existing) => {
                    *existing = document.clone();
                    Ok(document)
                }
                None => Err(DomainError::not_found(format!(
                    "Document with key '{}' not found",
                    document.key().as_str()
                ))),
            }
        }

        async fn ping(&self) -> Result<(), DomainError> {
            self.check_error()
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use serde::{Deserialize, Serialize};

        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        struct TagKey(String);

        impl DocumentKey for TagKey {
            fn as_str(&self) -> &str {
                &self.0
            }
        }

        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        struct Tag {
            id: TagKey,
            label: String,
        }

        impl Document for Tag {
            type Key = TagKey;

            fn key(&self) -> &Self::Key {
                &self.id
            }
        }

        fn tag(id: &str, label: &str) -> Tag {
            Tag {
                id: TagKey(id.to_string()),
                label: label.to_string(),
            }
        }

        #[tokio::test]
        async fn test_insert_conflict() {
            let store = MockDocumentStore::new().with_document(tag("1", "red"));

            let result = store.insert(tag("1", "blue")).await;
            assert!(matches!(result, Err(DomainError::Conflict { .. })));
        }

        #[tokio::test]
        async fn test_update_not_found() {
            let store: MockDocumentStore<Tag> = MockDocumentStore::new();

            let result = store.update(tag("1", "red")).await;
            assert!(matches!(result, Err(DomainError::NotFound { .. })));
        }

        #[tokio::test]
        async fn test_find_by_field_default_impl() {
            let store = MockDocumentStore::new()
                .with_document(tag("1", "red"))
                .with_document(tag("2", "blue"))
                .with_document(tag("3", "red"));

            let reds = store
                .find_by_field("label", &Value::from("red"))
                .await
                .unwrap();
            assert_eq!(reds.len(), 2);

            let none = store
                .find_by_field("label", &Value::from("green"))
                .await
                .unwrap();
            assert!(none.is_empty());
        }

        #[tokio::test]
        async fn test_reads_are_counted() {
            let store = MockDocumentStore::new().with_document(tag("1", "red"));

            store.get(&TagKey("1".to_string())).await.unwrap();
            store.find_all().await.unwrap();
            assert_eq!(store.reads(), 2);
        }

        #[tokio::test]
        async fn test_update_error_only_affects_updates() {
            let store = MockDocumentStore::new()
                .with_document(tag("1", "red"))
                .with_update_error("disk full");

            assert!(store.get(&TagKey("1".to_string())).await.is_ok());

            let result = store.update(tag("1", "blue")).await;
            assert!(matches!(result, Err(DomainError::Storage { .. })));
        }

        #[tokio::test]
        async fn test_insert_error_only_affects_inserts() {
            let store = MockDocumentStore::new()
                .with_document(tag("1", "red"))
                .with_insert_error("write rejected");

            assert_eq!(store.find_all().await.unwrap().len(), 1);
            assert!(store.update(tag("1", "blue")).await.is_ok());

            let result = store.insert(tag("2", "green")).await;
            assert!(matches!(result, Err(DomainError::Storage { .. })));
        }

        #[tokio::test]
        async fn test_with_error() {
            let store: MockDocumentStore<Tag> = MockDocumentStore::new().with_error("offline");

            assert!(store.find_all().await.is_err());
            assert!(store.ping().await.is_err());
        }
    }
}
