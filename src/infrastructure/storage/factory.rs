//! Storage factory for runtime backend selection

use std::sync::Arc;

use crate::domain::DomainError;
use crate::domain::storage::{Document, DocumentStore};

use super::in_memory::InMemoryDocumentStore;
use super::postgres::{PostgresConfig, PostgresDocumentStore};

/// Supported storage types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageType {
    /// In-memory storage (for testing/development)
    InMemory,
    /// PostgreSQL JSONB storage
    Postgres,
}

impl StorageType {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "memory" | "inmemory" | "in-memory" | "in_memory" => Some(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Some(Self::Postgres),
            _ => None,
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone)]
pub enum StorageConfig {
    /// In-memory storage configuration
    InMemory,
    /// PostgreSQL storage configuration
    Postgres(PostgresConfig),
}

impl StorageConfig {
    /// Creates an in-memory storage configuration
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    /// Creates a PostgreSQL configuration from a connection string
    pub fn postgres_url(url: impl Into<String>) -> Self {
        Self::Postgres(PostgresConfig::new(url))
    }

    /// Returns the storage type
    pub fn storage_type(&self) -> StorageType {
        match self {
            Self::InMemory => StorageType::InMemory,
            Self::Postgres(_) => StorageType::Postgres,
        }
    }
}

/// Factory for creating document stores
#[derive(Debug)]
pub struct StorageFactory;

impl StorageFactory {
    /// Creates a document store for `collection` based on the configuration
    pub async fn create<D>(
        config: &StorageConfig,
        collection: &str,
    ) -> Result<Arc<dyn DocumentStore<D>>, DomainError>
    where
        D: Document + 'static,
    {
        match config {
            StorageConfig::InMemory => Ok(Arc::new(InMemoryDocumentStore::<D>::new())),
            StorageConfig::Postgres(pg_config) => {
                let store = PostgresDocumentStore::<D>::connect(pg_config, collection).await?;
                store.ensure_collection().await?;
                Ok(Arc::new(store))
            }
        }
    }
}
