//! PostgreSQL document store with connection pooling

use std::fmt::Debug;
use std::marker::PhantomData;

use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;

use crate::domain::DomainError;
use crate::domain::storage::{Document, DocumentKey, DocumentStore};

/// PostgreSQL storage configuration
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Minimum number of connections to maintain
    pub min_connections: u32,
    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
    /// Idle timeout in seconds
    pub idle_timeout_secs: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/accounts".to_string(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout_secs: 30,
            idle_timeout_secs: 600,
        }
    }
}

impl PostgresConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }
}

/// Document collection stored as JSONB rows
///
/// Each collection is a table with (key, data, created_at, updated_at)
/// columns; `find_all` returns rows in creation order.
pub struct PostgresDocumentStore<D>
where
    D: Document,
{
    pool: PgPool,
    collection: String,
    _phantom: PhantomData<D>,
}

impl<D> Debug for PostgresDocumentStore<D>
where
    D: Document,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresDocumentStore")
            .field("collection", &self.collection)
            .finish()
    }
}

impl<D> PostgresDocumentStore<D>
where
    D: Document,
{
    /// Creates a store over an existing pool
    pub fn new(pool: PgPool, collection: impl Into<String>) -> Self {
        Self {
            pool,
            collection: collection.into(),
            _phantom: PhantomData,
        }
    }

    /// Creates a store with its own connection pool
    pub async fn connect(
        config: &PostgresConfig,
        collection: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(std::time::Duration::from_secs(config.connect_timeout_secs))
            .idle_timeout(std::time::Duration::from_secs(config.idle_timeout_secs))
            .connect(&config.url)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to connect to PostgreSQL: {}", e)))?;

        Ok(Self::new(pool, collection))
    }

    /// Ensures the collection table exists
    pub async fn ensure_collection(&self) -> Result<(), DomainError> {
        let query = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                key VARCHAR(64) PRIMARY KEY,
                data JSONB NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
            self.collection
        );

        sqlx::query(&query)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to create collection: {}", e)))?;

        Ok(())
    }

    fn decode(row: &PgRow) -> Result<D, DomainError> {
        let data: Value = row.get("data");
        serde_json::from_value(data)
            .map_err(|e| DomainError::storage(format!("Failed to deserialize document: {}", e)))
    }

    fn encode(document: &D) -> Result<Value, DomainError> {
        serde_json::to_value(document)
            .map_err(|e| DomainError::storage(format!("Failed to serialize document: {}", e)))
    }
}

#[async_trait]
impl<D> DocumentStore<D> for PostgresDocumentStore<D>
where
    D: Document + 'static,
{
    async fn get(&self, key: &D::Key) -> Result<Option<D>, DomainError> {
        let query = format!("SELECT data FROM {} WHERE key = $1", self.collection);

        let row = sqlx::query(&query)
            .bind(key.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get document: {}", e)))?;

        row.as_ref().map(Self::decode).transpose()
    }

    async fn find_all(&self) -> Result<Vec<D>, DomainError> {
        let query = format!("SELECT data FROM {} ORDER BY created_at", self.collection);

        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to list documents: {}", e)))?;

        rows.iter().map(Self::decode).collect()
    }

    async fn find_by_field(&self, field: &str, value: &Value) -> Result<Vec<D>, DomainError> {
        let query = format!(
            "SELECT data FROM {} WHERE data -> $1 = $2 ORDER BY created_at",
            self.collection
        );

        let rows = sqlx::query(&query)
            .bind(field)
            .bind(value)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to query documents: {}", e)))?;

        rows.iter().map(Self::decode).collect()
    }

    async fn insert(&self, document: D) -> Result<D, DomainError> {
        let key = document.key().as_str().to_string();
        let data = Self::encode(&document)?;

        let query = format!(
            "INSERT INTO {} (key, data) VALUES ($1, $2)",
            self.collection
        );

        sqlx::query(&query)
            .bind(&key)
            .bind(&data)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if e.to_string().contains("duplicate key") {
                    DomainError::conflict(format!("Document with key '{}' already exists", key))
                } else {
                    DomainError::storage(format!("Failed to insert document: {}", e))
                }
            })?;

        Ok(document)
    }

    async fn update(&self, document: D) -> Result<D, DomainError> {
        let key = document.key().as_str().to_string();
        let data = Self::encode(&document)?;

        let query = format!(
            "UPDATE {} SET data = $2, updated_at = NOW() WHERE key = $1",
            self.collection
        );

        let result = sqlx::query(&query)
            .bind(&key)
            .bind(&data)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to update document: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!(
                "Document with key '{}' not found",
                key
            )));
        }

        Ok(document)
    }

    async fn ping(&self) -> Result<(), DomainError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Database unreachable: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_postgres_config_default() {
        let config = PostgresConfig::default();

        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 1);
        assert_eq!(config.connect_timeout_secs, 30);
        assert_eq!(config.idle_timeout_secs, 600);
    }

    #[test]
    fn test_postgres_config_builder() {
        let config = PostgresConfig::new("postgres://localhost/accounts_test")
            .with_max_connections(20);

        assert_eq!(config.url, "postgres://localhost/accounts_test");
        assert_eq!(config.max_connections, 20);
        assert_eq!(config.connect_timeout_secs, 30);
    }
}
