//! Account Service
//!
//! User accounts over HTTP:
//! - Registration with username/password format rules
//! - Lookup and listing
//! - Password verification and change
//! - In-memory or PostgreSQL document storage

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use crate::api::state::AppState;
use crate::config::StorageSettings;
use crate::domain::user::User;
use crate::infrastructure::storage::{PostgresConfig, StorageConfig, StorageFactory, StorageType};
use crate::infrastructure::user::{
    AccountService, BCRYPT_COST_RANGE, HasherKind, StorageUserRepository,
};

/// Create the application state from configuration
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let hasher_kind = HasherKind::parse(&config.security.hasher)
        .with_context(|| format!("Unknown password hasher '{}'", config.security.hasher))?;
    anyhow::ensure!(
        hasher_kind != HasherKind::Bcrypt || BCRYPT_COST_RANGE.contains(&config.security.bcrypt_cost),
        "security.bcrypt_cost must be between {} and {}, got {}",
        BCRYPT_COST_RANGE.start(),
        BCRYPT_COST_RANGE.end(),
        config.security.bcrypt_cost
    );
    let hasher = hasher_kind.build(config.security.bcrypt_cost);
    info!(hasher = ?hasher_kind, "Password hasher ready");

    let storage_config = storage_config(&config.storage)?;
    info!(backend = ?storage_config.storage_type(), "Initializing user store");

    let store = StorageFactory::create::<User>(&storage_config, &config.storage.collection)
        .await
        .context("Failed to initialize user store")?;

    let repository = Arc::new(StorageUserRepository::new(store));
    let account_service = Arc::new(AccountService::new(repository, hasher));

    Ok(AppState::new(account_service)
        .with_password_hash_exposed(config.api.expose_password_hash))
}

/// Resolve the storage backend settings
pub fn storage_config(settings: &StorageSettings) -> anyhow::Result<StorageConfig> {
    let backend = StorageType::parse(&settings.backend)
        .with_context(|| format!("Unknown storage backend '{}'", settings.backend))?;

    match backend {
        StorageType::InMemory => Ok(StorageConfig::in_memory()),
        StorageType::Postgres => {
            let url = settings
                .url
                .clone()
                .context("storage.url (or DATABASE_URL) is required for the postgres backend")?;

            Ok(StorageConfig::Postgres(
                PostgresConfig::new(url).with_max_connections(settings.max_connections),
            ))
        }
    }
}
