//! Metadata store that dispatches to the configured provider.

use std::sync::Arc;

use tracing::info;

use mycloud_core::config::DatabaseConfig;
use mycloud_core::error::AppError;
use mycloud_core::result::AppResult;

use crate::connection::DatabasePool;
use crate::memory::MemoryMetadataStore;
use crate::repositories::{PgFileRepository, PgUserRepository};
use crate::store::{FileStore, UserStore};

/// Handles to the file and user stores of one provider.
///
/// The provider is selected at construction time based on configuration.
#[derive(Debug, Clone)]
pub struct MetadataStore {
    files: Arc<dyn FileStore>,
    users: Arc<dyn UserStore>,
    pool: Option<DatabasePool>,
}

impl MetadataStore {
    /// Create a metadata store from configuration.
    pub async fn new(config: &DatabaseConfig) -> AppResult<Self> {
        match config.provider.as_str() {
            "postgres" => {
                info!("Initializing PostgreSQL metadata store");
                let pool = DatabasePool::connect(config).await?;
                if config.run_migrations {
                    crate::migration::run_migrations(pool.pool()).await?;
                }
                Ok(Self {
                    files: Arc::new(PgFileRepository::new(pool.pool().clone())),
                    users: Arc::new(PgUserRepository::new(pool.pool().clone())),
                    pool: Some(pool),
                })
            }
            "memory" => {
                info!("Initializing in-memory metadata store");
                Ok(Self::in_memory())
            }
            other => Err(AppError::configuration(format!(
                "Unknown database provider: '{other}'. Supported: memory, postgres"
            ))),
        }
    }

    /// A fresh in-memory store (also used by tests).
    pub fn in_memory() -> Self {
        let store = MemoryMetadataStore::new();
        Self {
            files: Arc::new(store.clone()),
            users: Arc::new(store),
            pool: None,
        }
    }

    /// File record store.
    pub fn files(&self) -> Arc<dyn FileStore> {
        Arc::clone(&self.files)
    }

    /// User store.
    pub fn users(&self) -> Arc<dyn UserStore> {
        Arc::clone(&self.users)
    }

    /// Check backend connectivity. The memory provider is always healthy.
    pub async fn health_check(&self) -> AppResult<bool> {
        match &self.pool {
            Some(pool) => pool.health_check().await,
            None => Ok(true),
        }
    }

    /// Release backend resources.
    pub async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
        }
    }
}
