//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use mycloud_auth::jwt::JwtDecoder;
use mycloud_core::config::AppConfig;
use mycloud_core::result::AppResult;
use mycloud_core::traits::storage::StorageProvider;
use mycloud_database::MetadataStore;
use mycloud_service::{
    DownloadService, FileService, ShareService, StorageService, UploadService,
};
use mycloud_storage::{LocalStorageProvider, PathAllocator};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// Metadata store (PostgreSQL or in-memory)
    pub metadata: MetadataStore,
    /// Blob storage provider
    pub storage: Arc<dyn StorageProvider>,

    // ── Auth ─────────────────────────────────────────────────
    /// JWT token decoder and validator
    pub jwt_decoder: Arc<JwtDecoder>,

    // ── Services ─────────────────────────────────────────────
    /// File listing and mutation
    pub file_service: Arc<FileService>,
    /// Streaming uploads
    pub upload_service: Arc<UploadService>,
    /// Authenticated and public downloads
    pub download_service: Arc<DownloadService>,
    /// Public link issue and revoke
    pub share_service: Arc<ShareService>,
}

impl AppState {
    /// Connect the configured backends and wire every service.
    pub async fn build(config: AppConfig) -> AppResult<Self> {
        let metadata = MetadataStore::new(&config.database).await?;
        let storage: Arc<dyn StorageProvider> =
            Arc::new(LocalStorageProvider::new(&config.storage.root_path).await?);
        Ok(Self::from_parts(config, metadata, storage))
    }

    /// Wire services on top of already constructed backends.
    pub fn from_parts(
        config: AppConfig,
        metadata: MetadataStore,
        storage: Arc<dyn StorageProvider>,
    ) -> Self {
        let allocator = PathAllocator::new(config.storage.user_dir_scheme);
        let roots = Arc::new(StorageService::new(
            metadata.users(),
            storage.clone(),
            allocator,
        ));

        let upload_service = Arc::new(UploadService::new(
            metadata.files(),
            storage.clone(),
            roots,
            allocator,
            config.storage.max_upload_bytes(),
        ));
        let file_service = Arc::new(FileService::new(metadata.files(), storage.clone()));
        let download_service = Arc::new(DownloadService::new(metadata.files(), storage.clone()));
        let share_service = Arc::new(ShareService::new(
            metadata.files(),
            config.server.public_base_url.clone(),
        ));
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));

        Self {
            config: Arc::new(config),
            metadata,
            storage,
            jwt_decoder,
            file_service,
            upload_service,
            download_service,
            share_service,
        }
    }
}
