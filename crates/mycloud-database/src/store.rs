//! Metadata store traits.
//!
//! Both the PostgreSQL repositories and the in-memory store implement
//! these; services only ever see `Arc<dyn FileStore>` / `Arc<dyn UserStore>`.

use async_trait::async_trait;
use uuid::Uuid;

use mycloud_core::result::AppResult;
use mycloud_entity::file::{CreateStoredFile, StoredFile, UpdateFileDetails};
use mycloud_entity::user::{User, UserRole};

/// Persistence for [`StoredFile`] records.
#[async_trait]
pub trait FileStore: Send + Sync + std::fmt::Debug + 'static {
    /// Insert a new record. `uploaded_at` is set to now.
    async fn create(&self, data: CreateStoredFile) -> AppResult<StoredFile>;

    /// Find a record by ID.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<StoredFile>>;

    /// Find the record currently published under `token` (exact match).
    async fn find_by_token(&self, token: &str) -> AppResult<Option<StoredFile>>;

    /// Records owned by `owner_id`, newest first.
    async fn list_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<StoredFile>>;

    /// Every record, newest first.
    async fn list_all(&self) -> AppResult<Vec<StoredFile>>;

    /// Update the display name and/or comment.
    async fn update_details(&self, id: Uuid, changes: UpdateFileDetails) -> AppResult<StoredFile>;

    /// Replace the recorded size.
    async fn set_size(&self, id: Uuid, size_bytes: i64) -> AppResult<()>;

    /// Stamp `last_downloaded_at` with the current time.
    async fn touch_downloaded(&self, id: Uuid) -> AppResult<()>;

    /// Set or clear the public token in one atomic step.
    async fn set_public_token(&self, id: Uuid, token: Option<String>) -> AppResult<StoredFile>;

    /// Remove a record. Returns whether anything was removed.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

/// Persistence for [`User`] rows.
#[async_trait]
pub trait UserStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a user by ID.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Insert the user, or refresh username and role if already known.
    async fn ensure(&self, id: Uuid, username: &str, role: UserRole) -> AppResult<User>;

    /// Record the user's storage directory if none is set yet, returning
    /// whichever value is in effect afterwards.
    async fn assign_storage_path(&self, id: Uuid, rel_path: &str) -> AppResult<String>;
}
