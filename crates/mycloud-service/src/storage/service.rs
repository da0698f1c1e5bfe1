//! Per-user storage directory management.

use std::sync::Arc;

use tracing::{debug, info};

use mycloud_core::error::AppError;
use mycloud_core::traits::storage::StorageProvider;
use mycloud_database::UserStore;
use mycloud_storage::PathAllocator;

use crate::context::RequestContext;

/// Resolves (and on first use, assigns) each user's storage root.
#[derive(Debug, Clone)]
pub struct StorageService {
    /// User store.
    users: Arc<dyn UserStore>,
    /// Blob storage.
    storage: Arc<dyn StorageProvider>,
    /// Path derivation rules.
    allocator: PathAllocator,
}

impl StorageService {
    /// Creates a new storage service.
    pub fn new(
        users: Arc<dyn UserStore>,
        storage: Arc<dyn StorageProvider>,
        allocator: PathAllocator,
    ) -> Self {
        Self {
            users,
            storage,
            allocator,
        }
    }

    /// Register the caller if needed and return their storage root,
    /// relative to the storage root directory. The directory exists when
    /// this returns.
    ///
    /// The first call for a user persists the derived path; concurrent
    /// first calls converge on whichever value was stored first.
    pub async fn ensure_user_root(&self, ctx: &RequestContext) -> Result<String, AppError> {
        let user = self
            .users
            .ensure(ctx.user_id, &ctx.username, ctx.role)
            .await?;

        let rel = match user.storage_rel_path {
            Some(rel) => rel,
            None => {
                let derived = self.allocator.user_root(user.id, &user.username);
                let assigned = self.users.assign_storage_path(user.id, &derived).await?;
                info!(user_id = %user.id, storage_rel_path = %assigned, "Assigned user storage root");
                assigned
            }
        };

        self.storage.create_dir(&rel).await?;
        debug!(user_id = %user.id, storage_rel_path = %rel, "User storage root ready");
        Ok(rel)
    }
}
