//! In-memory implementation of both store traits.
//!
//! All state sits behind a single `RwLock`, so every mutation (token
//! rotation included) is one critical section.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use mycloud_core::error::AppError;
use mycloud_core::result::AppResult;
use mycloud_entity::file::{CreateStoredFile, StoredFile, UpdateFileDetails};
use mycloud_entity::user::{User, UserRole};

use crate::store::{FileStore, UserStore};

#[derive(Debug, Default)]
struct State {
    files: HashMap<Uuid, StoredFile>,
    /// public token -> file id
    tokens: HashMap<String, Uuid>,
    users: HashMap<Uuid, User>,
}

/// Metadata store kept entirely in process memory.
///
/// Cloning shares the underlying state.
#[derive(Debug, Clone, Default)]
pub struct MemoryMetadataStore {
    state: Arc<RwLock<State>>,
}

impl MemoryMetadataStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first(files: &mut [StoredFile]) {
    files.sort_by(|a, b| {
        b.uploaded_at
            .cmp(&a.uploaded_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}

fn missing(id: Uuid) -> AppError {
    AppError::not_found(format!("File {id} not found"))
}

#[async_trait]
impl FileStore for MemoryMetadataStore {
    async fn create(&self, data: CreateStoredFile) -> AppResult<StoredFile> {
        let mut state = self.state.write().await;
        if !state.users.contains_key(&data.owner_id) {
            return Err(AppError::validation(format!(
                "Owner {} is not registered",
                data.owner_id
            )));
        }
        if state.files.values().any(|f| f.disk_name == data.disk_name) {
            return Err(AppError::conflict("Failed to create file record: duplicate value"));
        }

        let file = StoredFile {
            id: Uuid::new_v4(),
            owner_id: data.owner_id,
            original_name: data.original_name,
            disk_name: data.disk_name,
            rel_dir: data.rel_dir,
            size_bytes: data.size_bytes,
            uploaded_at: Utc::now(),
            last_downloaded_at: None,
            comment: data.comment,
            public_token: None,
        };
        state.files.insert(file.id, file.clone());
        Ok(file)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<StoredFile>> {
        Ok(self.state.read().await.files.get(&id).cloned())
    }

    async fn find_by_token(&self, token: &str) -> AppResult<Option<StoredFile>> {
        let state = self.state.read().await;
        Ok(state
            .tokens
            .get(token)
            .and_then(|id| state.files.get(id))
            .cloned())
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<StoredFile>> {
        let state = self.state.read().await;
        let mut files: Vec<StoredFile> = state
            .files
            .values()
            .filter(|f| f.owner_id == owner_id)
            .cloned()
            .collect();
        newest_first(&mut files);
        Ok(files)
    }

    async fn list_all(&self) -> AppResult<Vec<StoredFile>> {
        let state = self.state.read().await;
        let mut files: Vec<StoredFile> = state.files.values().cloned().collect();
        newest_first(&mut files);
        Ok(files)
    }

    async fn update_details(&self, id: Uuid, changes: UpdateFileDetails) -> AppResult<StoredFile> {
        let mut state = self.state.write().await;
        let file = state.files.get_mut(&id).ok_or_else(|| missing(id))?;
        if let Some(name) = changes.original_name {
            file.original_name = name;
        }
        if let Some(comment) = changes.comment {
            file.comment = comment;
        }
        Ok(file.clone())
    }

    async fn set_size(&self, id: Uuid, size_bytes: i64) -> AppResult<()> {
        if let Some(file) = self.state.write().await.files.get_mut(&id) {
            file.size_bytes = size_bytes;
        }
        Ok(())
    }

    async fn touch_downloaded(&self, id: Uuid) -> AppResult<()> {
        if let Some(file) = self.state.write().await.files.get_mut(&id) {
            file.last_downloaded_at = Some(Utc::now());
        }
        Ok(())
    }

    async fn set_public_token(&self, id: Uuid, token: Option<String>) -> AppResult<StoredFile> {
        let mut state = self.state.write().await;
        let State { files, tokens, .. } = &mut *state;

        let file = files.get_mut(&id).ok_or_else(|| missing(id))?;
        if let Some(new) = &token {
            if tokens.get(new).is_some_and(|owner| *owner != id) {
                return Err(AppError::conflict(
                    "Failed to update public token: duplicate value",
                ));
            }
        }

        if let Some(old) = file.public_token.take() {
            tokens.remove(&old);
        }
        if let Some(new) = &token {
            tokens.insert(new.clone(), id);
        }
        file.public_token = token;
        Ok(file.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut state = self.state.write().await;
        match state.files.remove(&id) {
            Some(file) => {
                if let Some(token) = file.public_token {
                    state.tokens.remove(&token);
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl UserStore for MemoryMetadataStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.state.read().await.users.get(&id).cloned())
    }

    async fn ensure(&self, id: Uuid, username: &str, role: UserRole) -> AppResult<User> {
        let mut state = self.state.write().await;
        let user = state.users.entry(id).or_insert_with(|| User {
            id,
            username: username.to_string(),
            role,
            storage_rel_path: None,
            created_at: Utc::now(),
        });
        user.username = username.to_string();
        user.role = role;
        Ok(user.clone())
    }

    async fn assign_storage_path(&self, id: Uuid, rel_path: &str) -> AppResult<String> {
        let mut state = self.state.write().await;
        let user = state
            .users
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))?;
        Ok(user
            .storage_rel_path
            .get_or_insert_with(|| rel_path.to_string())
            .clone())
    }
}
