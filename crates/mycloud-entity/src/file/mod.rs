//! Stored file entities.

pub mod model;
pub mod name;

pub use model::{CreateStoredFile, MAX_COMMENT_CHARS, StoredFile, UpdateFileDetails};
pub use name::keep_extension;
