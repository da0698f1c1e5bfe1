//! Storage provider trait for blob backends.

use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;

use crate::result::AppResult;

/// A byte stream used for reading and writing blob contents.
///
/// The lifetime lets callers hand over streams that borrow request state
/// (a multipart field, for instance) without buffering them first.
pub type ByteStream<'a> = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send + 'a>>;

/// Trait for blob storage backends.
///
/// All paths are relative to the provider's root. The local filesystem
/// implementation lives in `mycloud-storage`.
#[async_trait]
pub trait StorageProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "local").
    fn provider_type(&self) -> &str;

    /// Check whether the provider is healthy and reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Open a blob for streaming reads.
    async fn read(&self, path: &str) -> AppResult<ByteStream<'static>>;

    /// Stream bytes into a blob, creating parent directories.
    ///
    /// Fails with a validation error once more than `max_bytes` have been
    /// received; the partial blob is removed in that case. Returns the
    /// number of bytes written.
    async fn write_stream<'a>(
        &self,
        path: &str,
        stream: ByteStream<'a>,
        max_bytes: u64,
    ) -> AppResult<u64>;

    /// Delete a blob. A missing blob is not an error.
    async fn delete(&self, path: &str) -> AppResult<()>;

    /// Size in bytes as reported by the backend.
    async fn size(&self, path: &str) -> AppResult<u64>;

    /// Check whether a blob or directory exists.
    async fn exists(&self, path: &str) -> AppResult<bool>;

    /// Create a directory (and any missing parents).
    async fn create_dir(&self, path: &str) -> AppResult<()>;
}
