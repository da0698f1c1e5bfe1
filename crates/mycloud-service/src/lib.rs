//! # mycloud-service
//!
//! Business logic service layer for MyCloud. Each service orchestrates
//! the metadata store, the blob storage provider, and the access guard to
//! implement one group of use cases.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references.

pub mod context;
pub mod file;
pub mod share;
pub mod storage;


pub use context::RequestContext;
pub use file::{DownloadResult, DownloadService, FileService, UploadParams, UploadService};
pub use share::{LinkService, ShareService};
pub use storage::StorageService;
