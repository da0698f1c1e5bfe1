//! File use cases.

pub mod download;
pub mod service;
pub mod upload;

pub use download::{DownloadResult, DownloadService};
pub use service::{FileService, UpdateFileRequest};
pub use upload::{UploadParams, UploadService};
