//! # mycloud-storage
//!
//! Blob storage for MyCloud: the [`PathAllocator`] that decides where a
//! user's files live, and the local filesystem [`LocalStorageProvider`]
//! that writes and reads them.

pub mod allocator;
pub mod providers;

pub use allocator::PathAllocator;
pub use providers::LocalStorageProvider;
