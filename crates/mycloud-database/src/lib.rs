//! # mycloud-database
//!
//! The metadata store: trait definitions for file and user records,
//! PostgreSQL repositories, an in-memory implementation, and the
//! [`MetadataStore`] that selects one from configuration.

pub mod connection;
pub mod manager;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use manager::MetadataStore;
pub use memory::MemoryMetadataStore;
pub use store::{FileStore, UserStore};
