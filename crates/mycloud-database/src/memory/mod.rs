//! In-memory metadata store.

mod store;

pub use store::MemoryMetadataStore;
