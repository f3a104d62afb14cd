//! # stashbox-storage
//!
//! Blob store implementations for Stashbox: the HTTP media-host client
//! used in production and an in-memory provider for development and
//! tests, plus download-URL helpers.

pub mod providers;
pub mod url;

pub use providers::memory::MemoryBlobStore;
pub use providers::remote::RemoteMediaStore;
