//! Trait seams implemented by other crates.

pub mod blob_store;

pub use blob_store::{BlobStore, StoredBlob};
