//! Blob store providers.

pub mod memory;
pub mod remote;

use std::sync::Arc;

use stashbox_core::config::MediaStoreConfig;
use stashbox_core::error::AppError;
use stashbox_core::traits::BlobStore;

/// Construct the configured blob store provider.
pub fn build_provider(config: &MediaStoreConfig) -> Result<Arc<dyn BlobStore>, AppError> {
    match config.provider.as_str() {
        "remote" => Ok(Arc::new(remote::RemoteMediaStore::new(config)?)),
        "memory" => Ok(Arc::new(memory::MemoryBlobStore::new())),
        other => Err(AppError::configuration(format!(
            "Unknown media store provider '{other}'"
        ))),
    }
}
