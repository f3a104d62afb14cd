//! In-memory blob store for development and tests.

use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;
use uuid::Uuid;

use stashbox_core::error::AppError;
use stashbox_core::result::AppResult;
use stashbox_core::traits::{BlobStore, StoredBlob};

/// Blob store that keeps all content in process memory.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: DashMap<String, Bytes>,
}

impl MemoryBlobStore {
    /// Create an empty in-memory blob store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of blobs currently held.
    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    /// Whether the store holds no blobs.
    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }

    /// Fetch a blob's content by public id.
    pub fn get(&self, public_id: &str) -> Option<Bytes> {
        self.blobs.get(public_id).map(|entry| entry.clone())
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    fn provider_type(&self) -> &str {
        "memory"
    }

    async fn upload(&self, name: &str, data: Bytes) -> AppResult<StoredBlob> {
        let public_id = format!("mem/{}", Uuid::new_v4());
        let size_bytes = data.len() as i64;
        self.blobs.insert(public_id.clone(), data);

        Ok(StoredBlob {
            url: format!("memory://blobs/{public_id}/{name}"),
            public_id,
            size_bytes,
        })
    }

    async fn delete(&self, public_id: &str) -> AppResult<()> {
        self.blobs
            .remove(public_id)
            .map(|_| ())
            .ok_or_else(|| AppError::remote_store(format!("Blob '{public_id}' not found")))
    }
}
