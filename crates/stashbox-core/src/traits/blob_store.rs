//! Blob store trait for the remote media host.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// The result of uploading a blob to the media host.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct StoredBlob {
    /// Public download URL for the blob.
    pub url: String,
    /// The media host's identifier for the blob, used for deletion.
    pub public_id: String,
    /// Size of the stored blob in bytes.
    pub size_bytes: i64,
}

/// Trait for remote blob storage backends.
///
/// The trait is defined here in `stashbox-core` and implemented in
/// `stashbox-storage` (HTTP media host, in-memory provider). File
/// content never touches the local database; records only reference
/// blobs by URL and public id.
#[async_trait]
pub trait BlobStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "remote", "memory").
    fn provider_type(&self) -> &str;

    /// Upload a blob and return its remote URL, public id, and size.
    async fn upload(&self, name: &str, data: Bytes) -> AppResult<StoredBlob>;

    /// Delete a blob by its public id.
    async fn delete(&self, public_id: &str) -> AppResult<()>;
}
