//! HTTP client for the remote media host.

use async_trait::async_trait;
use bytes::Bytes;
use serde::Deserialize;
use tracing::debug;

use stashbox_core::config::MediaStoreConfig;
use stashbox_core::error::AppError;
use stashbox_core::result::AppResult;
use stashbox_core::traits::{BlobStore, StoredBlob};

/// Blob store backed by the remote media host's REST API.
///
/// Uploads are multipart POSTs; deletion is a DELETE by public id. The
/// host's URL scheme is treated as opaque apart from the attachment
/// rewrite in [`crate::url`].
#[derive(Debug, Clone)]
pub struct RemoteMediaStore {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    api_secret: String,
}

/// Response body returned by the media host on upload.
#[derive(Debug, Deserialize)]
struct UploadResponse {
    url: String,
    public_id: String,
    bytes: i64,
}

impl RemoteMediaStore {
    /// Create a new media host client from configuration.
    pub fn new(config: &MediaStoreConfig) -> Result<Self, AppError> {
        if config.base_url.is_empty() {
            return Err(AppError::configuration(
                "media_store.base_url is required for the remote provider",
            ));
        }

        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
        })
    }
}

#[async_trait]
impl BlobStore for RemoteMediaStore {
    fn provider_type(&self) -> &str {
        "remote"
    }

    async fn upload(&self, name: &str, data: Bytes) -> AppResult<StoredBlob> {
        let part = reqwest::multipart::Part::stream(data).file_name(name.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(format!("{}/v1/blobs", self.base_url))
            .basic_auth(&self.api_key, Some(&self.api_secret))
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    stashbox_core::error::ErrorKind::RemoteStore,
                    format!("Blob upload request failed: {e}"),
                    e,
                )
            })?;

        if !response.status().is_success() {
            return Err(AppError::remote_store(format!(
                "Blob upload rejected with status {}",
                response.status()
            )));
        }

        let body: UploadResponse = response.json().await.map_err(|e| {
            AppError::with_source(
                stashbox_core::error::ErrorKind::RemoteStore,
                format!("Malformed upload response: {e}"),
                e,
            )
        })?;

        debug!(public_id = %body.public_id, bytes = body.bytes, "Blob uploaded");

        Ok(StoredBlob {
            url: body.url,
            public_id: body.public_id,
            size_bytes: body.bytes,
        })
    }

    async fn delete(&self, public_id: &str) -> AppResult<()> {
        let response = self
            .client
            .delete(format!("{}/v1/blobs/{public_id}", self.base_url))
            .basic_auth(&self.api_key, Some(&self.api_secret))
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    stashbox_core::error::ErrorKind::RemoteStore,
                    format!("Blob delete request failed: {e}"),
                    e,
                )
            })?;

        // An already-absent blob is a successful delete.
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            debug!(public_id, "Blob already absent on delete");
            return Ok(());
        }

        if !response.status().is_success() {
            return Err(AppError::remote_store(format!(
                "Blob delete rejected with status {}",
                response.status()
            )));
        }

        Ok(())
    }
}
