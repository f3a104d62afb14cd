//! File upload: push the blob to the media host, then record it.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{info, warn};
use uuid::Uuid;

use stashbox_core::error::AppError;
use stashbox_core::result::AppResult;
use stashbox_core::traits::BlobStore;
use stashbox_database::repositories::{FileStore, FolderStore};
use stashbox_entity::file::{CreateFile, StoredFile};

use crate::context::RequestContext;

/// Maximum length a file name may have, matching the schema column.
const FILE_NAME_MAX: usize = 255;

/// Checks a file display name, returning it trimmed.
///
/// File names come from uploaded filenames and are bounded by the
/// schema column, not the folder-name form rules.
pub(crate) fn validate_file_name(name: &str) -> AppResult<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() || trimmed.len() > FILE_NAME_MAX {
        return Err(AppError::validation(format!(
            "File name must be between 1 and {FILE_NAME_MAX} characters"
        )));
    }
    Ok(trimmed)
}

/// Upload orchestration.
///
/// The blob goes to the media host first; only then is the record
/// inserted. If the insert fails the blob is removed again so the media
/// host does not accumulate orphans.
#[derive(Debug, Clone)]
pub struct UploadService {
    files: Arc<dyn FileStore>,
    folders: Arc<dyn FolderStore>,
    blobs: Arc<dyn BlobStore>,
    max_size_bytes: usize,
}

impl UploadService {
    /// Creates a new upload service.
    pub fn new(
        files: Arc<dyn FileStore>,
        folders: Arc<dyn FolderStore>,
        blobs: Arc<dyn BlobStore>,
        max_size_bytes: usize,
    ) -> Self {
        Self {
            files,
            folders,
            blobs,
            max_size_bytes,
        }
    }

    /// Uploads a file into a folder owned by the requesting user.
    pub async fn upload(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
        file_name: &str,
        data: Bytes,
    ) -> AppResult<StoredFile> {
        let name = validate_file_name(file_name)?;

        if data.is_empty() {
            return Err(AppError::validation("Uploaded file is empty"));
        }
        if data.len() > self.max_size_bytes {
            return Err(AppError::validation(format!(
                "File exceeds the maximum upload size of {} bytes",
                self.max_size_bytes
            )));
        }

        let folder = self
            .folders
            .find(folder_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Folder {folder_id} not found")))?;
        if folder.user_id != ctx.user_id {
            return Err(AppError::authorization(
                "You do not have access to this folder",
            ));
        }

        if self.files.find_by_name(folder.id, name).await?.is_some() {
            return Err(AppError::conflict(format!(
                "A file named '{name}' already exists in this folder"
            )));
        }

        let size = data.len() as i64;
        let blob = self.blobs.upload(name, data).await?;

        let create = CreateFile {
            folder_id: folder.id,
            name: name.to_string(),
            url: blob.url.clone(),
            public_id: blob.public_id.clone(),
            size_bytes: size,
        };

        match self.files.create(&create).await {
            Ok(file) => {
                info!(
                    file_id = %file.id,
                    folder_id = %folder.id,
                    size_bytes = size,
                    "File uploaded"
                );
                Ok(file)
            }
            Err(err) => {
                // Best effort; a leftover blob is better than a record
                // pointing at nothing.
                if let Err(cleanup_err) = self.blobs.delete(&blob.public_id).await {
                    warn!(
                        public_id = %blob.public_id,
                        error = %cleanup_err,
                        "Failed to clean up blob after record insert failure"
                    );
                }
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{InMemoryTree, RecordingBlobStore};
    use stashbox_core::error::ErrorKind;

    fn service(tree: &Arc<InMemoryTree>, blobs: &Arc<RecordingBlobStore>) -> UploadService {
        UploadService::new(
            Arc::clone(tree) as Arc<dyn FileStore>,
            Arc::clone(tree) as Arc<dyn FolderStore>,
            Arc::clone(blobs) as Arc<dyn BlobStore>,
            1024,
        )
    }

    fn ctx_for(user_id: Uuid) -> RequestContext {
        RequestContext::new(user_id, Uuid::new_v4())
    }

    #[tokio::test]
    async fn upload_stores_blob_and_record() {
        let tree = Arc::new(InMemoryTree::new());
        let blobs = Arc::new(RecordingBlobStore::new());
        let user = Uuid::new_v4();
        let folder = tree.add_folder(user, None, "home");

        let svc = service(&tree, &blobs);
        let file = svc
            .upload(&ctx_for(user), folder.id, "notes.txt", Bytes::from("hi"))
            .await
            .unwrap();

        assert_eq!(file.name, "notes.txt");
        assert_eq!(file.size_bytes, 2);
        assert!(tree.file_exists(file.id));
        assert_eq!(blobs.uploaded.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn upload_rejects_oversize_payloads() {
        let tree = Arc::new(InMemoryTree::new());
        let blobs = Arc::new(RecordingBlobStore::new());
        let user = Uuid::new_v4();
        let folder = tree.add_folder(user, None, "home");

        let svc = service(&tree, &blobs);
        let err = svc
            .upload(
                &ctx_for(user),
                folder.id,
                "big.bin",
                Bytes::from(vec![0u8; 2048]),
            )
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(blobs.uploaded.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn upload_rejects_duplicate_names() {
        let tree = Arc::new(InMemoryTree::new());
        let blobs = Arc::new(RecordingBlobStore::new());
        let user = Uuid::new_v4();
        let folder = tree.add_folder(user, None, "home");
        tree.add_file(folder.id, "notes.txt", "pub-n");

        let svc = service(&tree, &blobs);
        let err = svc
            .upload(&ctx_for(user), folder.id, "notes.txt", Bytes::from("hi"))
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::Conflict);
        assert!(blobs.uploaded.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn upload_into_foreign_folder_is_denied() {
        let tree = Arc::new(InMemoryTree::new());
        let blobs = Arc::new(RecordingBlobStore::new());
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let folder = tree.add_folder(alice, None, "home");

        let svc = service(&tree, &blobs);
        let err = svc
            .upload(&ctx_for(bob), folder.id, "notes.txt", Bytes::from("hi"))
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::Authorization);
    }

    #[tokio::test]
    async fn failed_record_insert_cleans_up_the_blob() {
        let tree = Arc::new(InMemoryTree::new());
        let blobs = Arc::new(RecordingBlobStore::new());
        let user = Uuid::new_v4();
        let folder = tree.add_folder(user, None, "home");
        tree.fail_next_create_file();

        let svc = service(&tree, &blobs);
        let err = svc
            .upload(&ctx_for(user), folder.id, "notes.txt", Bytes::from("hi"))
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::Database);
        let uploaded = blobs.uploaded.lock().unwrap().clone();
        assert_eq!(uploaded.len(), 1);
        assert_eq!(blobs.deleted_ids(), uploaded);
        assert_eq!(tree.file_count(), 0);
    }
}
