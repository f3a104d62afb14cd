//! Single-file operations.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use stashbox_core::error::AppError;
use stashbox_core::result::AppResult;
use stashbox_core::traits::BlobStore;
use stashbox_database::repositories::{FileStore, FolderStore};
use stashbox_entity::file::StoredFile;
use stashbox_storage::url::attachment_url;

use crate::context::RequestContext;
use crate::file::upload::validate_file_name;

/// File business logic.
///
/// Ownership is checked through the containing folder; a file is only
/// reachable by the user who owns the folder it lives in.
#[derive(Debug, Clone)]
pub struct FileService {
    files: Arc<dyn FileStore>,
    folders: Arc<dyn FolderStore>,
    blobs: Arc<dyn BlobStore>,
}

impl FileService {
    /// Creates a new file service.
    pub fn new(
        files: Arc<dyn FileStore>,
        folders: Arc<dyn FolderStore>,
        blobs: Arc<dyn BlobStore>,
    ) -> Self {
        Self {
            files,
            folders,
            blobs,
        }
    }

    /// Returns a file's metadata.
    pub async fn get_file(&self, ctx: &RequestContext, id: Uuid) -> AppResult<StoredFile> {
        self.resolve_owned(ctx, id).await
    }

    /// Renames a file.
    pub async fn rename_file(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        new_name: &str,
    ) -> AppResult<StoredFile> {
        let new_name = validate_file_name(new_name)?;
        let file = self.resolve_owned(ctx, id).await?;

        if let Some(existing) = self.files.find_by_name(file.folder_id, new_name).await? {
            if existing.id != file.id {
                return Err(AppError::conflict(format!(
                    "A file named '{new_name}' already exists in this folder"
                )));
            }
        }

        self.files.rename(file.id, new_name).await
    }

    /// Deletes a single file, blob first.
    ///
    /// If the blob delete fails the record is kept so the deletion can
    /// be retried from the UI.
    pub async fn delete_file(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        let file = self.resolve_owned(ctx, id).await?;

        self.blobs.delete(&file.public_id).await?;
        self.files.delete(file.id).await?;

        info!(file_id = %file.id, public_id = %file.public_id, "File deleted");
        Ok(())
    }

    /// Returns the URL the browser should use to download the file as
    /// an attachment.
    pub async fn download_url(&self, ctx: &RequestContext, id: Uuid) -> AppResult<String> {
        let file = self.resolve_owned(ctx, id).await?;
        Ok(attachment_url(&file.url))
    }

    async fn resolve_owned(&self, ctx: &RequestContext, id: Uuid) -> AppResult<StoredFile> {
        let file = self
            .files
            .find(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("File {id} not found")))?;

        let folder = self
            .folders
            .find(file.folder_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("File {id} not found")))?;

        if folder.user_id != ctx.user_id {
            return Err(AppError::authorization(
                "You do not have access to this file",
            ));
        }

        Ok(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{InMemoryTree, RecordingBlobStore};
    use stashbox_core::error::ErrorKind;

    fn service(tree: &Arc<InMemoryTree>, blobs: &Arc<RecordingBlobStore>) -> FileService {
        FileService::new(
            Arc::clone(tree) as Arc<dyn FileStore>,
            Arc::clone(tree) as Arc<dyn FolderStore>,
            Arc::clone(blobs) as Arc<dyn BlobStore>,
        )
    }

    fn ctx_for(user_id: Uuid) -> RequestContext {
        RequestContext::new(user_id, Uuid::new_v4())
    }

    #[tokio::test]
    async fn delete_purges_blob_then_record() {
        let tree = Arc::new(InMemoryTree::new());
        let blobs = Arc::new(RecordingBlobStore::new());
        let user = Uuid::new_v4();

        let folder = tree.add_folder(user, None, "home");
        let file = tree.add_file(folder.id, "a.png", "pub-a");

        let svc = service(&tree, &blobs);
        svc.delete_file(&ctx_for(user), file.id).await.unwrap();

        assert!(!tree.file_exists(file.id));
        assert_eq!(blobs.deleted_ids(), vec!["pub-a".to_string()]);
    }

    #[tokio::test]
    async fn delete_keeps_record_when_blob_delete_fails() {
        let tree = Arc::new(InMemoryTree::new());
        let blobs = Arc::new(RecordingBlobStore::new());
        let user = Uuid::new_v4();

        let folder = tree.add_folder(user, None, "home");
        let file = tree.add_file(folder.id, "a.png", "pub-a");
        blobs.fail_delete_of("pub-a");

        let svc = service(&tree, &blobs);
        let err = svc.delete_file(&ctx_for(user), file.id).await.unwrap_err();

        assert_eq!(err.kind, ErrorKind::RemoteStore);
        assert!(tree.file_exists(file.id));
    }

    #[tokio::test]
    async fn files_are_invisible_to_other_users() {
        let tree = Arc::new(InMemoryTree::new());
        let blobs = Arc::new(RecordingBlobStore::new());
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        let folder = tree.add_folder(alice, None, "home");
        let file = tree.add_file(folder.id, "a.png", "pub-a");

        let svc = service(&tree, &blobs);
        let err = svc.get_file(&ctx_for(bob), file.id).await.unwrap_err();

        assert_eq!(err.kind, ErrorKind::Authorization);
    }

    #[tokio::test]
    async fn rename_rejects_duplicate_names_in_folder() {
        let tree = Arc::new(InMemoryTree::new());
        let blobs = Arc::new(RecordingBlobStore::new());
        let user = Uuid::new_v4();

        let folder = tree.add_folder(user, None, "home");
        tree.add_file(folder.id, "a.png", "pub-a");
        let other = tree.add_file(folder.id, "b.png", "pub-b");

        let svc = service(&tree, &blobs);
        let err = svc
            .rename_file(&ctx_for(user), other.id, "a.png")
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn download_url_points_at_the_attachment_variant() {
        let tree = Arc::new(InMemoryTree::new());
        let blobs = Arc::new(RecordingBlobStore::new());
        let user = Uuid::new_v4();

        let folder = tree.add_folder(user, None, "home");
        let file = tree.add_file(folder.id, "a.png", "pub-a");

        let svc = service(&tree, &blobs);
        let url = svc.download_url(&ctx_for(user), file.id).await.unwrap();

        assert!(url.contains("/blobs/attachment/"));
    }
}
