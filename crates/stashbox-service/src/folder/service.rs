//! Folder use cases: browsing, creation, rename, subtree deletion.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use stashbox_auth::password::CredentialPolicy;
use stashbox_core::error::AppError;
use stashbox_core::result::AppResult;
use stashbox_core::traits::BlobStore;
use stashbox_database::repositories::{FileStore, FolderStore};
use stashbox_entity::file::StoredFile;
use stashbox_entity::folder::{CreateFolder, Folder};

use crate::context::RequestContext;
use crate::folder::delete::{DeleteReport, SubtreeDeleter};

/// A folder together with its immediate children and files.
#[derive(Debug, Clone, Serialize)]
pub struct FolderContents {
    pub folder: Folder,
    pub children: Vec<Folder>,
    pub files: Vec<StoredFile>,
}

/// Folder business logic.
///
/// Every method takes a [`RequestContext`] and refuses to touch folders
/// the requesting user does not own.
#[derive(Debug, Clone)]
pub struct FolderService {
    folders: Arc<dyn FolderStore>,
    files: Arc<dyn FileStore>,
    policy: CredentialPolicy,
    deleter: SubtreeDeleter,
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(
        folders: Arc<dyn FolderStore>,
        files: Arc<dyn FileStore>,
        blobs: Arc<dyn BlobStore>,
        policy: CredentialPolicy,
        delete_concurrency: usize,
    ) -> Self {
        let deleter = SubtreeDeleter::new(
            Arc::clone(&folders),
            Arc::clone(&files),
            blobs,
            delete_concurrency,
        );
        Self {
            folders,
            files,
            policy,
            deleter,
        }
    }

    /// Returns the user's home folder with its contents.
    pub async fn home(&self, ctx: &RequestContext) -> AppResult<FolderContents> {
        let folder = self
            .folders
            .find_root(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Home folder not found"))?;
        self.contents(folder).await
    }

    /// Returns a folder with its contents.
    pub async fn get_folder(&self, ctx: &RequestContext, id: Uuid) -> AppResult<FolderContents> {
        let folder = self.resolve_owned(ctx, id).await?;
        self.contents(folder).await
    }

    /// Creates a folder under an existing parent owned by the user.
    ///
    /// Every folder created through this path has a parent; the single
    /// root per user is created at sign-up and never through the API.
    pub async fn create_folder(
        &self,
        ctx: &RequestContext,
        parent_id: Uuid,
        name: &str,
    ) -> AppResult<Folder> {
        self.policy.validate_name(name)?;
        let parent = self.resolve_owned(ctx, parent_id).await?;

        let folder = self
            .folders
            .create(&CreateFolder {
                user_id: ctx.user_id,
                parent_id: Some(parent.id),
                name: name.trim().to_string(),
            })
            .await?;

        info!(folder_id = %folder.id, parent_id = %parent.id, "Folder created");
        Ok(folder)
    }

    /// Renames a folder. Root folders cannot be renamed.
    pub async fn rename_folder(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        new_name: &str,
    ) -> AppResult<Folder> {
        self.policy.validate_name(new_name)?;
        let folder = self.resolve_owned(ctx, id).await?;
        if folder.is_root() {
            return Err(AppError::validation("The home folder cannot be renamed"));
        }
        self.folders.rename(folder.id, new_name.trim()).await
    }

    /// Deletes a folder and everything below it.
    ///
    /// Returns a [`DeleteReport`]; a report with failures means part of
    /// the subtree survived and the operation can be retried.
    pub async fn delete_folder(
        &self,
        ctx: &RequestContext,
        id: Uuid,
    ) -> AppResult<DeleteReport> {
        let folder = self.resolve_owned(ctx, id).await?;
        if folder.is_root() {
            return Err(AppError::validation("The home folder cannot be deleted"));
        }

        info!(folder_id = %folder.id, user_id = %ctx.user_id, "Starting subtree deletion");
        Ok(self.deleter.delete_subtree(folder).await)
    }

    async fn contents(&self, folder: Folder) -> AppResult<FolderContents> {
        let children = self.folders.children_of(folder.id).await?;
        let files = self.files.in_folder(folder.id).await?;
        Ok(FolderContents {
            folder,
            children,
            files,
        })
    }

    /// Loads a folder and checks it belongs to the requesting user.
    async fn resolve_owned(&self, ctx: &RequestContext, id: Uuid) -> AppResult<Folder> {
        let folder = self
            .folders
            .find(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))?;

        if folder.user_id != ctx.user_id {
            return Err(AppError::authorization(
                "You do not have access to this folder",
            ));
        }

        Ok(folder)
    }
}
