//! Subtree deletion walk.
//!
//! Removes a folder, every descendant folder, and every file contained
//! anywhere in that subtree, purging each file's blob from the remote
//! store. The walk uses an explicit worklist instead of call-stack
//! recursion and deletes strictly bottom-up per branch: a folder row is
//! only removed after all of its files and child subtrees are gone.
//!
//! Failures never abort the walk. Each failed node is recorded in the
//! [`DeleteReport`] and the walk continues into sibling branches; a
//! folder whose contents could not be fully removed is left in place
//! (together with its ancestors) so the user can retry.

use std::collections::HashSet;
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use stashbox_core::error::{AppError, ErrorKind};
use stashbox_core::traits::BlobStore;
use stashbox_database::repositories::{FileStore, FolderStore};
use stashbox_entity::file::StoredFile;
use stashbox_entity::folder::Folder;

/// Which step of the walk a failure occurred in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteStage {
    /// Listing a folder's child folders failed.
    ListChildren,
    /// Listing a folder's files failed.
    ListFiles,
    /// Deleting a file's blob from the remote store failed.
    DeleteBlob,
    /// Deleting a file record failed.
    DeleteFileRecord,
    /// Deleting the folder's own record failed.
    DeleteFolderRecord,
    /// The folder was left in place because something below it failed.
    FolderSkipped,
}

/// A single failed node in the deletion walk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteFailure {
    /// The folder the failure occurred in.
    pub folder_id: Uuid,
    /// The file involved, if the failure was file-scoped.
    pub file_id: Option<Uuid>,
    /// Display name of the failed node.
    pub name: String,
    /// Which step failed.
    pub stage: DeleteStage,
    /// Error category.
    pub kind: ErrorKind,
    /// Human-readable message.
    pub message: String,
}

impl DeleteFailure {
    fn folder(folder: &Folder, stage: DeleteStage, err: &AppError) -> Self {
        Self {
            folder_id: folder.id,
            file_id: None,
            name: folder.name.clone(),
            stage,
            kind: err.kind,
            message: err.message.clone(),
        }
    }

    fn file(file: &StoredFile, stage: DeleteStage, err: &AppError) -> Self {
        Self {
            folder_id: file.folder_id,
            file_id: Some(file.id),
            name: file.name.clone(),
            stage,
            kind: err.kind,
            message: err.message.clone(),
        }
    }

    fn skipped(folder: &Folder) -> Self {
        Self {
            folder_id: folder.id,
            file_id: None,
            name: folder.name.clone(),
            stage: DeleteStage::FolderSkipped,
            kind: ErrorKind::Internal,
            message: "Folder left in place because part of its contents could not be deleted"
                .to_string(),
        }
    }
}

/// Partial-failure summary of one deletion walk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteReport {
    /// Folder records removed.
    pub folders_deleted: u64,
    /// File records removed.
    pub files_deleted: u64,
    /// Blobs purged from the remote store.
    pub blobs_deleted: u64,
    /// Per-node failures, in no particular order.
    pub failures: Vec<DeleteFailure>,
}

impl DeleteReport {
    /// True when the whole subtree was removed.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    fn merge(&mut self, other: DeleteReport) {
        self.folders_deleted += other.folders_deleted;
        self.files_deleted += other.files_deleted;
        self.blobs_deleted += other.blobs_deleted;
        self.failures.extend(other.failures);
    }
}

/// Outcome of processing one folder node.
struct NodeOutcome {
    parent_id: Option<Uuid>,
    deleted: bool,
    partial: DeleteReport,
}

/// Executes subtree deletion walks.
///
/// The caller is responsible for authorization and for rejecting root
/// folders; the deleter assumes the target folder may be removed.
#[derive(Debug, Clone)]
pub struct SubtreeDeleter {
    folders: Arc<dyn FolderStore>,
    files: Arc<dyn FileStore>,
    blobs: Arc<dyn BlobStore>,
    concurrency: usize,
}

impl SubtreeDeleter {
    /// Creates a new subtree deleter.
    pub fn new(
        folders: Arc<dyn FolderStore>,
        files: Arc<dyn FileStore>,
        blobs: Arc<dyn BlobStore>,
        concurrency: usize,
    ) -> Self {
        Self {
            folders,
            files,
            blobs,
            concurrency: concurrency.max(1),
        }
    }

    /// Deletes `root` and everything below it, returning a report.
    ///
    /// Discovery collects the subtree into depth levels with a
    /// breadth-first worklist; deletion then processes levels
    /// deepest-first, so every folder's descendants are handled before
    /// the folder itself. Within a level, the file deletes of all
    /// sibling folders run as one flattened stream, so the configured
    /// cap bounds in-flight blob deletes for the whole walk rather than
    /// per folder.
    pub async fn delete_subtree(&self, root: Folder) -> DeleteReport {
        let root_id = root.id;
        let mut report = DeleteReport::default();

        // Folders whose own record must not be deleted because their
        // contents are not fully known or not fully removed.
        let mut blocked: HashSet<Uuid> = HashSet::new();

        // Discovery phase.
        let mut levels: Vec<Vec<Folder>> = Vec::new();
        let mut current = vec![root];
        while !current.is_empty() {
            let mut next = Vec::new();
            for folder in &current {
                match self.folders.children_of(folder.id).await {
                    Ok(children) => next.extend(children),
                    Err(err) => {
                        warn!(folder_id = %folder.id, error = %err, "Failed to list child folders");
                        report
                            .failures
                            .push(DeleteFailure::folder(folder, DeleteStage::ListChildren, &err));
                        blocked.insert(folder.id);
                    }
                }
            }
            levels.push(current);
            current = next;
        }

        // Deletion phase, deepest level first.
        for level in levels.iter().rev() {
            let mut clean = vec![true; level.len()];

            // List every folder's files up front so the file deletes
            // below can share one capped stream across siblings.
            let mut level_files: Vec<(usize, StoredFile)> = Vec::new();
            for (idx, folder) in level.iter().enumerate() {
                match self.files.in_folder(folder.id).await {
                    Ok(files) => level_files.extend(files.into_iter().map(|f| (idx, f))),
                    Err(err) => {
                        warn!(folder_id = %folder.id, error = %err, "Failed to list files");
                        report
                            .failures
                            .push(DeleteFailure::folder(folder, DeleteStage::ListFiles, &err));
                        clean[idx] = false;
                    }
                }
            }

            let file_results: Vec<(usize, bool, DeleteReport)> =
                stream::iter(level_files.into_iter().map(|(idx, file)| async move {
                    let (ok, partial) = self.delete_file_node(file).await;
                    (idx, ok, partial)
                }))
                .buffer_unordered(self.concurrency)
                .collect()
                .await;

            for (idx, ok, partial) in file_results {
                report.merge(partial);
                clean[idx] &= ok;
            }

            let folder_futures: Vec<_> = level
                .iter()
                .zip(&clean)
                .map(|(folder, ok)| {
                    self.delete_folder_record(folder, *ok && !blocked.contains(&folder.id))
                })
                .collect();
            let outcomes: Vec<NodeOutcome> = stream::iter(folder_futures)
                .buffer_unordered(self.concurrency)
                .collect()
                .await;

            for outcome in outcomes {
                report.merge(outcome.partial);
                if !outcome.deleted {
                    if let Some(parent_id) = outcome.parent_id {
                        blocked.insert(parent_id);
                    }
                }
            }
        }

        info!(
            root_id = %root_id,
            folders_deleted = report.folders_deleted,
            files_deleted = report.files_deleted,
            blobs_deleted = report.blobs_deleted,
            failures = report.failures.len(),
            "Subtree deletion finished"
        );

        report
    }

    /// Removes a folder's own record once its contents are gone.
    ///
    /// `allowed` is false when a file below the folder failed or the
    /// folder's contents could not be fully listed.
    async fn delete_folder_record(&self, folder: &Folder, allowed: bool) -> NodeOutcome {
        let mut partial = DeleteReport::default();

        let deleted = if allowed {
            match self.folders.delete(folder.id).await {
                Ok(true) => {
                    partial.folders_deleted += 1;
                    true
                }
                Ok(false) => {
                    // Row already gone, e.g. a concurrent walk won the
                    // race. The parent is unreferenced either way.
                    debug!(folder_id = %folder.id, "Folder record was already deleted");
                    true
                }
                Err(err) => {
                    warn!(folder_id = %folder.id, error = %err, "Failed to delete folder record");
                    partial.failures.push(DeleteFailure::folder(
                        folder,
                        DeleteStage::DeleteFolderRecord,
                        &err,
                    ));
                    false
                }
            }
        } else {
            partial.failures.push(DeleteFailure::skipped(folder));
            false
        };

        NodeOutcome {
            parent_id: folder.parent_id,
            deleted,
            partial,
        }
    }

    /// Purges one file: blob first, then the record.
    ///
    /// A failed blob delete keeps the record so the file stays visible
    /// and the deletion can be retried; deleting the record first would
    /// strand an unreferenced blob on the media host.
    async fn delete_file_node(&self, file: StoredFile) -> (bool, DeleteReport) {
        let mut partial = DeleteReport::default();

        match self.blobs.delete(&file.public_id).await {
            Ok(()) => partial.blobs_deleted += 1,
            Err(err) => {
                warn!(file_id = %file.id, public_id = %file.public_id, error = %err, "Blob delete failed");
                partial
                    .failures
                    .push(DeleteFailure::file(&file, DeleteStage::DeleteBlob, &err));
                return (false, partial);
            }
        }

        match self.files.delete(file.id).await {
            Ok(true) => {
                partial.files_deleted += 1;
                (true, partial)
            }
            Ok(false) => (true, partial),
            Err(err) => {
                warn!(file_id = %file.id, error = %err, "File record delete failed");
                partial
                    .failures
                    .push(DeleteFailure::file(&file, DeleteStage::DeleteFileRecord, &err));
                (false, partial)
            }
        }
    }
}
