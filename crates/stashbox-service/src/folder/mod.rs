//! Folder CRUD and subtree deletion.

pub mod delete;
pub mod service;

pub use delete::{DeleteFailure, DeleteReport, DeleteStage, SubtreeDeleter};
pub use service::{FolderContents, FolderService};
