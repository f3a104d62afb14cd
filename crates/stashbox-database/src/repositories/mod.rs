//! Concrete repositories and the record-store trait seam.
//!
//! The service layer consumes [`UserStore`], [`FolderStore`] and
//! [`FileStore`] as trait objects so that sign-up, the deletion walk
//! and the upload intake can be exercised against in-memory fakes. The
//! concrete repositories in this module are the production
//! implementations.

pub mod file;
pub mod folder;
pub mod session;
pub mod user;

use async_trait::async_trait;
use uuid::Uuid;

use stashbox_core::result::AppResult;
use stashbox_entity::file::{CreateFile, StoredFile};
use stashbox_entity::folder::{CreateFolder, Folder};
use stashbox_entity::user::{CreateUser, User};

pub use file::FileRepository;
pub use folder::FolderRepository;
pub use session::SessionRepository;
pub use user::UserRepository;

/// User account operations consumed by the service layer.
#[async_trait]
pub trait UserStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a user by ID.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find a user by email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Create a new user. A duplicate email is a conflict.
    async fn create(&self, data: &CreateUser) -> AppResult<User>;
}

/// Record-oriented folder operations consumed by the service layer.
#[async_trait]
pub trait FolderStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a folder by ID.
    async fn find(&self, id: Uuid) -> AppResult<Option<Folder>>;

    /// Find a user's root (home) folder.
    async fn find_root(&self, user_id: Uuid) -> AppResult<Option<Folder>>;

    /// List the direct children of a folder.
    async fn children_of(&self, id: Uuid) -> AppResult<Vec<Folder>>;

    /// Create a new folder.
    async fn create(&self, data: &CreateFolder) -> AppResult<Folder>;

    /// Rename a folder.
    async fn rename(&self, id: Uuid, new_name: &str) -> AppResult<Folder>;

    /// Delete a folder record. Returns `false` if the row was already gone.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

/// Record-oriented file operations consumed by the service layer.
#[async_trait]
pub trait FileStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a file by ID.
    async fn find(&self, id: Uuid) -> AppResult<Option<StoredFile>>;

    /// List the files directly inside a folder.
    async fn in_folder(&self, folder_id: Uuid) -> AppResult<Vec<StoredFile>>;

    /// Find a file by name within a folder.
    async fn find_by_name(&self, folder_id: Uuid, name: &str) -> AppResult<Option<StoredFile>>;

    /// Create a new file record.
    async fn create(&self, data: &CreateFile) -> AppResult<StoredFile>;

    /// Rename a file.
    async fn rename(&self, id: Uuid, new_name: &str) -> AppResult<StoredFile>;

    /// Delete a file record. Returns `false` if the row was already gone.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}
