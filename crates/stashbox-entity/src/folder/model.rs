//! Folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A folder in a user's tree.
///
/// Folders form a forest: one tree per user, rooted at the home folder
/// created at sign-up. The home folder is the only folder without a
/// parent and cannot be deleted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Folder {
    /// Unique folder identifier.
    pub id: Uuid,
    /// The owning user.
    pub user_id: Uuid,
    /// Parent folder ID (null for the home folder).
    pub parent_id: Option<Uuid>,
    /// Folder display name.
    pub name: String,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
    /// When the folder was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Folder {
    /// Check if this is the user's home (root) folder.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Data required to create a new folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolder {
    /// The owning user.
    pub user_id: Uuid,
    /// Parent folder (None only for the home folder).
    pub parent_id: Option<Uuid>,
    /// Folder display name.
    pub name: String,
}
