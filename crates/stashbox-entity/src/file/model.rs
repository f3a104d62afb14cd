//! File entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A file record referencing a blob on the remote media host.
///
/// A file belongs to exactly one folder; its owner is derived
/// transitively through the folder.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StoredFile {
    /// Unique file identifier.
    pub id: Uuid,
    /// The folder containing this file.
    pub folder_id: Uuid,
    /// Display name (including extension).
    pub name: String,
    /// Remote download URL.
    pub url: String,
    /// The media host's identifier for the blob.
    pub public_id: String,
    /// File size in bytes.
    pub size_bytes: i64,
    /// When the file was uploaded.
    pub uploaded_at: DateTime<Utc>,
}

impl StoredFile {
    /// Get the file extension (lowercase), if any.
    pub fn extension(&self) -> Option<String> {
        self.name
            .rsplit('.')
            .next()
            .filter(|ext| *ext != self.name)
            .map(|ext| ext.to_lowercase())
    }
}

/// Data required to create a new file record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFile {
    /// The folder to place the file in.
    pub folder_id: Uuid,
    /// Display name.
    pub name: String,
    /// Remote download URL.
    pub url: String,
    /// The media host's blob identifier.
    pub public_id: String,
    /// File size in bytes.
    pub size_bytes: i64,
}
