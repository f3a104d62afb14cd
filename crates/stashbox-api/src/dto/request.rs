//! Request DTOs.

use serde::Deserialize;
use uuid::Uuid;

/// Sign-up form body.
#[derive(Debug, Clone, Deserialize)]
pub struct SignUpRequest {
    /// Email address to register.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

/// Login form body.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// Email address.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

/// Folder creation body.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFolderRequest {
    /// Parent folder to create under.
    pub parent_id: Uuid,
    /// Display name.
    pub name: String,
}

/// Rename body shared by folders and files.
#[derive(Debug, Clone, Deserialize)]
pub struct RenameRequest {
    /// New display name.
    pub name: String,
}
