//! Credential policy configuration.

use serde::{Deserialize, Serialize};

/// Limits applied to sign-up and login form input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Maximum email length.
    #[serde(default = "default_email_max")]
    pub email_max_length: usize,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Maximum password length.
    #[serde(default = "default_password_max")]
    pub password_max_length: usize,
    /// Maximum folder/file display name length.
    #[serde(default = "default_name_max")]
    pub name_max_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            email_max_length: default_email_max(),
            password_min_length: default_password_min(),
            password_max_length: default_password_max(),
            name_max_length: default_name_max(),
        }
    }
}

fn default_email_max() -> usize {
    50
}

fn default_password_min() -> usize {
    1
}

fn default_password_max() -> usize {
    25
}

fn default_name_max() -> usize {
    25
}
