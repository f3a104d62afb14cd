//! Session cookie configuration.

use serde::{Deserialize, Serialize};

/// Session lifetime and cookie settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Name of the session cookie.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Session lifetime in hours.
    #[serde(default = "default_ttl_hours")]
    pub ttl_hours: u64,
    /// Whether the cookie is marked `Secure`.
    #[serde(default)]
    pub secure_cookie: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            ttl_hours: default_ttl_hours(),
            secure_cookie: false,
        }
    }
}

fn default_cookie_name() -> String {
    "sid".to_string()
}

fn default_ttl_hours() -> u64 {
    // Seven days, matching the session store's cookie maxAge.
    7 * 24
}
