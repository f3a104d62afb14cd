//! Remote media host configuration.

use serde::{Deserialize, Serialize};

/// Settings for the remote blob store and the deletion walk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaStoreConfig {
    /// Provider to use: "remote" or "memory".
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Base URL of the media host API.
    #[serde(default)]
    pub base_url: String,
    /// API key for the media host.
    #[serde(default)]
    pub api_key: String,
    /// API secret for the media host.
    #[serde(default)]
    pub api_secret: String,
    /// Maximum upload size in bytes (default 10 MiB).
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
    /// Maximum number of sibling branches deleted concurrently during
    /// a subtree deletion walk.
    #[serde(default = "default_delete_concurrency")]
    pub delete_concurrency: usize,
}

impl Default for MediaStoreConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            base_url: String::new(),
            api_key: String::new(),
            api_secret: String::new(),
            max_upload_size_bytes: default_max_upload(),
            delete_concurrency: default_delete_concurrency(),
        }
    }
}

fn default_provider() -> String {
    "remote".to_string()
}

fn default_max_upload() -> u64 {
    10 * 1024 * 1024
}

fn default_delete_concurrency() -> usize {
    8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let cfg = MediaStoreConfig::default();
        assert_eq!(cfg.max_upload_size_bytes, 10 * 1024 * 1024);
        assert!(cfg.delete_concurrency >= 1);
    }
}
