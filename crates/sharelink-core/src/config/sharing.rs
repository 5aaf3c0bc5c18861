//! Sharing store configuration.

use serde::{Deserialize, Serialize};

/// Locations of the remote sharing store and identity cache, plus the
/// base URL used to compose shareable links.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharingConfig {
    /// Path of the sharing SQLite database on the remote host.
    #[serde(default = "default_db_path")]
    pub db_path: String,
    /// Directory holding the per-id account cache files, with `uid/` and
    /// `gid/` subdirectories.
    #[serde(default = "default_account_cache_dir")]
    pub account_cache_dir: String,
    /// URL prefix prepended to a stored public-url token to form a
    /// shareable link.
    pub base_url: String,
}

fn default_db_path() -> String {
    "/usr/syno/etc/private/session/sharing/sharing.db".to_string()
}

fn default_account_cache_dir() -> String {
    "/usr/syno/etc/private/@accountcache".to_string()
}
