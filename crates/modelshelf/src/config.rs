//! Configuration constants and environment overrides for modelshelf

use std::env;

use tracing::{debug, warn};

/// Application metadata
pub mod app {
    /// Application name (used for the data directory, etc.)
    pub const NAME: &str = "modelshelf";
}

/// Persistence keys and file names
pub mod storage {
    /// Key under which the liked items are stored
    pub const LIKES_KEY: &str = "likedItems";

    /// Settings data file name
    pub const SETTINGS_FILE: &str = "settings.json";

    /// Extension appended to keys by the file-backed store
    pub const KEY_FILE_EXTENSION: &str = "json";
}

/// Network-related configuration
pub mod network {
    /// User agent for HTTP requests
    pub const USER_AGENT: &str = concat!("modelshelf/", env!("CARGO_PKG_VERSION"));

    /// Connection timeout in seconds
    pub const CONNECT_TIMEOUT_SECS: u64 = 5;

    /// Read timeout in seconds
    pub const READ_TIMEOUT_SECS: u64 = 15;
}

/// Catalog defaults
pub mod catalog {
    /// Default catalog API server
    pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";

    /// Default origin used when building share links
    pub const DEFAULT_SHARE_ORIGIN: &str = "http://localhost:5173";

    /// Pseudo-category that matches every item
    pub const ALL_CATEGORIES: &str = "All";

    /// Number of related items shown next to a model
    pub const RELATED_LIMIT: usize = 2;
}

/// Environment variable names
pub mod env_vars {
    /// Overrides the catalog API base URL
    pub const API_URL: &str = "MODELSHELF_API_URL";

    /// Overrides the data directory
    pub const DATA_DIR: &str = "MODELSHELF_DATA_DIR";
}

/// Read an optional environment override.
///
/// Unset variables are normal and only logged at debug level; a variable
/// that is set but empty or not valid unicode is ignored with a warning.
pub fn env_override(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Some(value.trim().to_string()),
        Ok(_) => {
            warn!("Environment variable {key} is empty, ignoring");
            None
        }
        Err(env::VarError::NotPresent) => {
            debug!("{key} not set, using default");
            None
        }
        Err(env::VarError::NotUnicode(_)) => {
            warn!("Environment variable {key} is not valid unicode, ignoring");
            None
        }
    }
}
