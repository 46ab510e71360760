//! Application settings
//!
//! User preferences, persisted as JSON next to the liked items.

use crate::config::catalog::{DEFAULT_API_BASE_URL, DEFAULT_SHARE_ORIGIN};
use crate::config::{env_override, env_vars};
use crate::data::storage;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings file format version for migrations
const SETTINGS_VERSION: u32 = 1;

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// File format version
    #[serde(default = "default_version")]
    pub version: u32,

    /// Base URL of the catalog API (without the `/api/content` path)
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Origin used to build share links
    #[serde(default = "default_share_origin")]
    pub share_origin: String,

    /// Theme preference
    #[serde(default)]
    pub theme: Theme,

    /// Serve the built-in catalog when the API is unreachable
    #[serde(default = "default_true")]
    pub use_fallback_catalog: bool,
}

fn default_version() -> u32 {
    SETTINGS_VERSION
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_share_origin() -> String {
    DEFAULT_SHARE_ORIGIN.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: SETTINGS_VERSION,
            api_base_url: default_api_base_url(),
            share_origin: default_share_origin(),
            theme: Theme::default(),
            use_fallback_catalog: true,
        }
    }
}

impl Settings {
    /// Create default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from a specific path; a missing file gives defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        Ok(storage::load_from::<Settings>(path)?.unwrap_or_default())
    }

    /// Save settings to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        storage::save_to(path, self)
    }

    /// Catalog API base URL after applying `MODELSHELF_API_URL`
    pub fn effective_api_base_url(&self) -> String {
        env_override(env_vars::API_URL).unwrap_or_else(|| self.api_base_url.clone())
    }

    /// Switch between dark and light theme, returning the new theme
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }
}

/// Theme preference
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// The other theme
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}
