//! Storage layer
//!
//! Path helpers and JSON file I/O, plus the key-value persistence surface
//! ([`KeyValueStore`]) that the favorites store writes through.

use crate::config::{app::NAME, env_override, env_vars, storage::KEY_FILE_EXTENSION};
use crate::error::{AppError, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Get the application data directory path
///
/// `MODELSHELF_DATA_DIR` takes precedence over the platform config directory.
pub fn data_dir() -> Result<PathBuf> {
    if let Some(dir) = env_override(env_vars::DATA_DIR) {
        return Ok(PathBuf::from(dir));
    }
    dirs::config_dir()
        .map(|p| p.join(NAME))
        .ok_or_else(|| AppError::Config(
            "Could not determine config directory. HOME environment variable may not be set.".to_string()
        ))
}

// =============================================================================
// Path-based functions
// =============================================================================

/// Create a directory if it doesn't exist, with proper error handling
fn create_dir_if_needed(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| {
        let msg = match e.kind() {
            ErrorKind::PermissionDenied => {
                format!("Permission denied: cannot create directory {:?}", path)
            }
            _ => format!("Failed to create directory {:?}: {}", path, e),
        };
        AppError::Storage(msg)
    })
}

/// Read file contents; a missing file is `Ok(None)`
fn read_file(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) => match e.kind() {
            ErrorKind::NotFound => Ok(None),
            ErrorKind::PermissionDenied => Err(AppError::Storage(format!(
                "Permission denied: cannot read {:?}",
                path
            ))),
            _ => Err(AppError::Storage(format!("Failed to read {:?}: {}", path, e))),
        },
    }
}

/// Sibling path a write is staged in before it replaces `path`
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write file contents, creating the parent directory first
///
/// The content is written to a sibling file and renamed over `path`, so a
/// crash mid-write leaves the previous content intact.
fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_if_needed(parent)?;
        }
    }

    let staging = staging_path(path);
    let written = fs::write(&staging, content).and_then(|()| fs::rename(&staging, path));
    written.map_err(|e| {
        let _ = fs::remove_file(&staging);
        let msg = match e.kind() {
            ErrorKind::PermissionDenied => {
                format!("Permission denied: cannot write to {:?}", path)
            }
            ErrorKind::ReadOnlyFilesystem => {
                format!("Cannot write to {:?}: filesystem is read-only", path)
            }
            ErrorKind::StorageFull => {
                format!("Cannot write to {:?}: no space left on device", path)
            }
            _ => format!("Failed to write to {:?}: {}", path, e),
        };
        AppError::Storage(msg)
    })
}

/// Delete a file; a missing file is not an error
fn delete_file(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(AppError::Storage(format!("Failed to delete {:?}: {}", path, e))),
    }
}

/// Load data from a JSON file at a specific path
///
/// Returns `None` if the file doesn't exist or is empty.
/// Returns an error if the file exists but can't be read or parsed.
pub fn load_from<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let content = match read_file(path)? {
        Some(c) => c,
        None => return Ok(None),
    };

    if content.trim().is_empty() {
        return Ok(None);
    }

    let data = serde_json::from_str(&content)
        .map_err(|e| AppError::Storage(format!("Failed to parse {:?}: {}", path, e)))?;

    Ok(Some(data))
}

/// Save data as pretty JSON at a specific path
///
/// Creates parent directories if they don't exist.
pub fn save_to<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(data)?;
    write_file(path, &content)
}

// =============================================================================
// KeyValueStore - the persistence surface
// =============================================================================

/// A string key-value persistence surface
///
/// Mirrors what a browser's local storage offers: string values under
/// string keys, surviving restarts but with no durability guarantee.
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove the value under `key`; removing a missing key succeeds
    fn remove(&mut self, key: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

/// In-process store, optionally limited to a byte quota
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStore {
    /// Create an empty, unlimited store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store that rejects writes once keys plus values
    /// would exceed `bytes`
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            entries: HashMap::new(),
            quota: Some(bytes),
        }
    }

    /// Bytes currently used by keys and values
    pub fn used_bytes(&self) -> usize {
        self.entries.iter().map(|(k, v)| k.len() + v.len()).sum()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is stored
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if let Some(quota) = self.quota {
            let existing = self.entries.get(key).map_or(0, |v| key.len() + v.len());
            let needed = self.used_bytes() - existing + key.len() + value.len();
            if needed > quota {
                return Err(AppError::Storage(format!(
                    "Quota exceeded: writing {:?} needs {} bytes, limit is {}",
                    key, needed, quota
                )));
            }
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// File-backed store: one `<key>.json` file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Store rooted at `dir`; the directory is created on first write
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the file backing `key`
    pub fn key_path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if !valid {
            return Err(AppError::Storage(format!("Invalid storage key {:?}", key)));
        }
        Ok(self.dir.join(format!("{key}.{KEY_FILE_EXTENSION}")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        read_file(&self.key_path(key)?)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        write_file(&self.key_path(key)?, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        delete_file(&self.key_path(key)?)
    }
}
