//! Data persistence
//!
//! Liked items, settings and the key-value storage they sit on.

pub mod favorites;
pub mod settings;
pub mod storage;
pub mod types;

// Re-export common types
pub use favorites::{FavoritesStore, Toggle};
pub use settings::{Settings, Theme};
pub use storage::{data_dir, FileStore, KeyValueStore, MemoryStore};
pub use types::{ContentItem, LikedItem};
