//! Liked items
//!
//! Ordered, unique-by-id list of liked content, written through to a
//! [`KeyValueStore`] after every change.

use crate::config::storage::LIKES_KEY;
use crate::data::storage::KeyValueStore;
use crate::data::types::LikedItem;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Persisted format version for migrations
const LIKES_VERSION: u32 = 1;

/// Persisted form written by this crate
#[derive(Serialize)]
struct LikesRecord<'a> {
    version: u32,
    items: &'a [LikedItem],
}

/// Persisted forms accepted on restore
///
/// The web client stored a bare JSON array; that shape is still read.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredLikes {
    Versioned {
        #[allow(dead_code)]
        version: u32,
        items: Vec<LikedItem>,
    },
    Bare(Vec<LikedItem>),
}

/// Outcome of [`FavoritesStore::toggle`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    /// The item was appended to the end of the list
    Added,
    /// An entry with the item's id was removed
    Removed,
}

/// Liked items for the current session
///
/// Insertion order is preserved and ids are unique: every mutation goes
/// through `toggle`, `remove` or `clear`, and `toggle` only appends an id
/// that is not already present.
///
/// Persistence failures never reach the caller. They are logged, the
/// in-memory list stays authoritative and [`is_dirty`](Self::is_dirty)
/// reports that the stored copy is stale until a later write succeeds.
pub struct FavoritesStore<S: KeyValueStore> {
    items: Vec<LikedItem>,
    backend: S,
    key: String,
    /// Whether the stored copy lags behind `items`
    dirty: bool,
}

impl<S: KeyValueStore> FavoritesStore<S> {
    /// Restore the liked list from `backend` under the default key
    pub fn restore(backend: S) -> Self {
        Self::restore_with_key(backend, LIKES_KEY)
    }

    /// Restore the liked list stored under `key`
    ///
    /// Absent or unreadable state yields an empty list. Nothing is written.
    pub fn restore_with_key(backend: S, key: impl Into<String>) -> Self {
        let key = key.into();

        let items = match backend.get(&key) {
            Ok(Some(raw)) => decode(&raw).unwrap_or_else(|| {
                warn!("Stored liked items under {key:?} are malformed, starting empty");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Could not read liked items: {e}");
                Vec::new()
            }
        };

        debug!(count = items.len(), "Restored liked items");
        Self {
            items,
            backend,
            key,
            dirty: false,
        }
    }

    /// Remove the item if its id is present, otherwise append it
    pub fn toggle(&mut self, item: LikedItem) -> Toggle {
        let result = match self.position(&item.id) {
            Some(index) => {
                self.items.remove(index);
                Toggle::Removed
            }
            None => {
                self.items.push(item);
                Toggle::Added
            }
        };
        self.persist();
        result
    }

    /// Whether an item with `id` is liked
    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    /// Remove the item with `id`; returns it, or `None` if it was not liked
    pub fn remove(&mut self, id: &str) -> Option<LikedItem> {
        let index = self.position(id)?;
        let removed = self.items.remove(index);
        self.persist();
        Some(removed)
    }

    /// Remove every liked item
    ///
    /// Always writes, which also replaces a malformed stored value.
    pub fn clear(&mut self) {
        self.items.clear();
        self.persist();
    }

    /// Number of liked items
    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Liked items in the order they were added
    pub fn items(&self) -> &[LikedItem] {
        &self.items
    }

    /// Get a liked item by id
    pub fn get(&self, id: &str) -> Option<&LikedItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Unique categories of the liked items, sorted
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<_> = self
            .items
            .iter()
            .filter(|item| !item.category.is_empty())
            .map(|item| item.category.clone())
            .collect();
        categories.sort();
        categories.dedup();
        categories
    }

    /// Whether the last write failed and the stored copy is stale
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Write the current list now, regardless of the dirty flag
    pub fn flush(&mut self) -> Result<()> {
        let encoded = encode(&self.items)?;
        self.backend.set(&self.key, &encoded)?;
        self.dirty = false;
        Ok(())
    }

    /// Access the persistence backend
    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Give the persistence backend back, dropping the in-memory list
    pub fn into_backend(self) -> S {
        self.backend
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    fn persist(&mut self) {
        if let Err(e) = self.flush() {
            self.dirty = true;
            warn!("Failed to save liked items, keeping them in memory: {e}");
        }
    }
}

/// Serialize the list in the current persisted format
fn encode(items: &[LikedItem]) -> Result<String> {
    let record = LikesRecord {
        version: LIKES_VERSION,
        items,
    };
    Ok(serde_json::to_string(&record)?)
}

/// Parse any accepted persisted form, dropping repeated ids
fn decode(raw: &str) -> Option<Vec<LikedItem>> {
    if raw.trim().is_empty() {
        return Some(Vec::new());
    }

    let items = match serde_json::from_str::<StoredLikes>(raw).ok()? {
        StoredLikes::Versioned { items, .. } => items,
        StoredLikes::Bare(items) => items,
    };

    let mut seen = HashSet::new();
    Some(
        items
            .into_iter()
            .filter(|item| seen.insert(item.id.clone()))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::storage::{FileStore, MemoryStore};
    use crate::error::AppError;
    use std::env::temp_dir;
    use std::fs;
    use std::sync::atomic::{AtomicU32, Ordering};

    static TEST_COUNTER: AtomicU32 = AtomicU32::new(0);

    fn temp_dir_path() -> std::path::PathBuf {
        let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        temp_dir().join(format!("modelshelf_likes_test_{}_{}", std::process::id(), id))
    }

    fn item(id: &str) -> LikedItem {
        LikedItem::new(id, format!("Model {id}"))
    }

    fn ids<S: KeyValueStore>(store: &FavoritesStore<S>) -> Vec<&str> {
        store.items().iter().map(|i| i.id.as_str()).collect()
    }

    fn empty_store() -> FavoritesStore<MemoryStore> {
        FavoritesStore::restore(MemoryStore::new())
    }

    /// Backend whose writes always fail
    #[derive(Default)]
    struct BrokenStore {
        stored: Option<String>,
    }

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Ok(self.stored.clone())
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(AppError::Storage("quota exceeded".to_string()))
        }

        fn remove(&mut self, _key: &str) -> Result<()> {
            Ok(())
        }
    }

    /// Backend that cannot be read at all
    #[derive(Default)]
    struct UnreadableStore {
        writes: usize,
    }

    impl KeyValueStore for UnreadableStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(AppError::Storage("Permission denied: cannot read likedItems.json".to_string()))
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
            self.writes += 1;
            Ok(())
        }

        fn remove(&mut self, _key: &str) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_toggle_distinct_items_keeps_order() {
        let mut store = empty_store();
        assert_eq!(store.toggle(item("a")), Toggle::Added);
        assert_eq!(store.toggle(item("b")), Toggle::Added);
        assert_eq!(ids(&store), vec!["a", "b"]);
    }

    #[test]
    fn test_double_toggle_is_empty() {
        let mut store = empty_store();
        store.toggle(item("a"));
        assert_eq!(store.toggle(item("a")), Toggle::Removed);
        assert!(store.is_empty());
    }

    #[test]
    fn test_contains_follows_toggle() {
        let mut store = empty_store();
        store.toggle(item("a"));
        assert!(store.contains("a"));
        store.toggle(item("a"));
        assert!(!store.contains("a"));
    }

    #[test]
    fn test_toggle_matches_by_id_only() {
        let mut store = empty_store();
        store.toggle(LikedItem::new("a", "Original title"));
        let result = store.toggle(LikedItem::new("a", "Renamed upstream"));
        assert_eq!(result, Toggle::Removed);
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn test_retoggle_moves_to_end() {
        let mut store = empty_store();
        store.toggle(item("a"));
        store.toggle(item("b"));
        store.toggle(item("a"));
        store.toggle(item("a"));
        assert_eq!(ids(&store), vec!["b", "a"]);
    }

    #[test]
    fn test_clear_always_empties() {
        let mut store = empty_store();
        store.clear();
        assert_eq!(store.count(), 0);

        store.toggle(item("a"));
        store.toggle(item("b"));
        store.clear();
        assert_eq!(store.count(), 0);
        assert_eq!(
            store.backend().get(LIKES_KEY).unwrap().as_deref(),
            Some(r#"{"version":1,"items":[]}"#)
        );
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut store = empty_store();
        store.toggle(item("a"));
        let before = store.backend().get(LIKES_KEY).unwrap();

        assert_eq!(store.remove("missing"), None);
        assert_eq!(ids(&store), vec!["a"]);
        assert_eq!(store.backend().get(LIKES_KEY).unwrap(), before);
    }

    #[test]
    fn test_remove_present() {
        let mut store = empty_store();
        store.toggle(item("a"));
        store.toggle(item("b"));
        store.toggle(item("c"));

        let removed = store.remove("b").unwrap();
        assert_eq!(removed.id, "b");
        assert_eq!(ids(&store), vec!["a", "c"]);
    }

    #[test]
    fn test_restore_roundtrip_preserves_order() {
        let mut store = empty_store();
        for id in ["c", "a", "b"] {
            store.toggle(item(id));
        }

        let restored = FavoritesStore::restore(store.into_backend());
        assert_eq!(ids(&restored), vec!["c", "a", "b"]);
        assert_eq!(restored.get("a").unwrap().title, "Model a");
    }

    #[test]
    fn test_restore_does_not_write() {
        let store = FavoritesStore::restore(MemoryStore::new());
        assert!(store.backend().is_empty());
    }

    #[test]
    fn test_restore_malformed_is_empty() {
        let mut backend = MemoryStore::new();
        backend.set(LIKES_KEY, "{not json").unwrap();

        let store = FavoritesStore::restore(backend);
        assert!(store.is_empty());
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_restore_read_error_is_empty() {
        let store = FavoritesStore::restore(UnreadableStore::default());
        assert!(store.is_empty());
        assert!(!store.is_dirty());
        assert_eq!(store.backend().writes, 0);
    }

    #[test]
    fn test_restore_bare_array() {
        let mut backend = MemoryStore::new();
        backend
            .set(
                LIKES_KEY,
                r#"[{"_id":"1","title":"Neil Armstrong's Spacesuit","category":"History"},
                    {"_id":"2","title":"Astronaut","category":"Space"}]"#,
            )
            .unwrap();

        let store = FavoritesStore::restore(backend);
        assert_eq!(ids(&store), vec!["1", "2"]);
        assert_eq!(store.categories(), vec!["History", "Space"]);
    }

    #[test]
    fn test_restore_drops_duplicate_ids() {
        let mut backend = MemoryStore::new();
        backend
            .set(LIKES_KEY, r#"[{"_id":"1","title":"first"},{"_id":"1","title":"second"},{"_id":"2"}]"#)
            .unwrap();

        let store = FavoritesStore::restore(backend);
        assert_eq!(ids(&store), vec!["1", "2"]);
        assert_eq!(store.get("1").unwrap().title, "first");
    }

    #[test]
    fn test_write_failure_keeps_memory_state() {
        let mut store = FavoritesStore::restore(BrokenStore::default());

        assert_eq!(store.toggle(item("a")), Toggle::Added);
        assert!(store.contains("a"));
        assert!(store.is_dirty());
        assert!(store.flush().is_err());
    }

    #[test]
    fn test_quota_exceeded_then_recovers() {
        let mut store = FavoritesStore::restore(MemoryStore::with_quota(300));
        store.toggle(item("a"));
        assert!(!store.is_dirty());

        store.toggle(LikedItem::new("b", "x".repeat(200)));
        assert!(store.is_dirty());
        assert_eq!(store.count(), 2);

        // Shrinking the list below quota lets the next write through
        store.remove("b");
        assert!(!store.is_dirty());
        let restored = FavoritesStore::restore(store.into_backend());
        assert_eq!(ids(&restored), vec!["a"]);
    }

    #[test]
    fn test_custom_key() {
        let mut store = FavoritesStore::restore_with_key(MemoryStore::new(), "likes-v2");
        store.toggle(item("a"));
        assert!(store.backend().get("likes-v2").unwrap().is_some());
        assert!(store.backend().get(LIKES_KEY).unwrap().is_none());
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = temp_dir_path();

        {
            let mut store = FavoritesStore::restore(FileStore::new(&dir));
            store.toggle(item("1"));
            store.toggle(item("4"));
        }

        {
            let store = FavoritesStore::restore(FileStore::new(&dir));
            assert_eq!(ids(&store), vec!["1", "4"]);
        }

        let _ = fs::remove_dir_all(&dir);
    }
}
