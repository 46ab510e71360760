//! Common data types for persistence and catalog payloads
//!
//! Field names follow the catalog API's JSON (`_id`, `modelUrl`, ...), so the
//! same structs read API responses and previously persisted liked lists.

use serde::{Deserialize, Serialize};

// =============================================================================
// ContentItem - A record from the catalog
// =============================================================================

/// An educational 3D/AR model as served by the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    /// Catalog identifier
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    /// Display title
    pub title: String,
    /// Longer description shown on the detail view
    pub description: String,
    /// URL of the glTF/GLB model
    pub model_url: String,
    /// URL of the preview image
    pub thumbnail_url: String,
    /// Category label ("Space", "Art", ...)
    pub category: String,
    /// Creation timestamp as reported by the API (ISO 8601)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl ContentItem {
    /// Create an item with the required fields; media URLs start empty
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            model_url: String::new(),
            thumbnail_url: String::new(),
            category: category.into(),
            created_at: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_media(mut self, model_url: impl Into<String>, thumbnail_url: impl Into<String>) -> Self {
        self.model_url = model_url.into();
        self.thumbnail_url = thumbnail_url.into();
        self
    }

    /// Snapshot of this record suitable for the liked list
    pub fn to_liked(&self) -> LikedItem {
        LikedItem::from(self)
    }
}

// =============================================================================
// LikedItem - A saved copy of a content record
// =============================================================================

/// A content record the user chose to save
///
/// Denormalized on purpose: the liked list renders without the catalog.
/// Identity is the `id` field alone; two liked items with the same id are
/// the same entry even if their other fields differ.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LikedItem {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub model_url: String,
    #[serde(default)]
    pub thumbnail_url: String,
    #[serde(default)]
    pub category: String,
}

impl LikedItem {
    /// Create a liked item with only an id and title
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            model_url: String::new(),
            thumbnail_url: String::new(),
            category: String::new(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }
}

impl From<&ContentItem> for LikedItem {
    fn from(item: &ContentItem) -> Self {
        Self {
            id: item.id.clone(),
            title: item.title.clone(),
            description: item.description.clone(),
            model_url: item.model_url.clone(),
            thumbnail_url: item.thumbnail_url.clone(),
            category: item.category.clone(),
        }
    }
}

impl From<ContentItem> for LikedItem {
    fn from(item: ContentItem) -> Self {
        Self {
            id: item.id,
            title: item.title,
            description: item.description,
            model_url: item.model_url,
            thumbnail_url: item.thumbnail_url,
            category: item.category,
        }
    }
}
