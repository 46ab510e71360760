//! Browsing helpers
//!
//! Search/category filtering, the category list and related-item lookup.

use crate::config::catalog::ALL_CATEGORIES;
use crate::data::types::ContentItem;

/// Filter criteria for catalog items
///
/// Both criteria must match. An empty search or the `All` category
/// matches everything.
#[derive(Debug, Default, Clone)]
pub struct ContentFilter {
    /// Case-insensitive text matched against title, category and description
    pub search: Option<String>,
    /// Exact category name
    pub category: Option<String>,
}

impl ContentFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Check if an item matches this filter
    pub fn matches(&self, item: &ContentItem) -> bool {
        if let Some(ref search) = self.search {
            let needle = search.trim().to_lowercase();
            if !needle.is_empty() {
                let hit = item.title.to_lowercase().contains(&needle)
                    || item.category.to_lowercase().contains(&needle)
                    || item.description.to_lowercase().contains(&needle);
                if !hit {
                    return false;
                }
            }
        }

        if let Some(ref category) = self.category {
            if category != ALL_CATEGORIES && &item.category != category {
                return false;
            }
        }

        true
    }

    /// Items matching this filter, in their original order
    pub fn apply<'a>(&self, items: &'a [ContentItem]) -> Vec<&'a ContentItem> {
        items.iter().filter(|item| self.matches(item)).collect()
    }
}

/// `All` followed by each distinct category in order of first appearance
pub fn categories(items: &[ContentItem]) -> Vec<String> {
    let mut result = vec![ALL_CATEGORIES.to_string()];
    for item in items {
        if !result.iter().any(|c| c == &item.category) {
            result.push(item.category.clone());
        }
    }
    result
}

/// Up to `limit` other items sharing `item`'s category
pub fn related<'a>(items: &'a [ContentItem], item: &ContentItem, limit: usize) -> Vec<&'a ContentItem> {
    items
        .iter()
        .filter(|other| other.category == item.category && other.id != item.id)
        .take(limit)
        .collect()
}
