//! Built-in catalog
//!
//! Six sample models served when the catalog API is unreachable.

use crate::data::types::ContentItem;
use crate::error::Result;

use super::traits::CatalogProvider;

/// In-memory catalog with the bundled sample models
pub struct BuiltinCatalog {
    items: Vec<ContentItem>,
}

impl BuiltinCatalog {
    /// Catalog holding the bundled sample models
    pub fn new() -> Self {
        Self {
            items: sample_items(),
        }
    }

    /// Catalog holding arbitrary items, in the given order
    pub fn from_items(items: Vec<ContentItem>) -> Self {
        Self { items }
    }
}

impl Default for BuiltinCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogProvider for BuiltinCatalog {
    fn name(&self) -> &'static str {
        "Built-in samples"
    }

    fn id(&self) -> &'static str {
        "builtin"
    }

    fn list(&self) -> Result<Vec<ContentItem>> {
        Ok(self.items.clone())
    }

    fn get(&self, id: &str) -> Result<Option<ContentItem>> {
        Ok(self.items.iter().find(|item| item.id == id).cloned())
    }
}

fn sample(
    id: &str,
    title: &str,
    category: &str,
    description: &str,
    model_url: &str,
    thumbnail_url: &str,
) -> ContentItem {
    ContentItem::new(id, title, category)
        .with_description(description)
        .with_media(model_url, thumbnail_url)
}

fn sample_items() -> Vec<ContentItem> {
    vec![
        sample(
            "1",
            "Neil Armstrong's Spacesuit",
            "History",
            "A 3D scan of Neil Armstrong's spacesuit from the Apollo 11 mission. Explore the details of the suit that walked on the moon.",
            "https://modelviewer.dev/shared-assets/models/NeilArmstrong.glb",
            "https://images.unsplash.com/photo-1454789548928-9efd52dc4031?auto=format&fit=crop&q=80&w=400",
        ),
        sample(
            "2",
            "Astronaut",
            "Space",
            "A detailed astronaut model showcasing space exploration equipment. Perfect for learning about space missions and gear.",
            "https://modelviewer.dev/shared-assets/models/Astronaut.glb",
            "https://images.unsplash.com/photo-1446776811953-b23d57bd21aa?auto=format&fit=crop&q=80&w=400",
        ),
        sample(
            "3",
            "Damaged Helmet",
            "Art",
            "A battle-damaged sci-fi helmet with realistic textures and PBR materials. Great for studying 3D art and lighting.",
            "https://raw.githubusercontent.com/KhronosGroup/glTF-Sample-Models/main/2.0/DamagedHelmet/glTF-Binary/DamagedHelmet.glb",
            "https://images.unsplash.com/photo-1581833971358-2c8b550f87b3?auto=format&fit=crop&q=80&w=400",
        ),
        sample(
            "4",
            "Shishkebab",
            "Food",
            "A whimsical animated shish kebab character. Fun interactive model demonstrating 3D animation and rigging.",
            "https://modelviewer.dev/shared-assets/models/shishkebab.glb",
            "https://images.unsplash.com/photo-1555939594-58d7cb561ad1?auto=format&fit=crop&q=80&w=400",
        ),
        sample(
            "5",
            "Horse Statue",
            "Art",
            "An elegant horse sculpture showcasing detailed 3D modeling and texturing techniques.",
            "https://modelviewer.dev/shared-assets/models/Horse.glb",
            "https://images.unsplash.com/photo-1553284965-83fd3e82fa5a?auto=format&fit=crop&q=80&w=400",
        ),
        sample(
            "6",
            "Alpha Blend Mode Test",
            "Technology",
            "A colorful geometric model demonstrating transparency and alpha blending in 3D graphics.",
            "https://modelviewer.dev/shared-assets/models/alpha-blend-litmus.glb",
            "https://images.unsplash.com/photo-1618005182384-a83a8bd57fbe?auto=format&fit=crop&q=80&w=400",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_sample_ids_unique() {
        let items = BuiltinCatalog::new().list().unwrap();
        assert_eq!(items.len(), 6);
        let ids: HashSet<_> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids.len(), 6);
    }

    #[test]
    fn test_samples_have_media() {
        for item in BuiltinCatalog::new().list().unwrap() {
            assert!(item.model_url.ends_with(".glb"), "{} has no model", item.id);
            assert!(!item.thumbnail_url.is_empty());
            assert!(!item.description.is_empty());
        }
    }

    #[test]
    fn test_get() {
        let catalog = BuiltinCatalog::new();
        assert_eq!(catalog.get("2").unwrap().unwrap().title, "Astronaut");
        assert!(catalog.get("99").unwrap().is_none());
    }
}
