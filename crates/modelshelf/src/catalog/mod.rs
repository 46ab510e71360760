//! Content catalog
//!
//! Providers for content records (the catalog API, built-in samples) and
//! the browsing helpers the front ends use on top of them.

pub mod builtin;
pub mod filter;
pub mod remote;
pub mod traits;

// Re-exports
pub use builtin::BuiltinCatalog;
pub use filter::{categories, related, ContentFilter};
pub use remote::RemoteCatalog;
pub use traits::CatalogProvider;

use crate::config::catalog::RELATED_LIMIT;
use crate::data::types::ContentItem;
use crate::error::{AppError, Result};
use tracing::{debug, warn};

/// Items returned by [`Catalog::list`], tagged with where they came from
#[derive(Debug, Clone)]
pub struct Listing {
    pub items: Vec<ContentItem>,
    /// Id of the provider that answered
    pub source: &'static str,
    /// True when the primary provider failed and the fallback answered
    pub degraded: bool,
}

/// Detail view of one item
#[derive(Debug, Clone)]
pub struct ItemDetail {
    pub item: ContentItem,
    /// Other items in the same category
    pub related: Vec<ContentItem>,
}

/// A primary content provider with an optional fallback
///
/// When the primary errors, the fallback answers instead and a warning is
/// logged. A primary that answers "not found" is taken at its word.
pub struct Catalog {
    primary: Box<dyn CatalogProvider>,
    fallback: Option<Box<dyn CatalogProvider>>,
}

impl Catalog {
    /// Catalog backed by a single provider
    pub fn new(primary: Box<dyn CatalogProvider>) -> Self {
        Self {
            primary,
            fallback: None,
        }
    }

    /// Add a provider used when the primary fails
    pub fn with_fallback(mut self, fallback: Box<dyn CatalogProvider>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Catalog serving only the built-in samples
    pub fn offline() -> Self {
        Self::new(Box::new(BuiltinCatalog::new()))
    }

    /// Catalog API at `base_url`, optionally falling back to the samples
    pub fn remote(base_url: &str, use_fallback: bool) -> Result<Self> {
        let catalog = Self::new(Box::new(RemoteCatalog::with_base_url(base_url)?));
        Ok(if use_fallback {
            catalog.with_fallback(Box::new(BuiltinCatalog::new()))
        } else {
            catalog
        })
    }

    /// Catalog whose every lookup fails with `reason`
    ///
    /// Stands in when the configured catalog cannot be built, so the rest
    /// of the application still opens.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::new(Box::new(Unavailable {
            reason: reason.into(),
        }))
    }

    /// Display name of the primary provider
    pub fn primary_name(&self) -> &'static str {
        self.primary.name()
    }

    /// List all items
    pub fn list(&self) -> Result<Listing> {
        match self.primary.list() {
            Ok(items) => Ok(Listing {
                items,
                source: self.primary.id(),
                degraded: false,
            }),
            Err(e) => match &self.fallback {
                Some(fallback) => {
                    warn!(
                        "{} unavailable ({e}), serving {}",
                        self.primary.name(),
                        fallback.name()
                    );
                    Ok(Listing {
                        items: fallback.list()?,
                        source: fallback.id(),
                        degraded: true,
                    })
                }
                None => Err(e),
            },
        }
    }

    /// Look up one item by id
    pub fn get(&self, id: &str) -> Result<Option<ContentItem>> {
        Ok(self.lookup(id)?.0)
    }

    /// Look up one item, also reporting whether the fallback answered
    fn lookup(&self, id: &str) -> Result<(Option<ContentItem>, bool)> {
        match self.primary.get(id) {
            Ok(item) => Ok((item, false)),
            Err(e) => match &self.fallback {
                Some(fallback) => {
                    warn!("{} unavailable ({e}), looking up {id:?} in {}", self.primary.name(), fallback.name());
                    Ok((fallback.get(id)?, true))
                }
                None => Err(e),
            },
        }
    }

    /// Items matching `filter`
    pub fn browse(&self, filter: &ContentFilter) -> Result<Listing> {
        let mut listing = self.list()?;
        listing.items.retain(|item| filter.matches(item));
        Ok(listing)
    }

    /// `All` plus every category present in the catalog
    pub fn categories(&self) -> Result<Vec<String>> {
        Ok(categories(&self.list()?.items))
    }

    /// An item together with up to two related items
    ///
    /// Related items only come from the provider that supplied the item.
    /// If the listing was answered by a different provider, or failed, the
    /// item is returned without related items.
    pub fn detail(&self, id: &str) -> Result<Option<ItemDetail>> {
        let (Some(item), degraded) = self.lookup(id)? else {
            return Ok(None);
        };

        let related = match self.list() {
            Ok(listing) if listing.degraded == degraded => {
                related(&listing.items, &item, RELATED_LIMIT)
                    .into_iter()
                    .cloned()
                    .collect()
            }
            Ok(listing) => {
                debug!(source = listing.source, "Listing came from another provider, skipping related items");
                Vec::new()
            }
            Err(e) => {
                warn!("Could not list related items for {id:?}: {e}");
                Vec::new()
            }
        };
        Ok(Some(ItemDetail { item, related }))
    }
}

/// Provider standing in for a catalog that could not be configured
struct Unavailable {
    reason: String,
}

impl CatalogProvider for Unavailable {
    fn name(&self) -> &'static str {
        "Unavailable catalog"
    }

    fn id(&self) -> &'static str {
        "unavailable"
    }

    fn list(&self) -> Result<Vec<ContentItem>> {
        Err(AppError::Config(self.reason.clone()))
    }

    fn get(&self, _id: &str) -> Result<Option<ContentItem>> {
        Err(AppError::Config(self.reason.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A mock provider for testing the catalog
    struct MockProvider {
        items: Vec<ContentItem>,
    }

    impl CatalogProvider for MockProvider {
        fn name(&self) -> &'static str {
            "Mock Provider"
        }

        fn id(&self) -> &'static str {
            "mock"
        }

        fn list(&self) -> Result<Vec<ContentItem>> {
            Ok(self.items.clone())
        }

        fn get(&self, id: &str) -> Result<Option<ContentItem>> {
            Ok(self.items.iter().find(|i| i.id == id).cloned())
        }
    }

    /// A provider that always errors
    struct FailingProvider;

    impl CatalogProvider for FailingProvider {
        fn name(&self) -> &'static str {
            "Failing Provider"
        }

        fn id(&self) -> &'static str {
            "failing"
        }

        fn list(&self) -> Result<Vec<ContentItem>> {
            Err(AppError::Config("server down".to_string()))
        }

        fn get(&self, _id: &str) -> Result<Option<ContentItem>> {
            Err(AppError::Config("server down".to_string()))
        }
    }

    /// A provider that serves single items but cannot list
    struct NoListProvider;

    impl CatalogProvider for NoListProvider {
        fn name(&self) -> &'static str {
            "No-list Provider"
        }

        fn id(&self) -> &'static str {
            "nolist"
        }

        fn list(&self) -> Result<Vec<ContentItem>> {
            Err(AppError::Config("listing down".to_string()))
        }

        fn get(&self, id: &str) -> Result<Option<ContentItem>> {
            Ok(Some(ContentItem::new(id, "Remote only", "Space")))
        }
    }

    fn mock() -> Box<dyn CatalogProvider> {
        Box::new(MockProvider {
            items: vec![
                ContentItem::new("a", "Rover", "Space"),
                ContentItem::new("b", "Probe", "Space"),
                ContentItem::new("c", "Vase", "Art"),
            ],
        })
    }

    #[test]
    fn test_list_from_primary() {
        let catalog = Catalog::new(mock()).with_fallback(Box::new(BuiltinCatalog::new()));
        let listing = catalog.list().unwrap();
        assert_eq!(listing.source, "mock");
        assert!(!listing.degraded);
        assert_eq!(listing.items.len(), 3);
    }

    #[test]
    fn test_list_falls_back() {
        let catalog = Catalog::new(Box::new(FailingProvider)).with_fallback(mock());
        let listing = catalog.list().unwrap();
        assert_eq!(listing.source, "mock");
        assert!(listing.degraded);
    }

    #[test]
    fn test_list_without_fallback_errors() {
        let catalog = Catalog::new(Box::new(FailingProvider));
        assert!(catalog.list().is_err());
        assert!(catalog.get("a").is_err());
    }

    #[test]
    fn test_get_falls_back() {
        let catalog = Catalog::new(Box::new(FailingProvider)).with_fallback(mock());
        assert_eq!(catalog.get("c").unwrap().unwrap().title, "Vase");
    }

    #[test]
    fn test_primary_not_found_is_final() {
        let catalog = Catalog::new(mock()).with_fallback(Box::new(BuiltinCatalog::new()));
        // "1" exists in the built-in samples but not in the primary
        assert!(catalog.get("1").unwrap().is_none());
    }

    #[test]
    fn test_browse_and_categories() {
        let catalog = Catalog::new(mock());
        let listing = catalog.browse(&ContentFilter::new().category("Space")).unwrap();
        assert_eq!(listing.items.len(), 2);
        assert_eq!(catalog.categories().unwrap(), vec!["All", "Space", "Art"]);
    }

    #[test]
    fn test_detail_includes_related() {
        let catalog = Catalog::new(mock());
        let detail = catalog.detail("a").unwrap().unwrap();
        assert_eq!(detail.item.title, "Rover");
        assert_eq!(detail.related.len(), 1);
        assert_eq!(detail.related[0].id, "b");

        assert!(catalog.detail("zzz").unwrap().is_none());
    }

    #[test]
    fn test_detail_skips_related_from_other_provider() {
        // Fallback has "a" and "b" in Space, which must not show up here
        let catalog = Catalog::new(Box::new(NoListProvider)).with_fallback(mock());
        let detail = catalog.detail("x").unwrap().unwrap();
        assert_eq!(detail.item.title, "Remote only");
        assert!(detail.related.is_empty());

        let catalog = Catalog::new(Box::new(NoListProvider));
        let detail = catalog.detail("x").unwrap().unwrap();
        assert!(detail.related.is_empty());
    }

    #[test]
    fn test_detail_from_fallback_uses_fallback_related() {
        let catalog = Catalog::new(Box::new(FailingProvider)).with_fallback(mock());
        let detail = catalog.detail("b").unwrap().unwrap();
        assert_eq!(detail.related.len(), 1);
        assert_eq!(detail.related[0].id, "a");
    }

    #[test]
    fn test_unavailable_catalog_reports_reason() {
        let catalog = Catalog::unavailable("Invalid catalog URL");
        let err = catalog.list().unwrap_err();
        assert_eq!(err.to_string(), "Configuration error: Invalid catalog URL");
        assert!(catalog.detail("1").is_err());
    }

    #[test]
    fn test_offline_catalog() {
        let catalog = Catalog::offline();
        assert_eq!(catalog.primary_name(), "Built-in samples");
        assert_eq!(catalog.list().unwrap().items.len(), 6);
    }
}
