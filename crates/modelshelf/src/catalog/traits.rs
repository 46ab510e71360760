//! Catalog provider trait
//!
//! Defines the interface that every content source implements.

use crate::data::types::ContentItem;
use crate::error::Result;

/// A source of content records
pub trait CatalogProvider: Send + Sync {
    /// Display name for the provider (e.g., "Catalog API")
    fn name(&self) -> &'static str;

    /// Machine-readable identifier (e.g., "remote")
    fn id(&self) -> &'static str;

    /// All content records, newest first when the source knows creation times
    fn list(&self) -> Result<Vec<ContentItem>>;

    /// Look up a single record; `Ok(None)` when the source has no such id
    fn get(&self, id: &str) -> Result<Option<ContentItem>>;
}
