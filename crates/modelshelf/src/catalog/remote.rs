//! Catalog API provider
//!
//! Implementation of `CatalogProvider` over the content REST API
//! (`GET /api/content`, `GET /api/content/{id}`).

use crate::data::types::ContentItem;
use crate::error::{AppError, Result};
use crate::network::HttpClient;

use super::traits::CatalogProvider;

use reqwest::Url;
use serde::Deserialize;
use tracing::debug;

/// Path of the content collection below the API base URL
const CONTENT_PATH: &str = "api/content";

// =============================================================================
// Internal API response type (serde)
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiContent {
    #[serde(rename = "_id")]
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    model_url: String,
    #[serde(default)]
    thumbnail_url: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    created_at: Option<String>,
}

impl From<ApiContent> for ContentItem {
    fn from(api: ApiContent) -> Self {
        let mut item = ContentItem::new(api.id, api.title.trim(), api.category.trim())
            .with_description(api.description)
            .with_media(api.model_url, api.thumbnail_url);
        item.created_at = api.created_at;
        item
    }
}

// =============================================================================
// RemoteCatalog
// =============================================================================

/// Content served by the catalog API
pub struct RemoteCatalog {
    client: HttpClient,
    collection_url: Url,
}

impl RemoteCatalog {
    /// Provider against a specific API server, e.g. `https://host:5000`
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let mut base = Url::parse(base_url)
            .map_err(|e| AppError::Config(format!("Invalid catalog URL {base_url:?}: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(AppError::Config(format!(
                "Invalid catalog URL {base_url:?}: not a base URL"
            )));
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let collection_url = base
            .join(CONTENT_PATH)
            .map_err(|e| AppError::Config(format!("Invalid catalog URL {base_url:?}: {e}")))?;

        Ok(Self {
            client: HttpClient::new()?,
            collection_url,
        })
    }

    /// URL of the content collection
    pub fn collection_url(&self) -> &Url {
        &self.collection_url
    }

    /// URL of a single record; the id is percent-encoded as one path segment
    pub fn item_url(&self, id: &str) -> Url {
        let mut url = self.collection_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(id);
        }
        url
    }
}

impl CatalogProvider for RemoteCatalog {
    fn name(&self) -> &'static str {
        "Catalog API"
    }

    fn id(&self) -> &'static str {
        "remote"
    }

    fn list(&self) -> Result<Vec<ContentItem>> {
        let items: Vec<ApiContent> = self.client.get_json(self.collection_url.as_str())?;
        debug!(count = items.len(), url = %self.collection_url, "Fetched catalog");
        Ok(items.into_iter().map(ContentItem::from).collect())
    }

    fn get(&self, id: &str) -> Result<Option<ContentItem>> {
        let url = self.item_url(id);
        let item: Option<ApiContent> = self.client.get_json_optional(url.as_str())?;
        Ok(item.map(ContentItem::from))
    }
}
