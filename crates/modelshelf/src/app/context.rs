//! Application context
//!
//! Owns settings, liked items and the catalog for one session. Front ends
//! get it by reference; nothing here is global.

use std::path::PathBuf;

use tracing::{info, warn};

use crate::catalog::Catalog;
use crate::config::storage::SETTINGS_FILE;
use crate::data::favorites::{FavoritesStore, Toggle};
use crate::data::settings::Settings;
use crate::data::storage::{self, FileStore, KeyValueStore};
use crate::error::{AppError, Result};
use crate::share::{self, SharePlatform, ShareOutcome, ShareRequest};

/// How [`AppContext::open`] sets things up
#[derive(Debug, Default, Clone)]
pub struct OpenOptions {
    /// Data directory; defaults to the platform config directory
    pub data_dir: Option<PathBuf>,
    /// Use only the built-in catalog
    pub offline: bool,
}

/// Session state shared by the front end's views
pub struct AppContext<S: KeyValueStore> {
    settings: Settings,
    /// Where settings are saved; `None` keeps them in memory only
    settings_path: Option<PathBuf>,
    favorites: FavoritesStore<S>,
    catalog: Catalog,
}

impl AppContext<FileStore> {
    /// Open the context on disk: settings file, liked items, catalog
    pub fn open(options: OpenOptions) -> Result<Self> {
        let dir = match options.data_dir {
            Some(dir) => dir,
            None => storage::data_dir()?,
        };
        let settings_path = dir.join(SETTINGS_FILE);

        let settings = Settings::load_from(&settings_path).unwrap_or_else(|e| {
            warn!("Ignoring unreadable settings: {e}");
            Settings::default()
        });

        let catalog = if options.offline {
            Catalog::offline()
        } else {
            open_catalog(&settings)
        };

        info!(dir = %dir.display(), catalog = catalog.primary_name(), "Opened data directory");

        let mut context = Self::new(settings, FileStore::new(dir), catalog);
        context.settings_path = Some(settings_path);
        Ok(context)
    }
}

/// Build the configured catalog; a bad API URL never stops the session
fn open_catalog(settings: &Settings) -> Catalog {
    let base_url = settings.effective_api_base_url();
    match Catalog::remote(&base_url, settings.use_fallback_catalog) {
        Ok(catalog) => catalog,
        Err(e) if settings.use_fallback_catalog => {
            warn!("{e}; serving the built-in catalog");
            Catalog::offline()
        }
        Err(e) => {
            warn!("{e}; catalog is unavailable");
            let reason = match e {
                AppError::Config(msg) => msg,
                other => other.to_string(),
            };
            Catalog::unavailable(reason)
        }
    }
}

impl<S: KeyValueStore> AppContext<S> {
    /// Build a context from parts; liked items are restored from `store`
    pub fn new(settings: Settings, store: S, catalog: Catalog) -> Self {
        Self {
            settings,
            settings_path: None,
            favorites: FavoritesStore::restore(store),
            catalog,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// Persist settings, if this context has a settings file
    pub fn save_settings(&self) -> Result<()> {
        match &self.settings_path {
            Some(path) => self.settings.save_to(path),
            None => Ok(()),
        }
    }

    pub fn favorites(&self) -> &FavoritesStore<S> {
        &self.favorites
    }

    pub fn favorites_mut(&mut self) -> &mut FavoritesStore<S> {
        &mut self.favorites
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Like or unlike the item with `id`
    ///
    /// Unliking uses the saved copy, so it works for items that have left
    /// the catalog. Liking needs the catalog record.
    pub fn toggle_like(&mut self, id: &str) -> Result<Toggle> {
        if let Some(liked) = self.favorites.get(id).cloned() {
            return Ok(self.favorites.toggle(liked));
        }

        let item = self
            .catalog
            .get(id)?
            .ok_or_else(|| AppError::NotFound(format!("Content with ID '{id}'")))?;
        Ok(self.favorites.toggle(item.into()))
    }

    /// Share the item with `id`, from the catalog or the liked list
    pub fn share_item(&self, id: &str, platform: &dyn SharePlatform) -> Result<ShareOutcome> {
        let origin = &self.settings.share_origin;
        let request = match self.favorites.get(id) {
            Some(liked) => ShareRequest::for_liked(origin, liked),
            None => {
                let item = self
                    .catalog
                    .get(id)?
                    .ok_or_else(|| AppError::NotFound(format!("Content with ID '{id}'")))?;
                ShareRequest::for_item(origin, &item)
            }
        };
        share::share(platform, &request)
    }

    /// End the session, retrying a failed liked-items write once
    ///
    /// Returns the persistence backend.
    pub fn shutdown(mut self) -> S {
        if self.favorites.is_dirty() {
            if let Err(e) = self.favorites.flush() {
                warn!("Liked items could not be saved before exit: {e}");
            }
        }
        self.favorites.into_backend()
    }
}
