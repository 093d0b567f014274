//! Application state shared across handlers.

use std::path::PathBuf;
use std::sync::Arc;

use educart_core::{Catalog, CatalogError};

use crate::config::StorefrontConfig;
use crate::site::SiteInfo;

/// Error building application state at startup.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("failed to read catalog {path}: {source}")]
    CatalogRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid catalog: {0}")]
    Catalog(#[from] CatalogError),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The catalog inside is built
/// once and never mutated; per-visitor cart state lives in the session.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    site: SiteInfo,
}

impl AppState {
    /// Create a new application state, loading the catalog named by the
    /// configuration (or the built-in sample catalog).
    ///
    /// # Errors
    ///
    /// Returns an error if the configured catalog file cannot be read or is
    /// not a valid catalog.
    pub fn new(config: StorefrontConfig) -> Result<Self, StateError> {
        let catalog = match &config.catalog_path {
            Some(path) => {
                let json = std::fs::read_to_string(path).map_err(|source| {
                    StateError::CatalogRead {
                        path: path.clone(),
                        source,
                    }
                })?;
                let catalog = Catalog::from_json(&json)?;
                tracing::info!(path = %path.display(), items = catalog.len(), "Catalog loaded");
                catalog
            }
            None => {
                let catalog = Catalog::sample();
                tracing::info!(items = catalog.len(), "Using built-in sample catalog");
                catalog
            }
        };

        Ok(Self::with_catalog(config, catalog))
    }

    /// Create application state around an already-built catalog.
    #[must_use]
    pub fn with_catalog(config: StorefrontConfig, catalog: Catalog) -> Self {
        let site = SiteInfo::new(config.checkout_url.clone());
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                site,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get a reference to the site content.
    #[must_use]
    pub fn site(&self) -> &SiteInfo {
        &self.inner.site
    }
}
