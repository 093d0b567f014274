//! Command implementations.
//!
//! Commands write their human-readable output to the given writer and
//! return `CliError` for anything the user has to fix.

pub mod cart;
pub mod catalog;

use std::path::{Path, PathBuf};

use educart_core::{Catalog, CatalogError};
use thiserror::Error;

/// Errors reported to the user by the CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Catalog file could not be read.
    #[error("Failed to read catalog {path}: {source}")]
    CatalogRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Catalog file is not a valid catalog.
    #[error("Invalid catalog: {0}")]
    Catalog(#[from] CatalogError),

    /// Item id not present in the catalog.
    #[error("Unknown item: {0}")]
    UnknownItem(String),

    /// Writing output failed.
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

/// Load the catalog from `path`, or the built-in sample when `None`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid catalog.
pub fn load_catalog(path: Option<&Path>) -> Result<Catalog, CliError> {
    let Some(path) = path else {
        return Ok(Catalog::sample());
    };

    let json = std::fs::read_to_string(path).map_err(|source| CliError::CatalogRead {
        path: path.to_path_buf(),
        source,
    })?;
    let catalog = Catalog::from_json(&json)?;
    tracing::debug!(path = %path.display(), items = catalog.len(), "Catalog loaded");
    Ok(catalog)
}
