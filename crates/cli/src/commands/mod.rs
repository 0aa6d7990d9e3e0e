//! Command implementations.

pub mod catalog;
pub mod validate;

use std::path::PathBuf;

use fraghead_storefront::catalog::CatalogError;
use fraghead_storefront::config::{CatalogConfig, ConfigError, DataLocation, StorefrontConfig};
use thiserror::Error;
use url::Url;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Environment configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Catalog documents could not be loaded.
    #[error("Failed to load catalog: {0}")]
    Catalog(#[from] CatalogError),

    /// Validation found problems in the documents.
    #[error("{0} problem(s) found in catalog documents")]
    Invalid(usize),
}

/// Catalog settings from the environment, with the source overridden by
/// command-line flags.
///
/// # Errors
///
/// Returns an error if the environment configuration is invalid.
pub fn catalog_config(
    data_dir: Option<PathBuf>,
    data_url: Option<Url>,
) -> Result<CatalogConfig, CommandError> {
    let mut config = StorefrontConfig::from_env()?.catalog;

    if let Some(dir) = data_dir {
        config.location = DataLocation::Directory(dir);
    } else if let Some(mut url) = data_url {
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        config.location = DataLocation::Remote(url);
    }

    Ok(config)
}
