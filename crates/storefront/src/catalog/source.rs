//! Where catalog documents are read from.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use super::CatalogError;
use crate::config::DataLocation;

/// A directory or base URL holding the catalog documents.
#[derive(Debug, Clone)]
pub enum DataSource {
    Directory(PathBuf),
    Remote { client: reqwest::Client, base: Url },
}

impl DataSource {
    /// Build a source for the configured location.
    #[must_use]
    pub fn new(location: &DataLocation) -> Self {
        match location {
            DataLocation::Directory(dir) => Self::Directory(dir.clone()),
            DataLocation::Remote(base) => Self::Remote {
                client: reqwest::Client::new(),
                base: base.clone(),
            },
        }
    }

    /// Fetch and parse one JSON document.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the document cannot be read, the server
    /// answers with a non-success status, or the body is not valid JSON for `T`.
    #[instrument(skip(self))]
    pub async fn fetch_json<T: DeserializeOwned>(&self, file: &str) -> Result<T, CatalogError> {
        let body = match self {
            Self::Directory(dir) => read_file(&dir.join(file)).await?,
            Self::Remote { client, base } => {
                let url = base.join(file)?;
                let response = client.get(url.clone()).send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(CatalogError::Status {
                        url: url.to_string(),
                        status,
                    });
                }
                response.bytes().await?.to_vec()
            }
        };

        debug!(bytes = body.len(), "Fetched catalog document");

        serde_json::from_slice(&body).map_err(|source| CatalogError::Parse {
            file: file.to_string(),
            source,
        })
    }
}

async fn read_file(path: &Path) -> Result<Vec<u8>, CatalogError> {
    tokio::fs::read(path).await.map_err(|source| CatalogError::Io {
        path: path.display().to_string(),
        source,
    })
}
