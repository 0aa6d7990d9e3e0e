//! Catalog loading for the storefront.
//!
//! # Architecture
//!
//! - Catalog documents are static JSON files, read from a local directory or
//!   fetched over HTTP relative to a base URL
//! - The decant table merges two documents fetched concurrently; if either
//!   fails, nothing is returned
//! - Successful loads are cached in memory via `moka`; failures are not cached
//!
//! # Example
//!
//! ```rust,ignore
//! use fraghead_storefront::catalog::CatalogClient;
//!
//! let client = CatalogClient::new(&config.catalog);
//!
//! // Collection items first, then resale items
//! let fragrances = client.fragrances().await?;
//!
//! // Flat listing used by /products
//! let products = client.products().await?;
//! ```

mod cache;
mod client;
mod source;

pub use client::CatalogClient;
pub use source::DataSource;

use thiserror::Error;

/// Personal-collection decants.
pub const COLLECTION_FILE: &str = "my-collection.json";

/// Resold official vials.
pub const RESALE_FILE: &str = "resale-samples.json";

/// Flat product listing.
pub const PRODUCTS_FILE: &str = "products.json";

/// Errors that can occur while loading catalog documents.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Reading a local document failed.
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Remote document answered with a non-success status.
    #[error("{url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Document URL could not be built.
    #[error("invalid document URL: {0}")]
    Url(#[from] url::ParseError),

    /// JSON parsing failed.
    #[error("failed to parse {file}: {source}")]
    Parse {
        file: String,
        #[source]
        source: serde_json::Error,
    },
}
