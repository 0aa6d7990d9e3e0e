//! Catalog client with in-memory caching.

use std::sync::Arc;

use fraghead_core::ProductId;
use fraghead_core::catalog::listing::find_product;
use fraghead_core::catalog::{Fragrance, FragranceRecord, Product, merge_sources};
use moka::future::Cache;
use tracing::{debug, instrument};

use super::cache::{CacheKey, CacheValue};
use super::source::DataSource;
use super::{COLLECTION_FILE, CatalogError, PRODUCTS_FILE, RESALE_FILE};
use crate::config::CatalogConfig;

/// Loads catalog documents, reusing successful loads until the TTL expires.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    source: DataSource,
    cache: Cache<CacheKey, CacheValue>,
}

impl CatalogClient {
    /// Create a new catalog client.
    #[must_use]
    pub fn new(config: &CatalogConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(16)
            .time_to_live(config.cache_ttl)
            .build();

        Self {
            inner: Arc::new(CatalogClientInner {
                source: DataSource::new(&config.location),
                cache,
            }),
        }
    }

    /// The merged decant catalog: collection items first, then resale items.
    ///
    /// Both documents are fetched concurrently. If either fails the whole load
    /// fails and nothing is cached.
    ///
    /// # Errors
    ///
    /// Returns the first `CatalogError` from either fetch.
    #[instrument(skip(self))]
    pub async fn fragrances(&self) -> Result<Arc<Vec<Fragrance>>, CatalogError> {
        if let Some(CacheValue::Fragrances(catalog)) =
            self.inner.cache.get(&CacheKey::Fragrances).await
        {
            debug!("Fragrance catalog served from cache");
            return Ok(catalog);
        }

        let source = &self.inner.source;
        let (collection, resale) = tokio::try_join!(
            source.fetch_json::<Vec<FragranceRecord>>(COLLECTION_FILE),
            source.fetch_json::<Vec<FragranceRecord>>(RESALE_FILE),
        )?;

        let catalog = Arc::new(merge_sources(collection, resale));
        debug!(items = catalog.len(), "Fragrance catalog loaded");

        self.inner
            .cache
            .insert(CacheKey::Fragrances, CacheValue::Fragrances(catalog.clone()))
            .await;
        Ok(catalog)
    }

    /// The flat product listing.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the listing document cannot be loaded.
    #[instrument(skip(self))]
    pub async fn products(&self) -> Result<Arc<Vec<Product>>, CatalogError> {
        if let Some(CacheValue::Products(products)) =
            self.inner.cache.get(&CacheKey::Products).await
        {
            debug!("Product listing served from cache");
            return Ok(products);
        }

        let products: Arc<Vec<Product>> =
            Arc::new(self.inner.source.fetch_json(PRODUCTS_FILE).await?);
        debug!(items = products.len(), "Product listing loaded");

        self.inner
            .cache
            .insert(CacheKey::Products, CacheValue::Products(products.clone()))
            .await;
        Ok(products)
    }

    /// Look up one listing product by id.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the listing document cannot be loaded. A
    /// missing id is `Ok(None)`.
    pub async fn product(&self, id: ProductId) -> Result<Option<Product>, CatalogError> {
        let products = self.products().await?;
        Ok(find_product(&products, id).cloned())
    }

    /// Drop cached documents so the next request reloads them.
    pub fn invalidate(&self) {
        self.inner.cache.invalidate_all();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::PathBuf;
    use std::time::Duration;

    use fraghead_core::catalog::Provenance;
    use tower_http::services::ServeDir;

    use super::*;
    use crate::config::DataLocation;

    fn testdata(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("testdata")
            .join(name)
    }

    fn client_for(location: DataLocation) -> CatalogClient {
        CatalogClient::new(&CatalogConfig {
            location,
            cache_ttl: Duration::from_secs(60),
        })
    }

    #[tokio::test]
    async fn test_loads_and_merges_local_documents() {
        let client = client_for(DataLocation::Directory(testdata("catalog")));

        let catalog = client.fragrances().await.unwrap();

        let collection = catalog
            .iter()
            .take_while(|f| f.provenance == Provenance::Collection)
            .count();
        assert_eq!(collection, 3);
        assert_eq!(catalog.len(), 5);
        assert!(catalog.iter().skip(3).all(Fragrance::is_official_vial));
        assert_eq!(catalog[0].name, "Rose");
    }

    #[tokio::test]
    async fn test_missing_second_document_fails_whole_load() {
        let client = client_for(DataLocation::Directory(testdata("partial")));

        let err = client.fragrances().await.unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }

    #[tokio::test]
    async fn test_malformed_document_is_parse_error() {
        let client = client_for(DataLocation::Directory(testdata("malformed")));

        let err = client.fragrances().await.unwrap_err();
        assert!(matches!(err, CatalogError::Parse { ref file, .. } if file == RESALE_FILE));
    }

    #[tokio::test]
    async fn test_successful_load_is_cached() {
        let client = client_for(DataLocation::Directory(testdata("catalog")));

        let first = client.fragrances().await.unwrap();
        let second = client.fragrances().await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        client.invalidate();
        let third = client.fragrances().await.unwrap();
        assert!(!Arc::ptr_eq(&first, &third));
        assert_eq!(first, third);
    }

    #[tokio::test]
    async fn test_failed_load_is_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::copy(
            testdata("catalog").join(COLLECTION_FILE),
            dir.path().join(COLLECTION_FILE),
        )
        .unwrap();
        let client = client_for(DataLocation::Directory(dir.path().to_path_buf()));

        assert!(client.fragrances().await.is_err());

        std::fs::copy(
            testdata("catalog").join(RESALE_FILE),
            dir.path().join(RESALE_FILE),
        )
        .unwrap();
        let catalog = client.fragrances().await.unwrap();
        assert_eq!(catalog.len(), 5);
    }

    #[tokio::test]
    async fn test_product_lookup() {
        let client = client_for(DataLocation::Directory(testdata("catalog")));

        let found = client.product(ProductId::new(2)).await.unwrap();
        assert_eq!(found.map(|p| p.name), Some("Desert Oud".to_string()));
        assert!(client.product(ProductId::new(99)).await.unwrap().is_none());
    }

    async fn serve_testdata() -> url::Url {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = axum::Router::new().nest_service("/data", ServeDir::new(testdata("catalog")));
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        url::Url::parse(&format!("http://{addr}/data/")).unwrap()
    }

    #[tokio::test]
    async fn test_loads_remote_documents() {
        let base = serve_testdata().await;
        let client = client_for(DataLocation::Remote(base));

        let catalog = client.fragrances().await.unwrap();
        assert_eq!(catalog.len(), 5);
    }

    #[tokio::test]
    async fn test_remote_not_found_is_status_error() {
        let base = serve_testdata().await.join("missing/").unwrap();
        let client = client_for(DataLocation::Remote(base));

        let err = client.products().await.unwrap_err();
        assert!(matches!(
            err,
            CatalogError::Status { status, .. } if status == reqwest::StatusCode::NOT_FOUND
        ));
    }
}
