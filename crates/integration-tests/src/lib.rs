//! Integration tests for the Fraghead storefront.
//!
//! Each test starts the full application router on an ephemeral port with
//! the catalog fixtures from `crates/storefront/testdata`, and talks to it
//! over HTTP with a cookie-keeping client. No external services are needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p fraghead-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use fraghead_storefront::config::StorefrontConfig;
use fraghead_storefront::state::AppState;
use reqwest::{Client, redirect};

/// Catalog fixture sets under `crates/storefront/testdata`.
#[derive(Debug, Clone, Copy)]
pub enum Fixture {
    /// Both catalog documents and the listing document.
    Catalog,
    /// Only the collection document; the resale fetch fails.
    Partial,
}

impl Fixture {
    const fn dir_name(self) -> &'static str {
        match self {
            Self::Catalog => "catalog",
            Self::Partial => "partial",
        }
    }
}

fn storefront_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../storefront")
}

/// A running storefront and a client with its own cookie jar.
///
/// Clones share the server and the cookie jar, so they act as one visitor.
#[derive(Clone)]
pub struct TestServer {
    pub base_url: String,
    pub client: Client,
}

impl TestServer {
    /// Start a storefront serving `fixture`.
    ///
    /// # Panics
    ///
    /// Panics if the server cannot be configured or bound.
    #[allow(clippy::expect_used)]
    pub async fn spawn(fixture: Fixture) -> Self {
        let storefront = storefront_dir();
        let data_dir = storefront.join("testdata").join(fixture.dir_name());
        let vars = [
            ("STOREFRONT_DATA_DIR", data_dir),
            ("STOREFRONT_STATIC_DIR", storefront.join("static")),
            ("STOREFRONT_CONTENT_DIR", storefront.join("content")),
        ];

        let config = StorefrontConfig::from_lookup(|key| {
            vars.iter()
                .find(|(name, _)| *name == key)
                .map(|(_, path)| path.display().to_string())
        })
        .expect("Failed to build test configuration");

        let state = AppState::new(config).expect("Failed to build application state");
        let app = fraghead_storefront::app(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no address");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test server error");
        });

        let client = Client::builder()
            .cookie_store(true)
            .redirect(redirect::Policy::none())
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: format!("http://{addr}"),
            client,
        }
    }

    /// Absolute URL for a path on the test server.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// GET a path and return the status and body.
    ///
    /// # Panics
    ///
    /// Panics if the request fails.
    #[allow(clippy::expect_used)]
    pub async fn get(&self, path: &str) -> (reqwest::StatusCode, String) {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("GET request failed");
        let status = response.status();
        (status, response.text().await.expect("Failed to read body"))
    }

    /// POST a form the way htmx does and return the response.
    ///
    /// # Panics
    ///
    /// Panics if the request fails.
    #[allow(clippy::expect_used)]
    pub async fn htmx_post(&self, path: &str, form: &[(&str, &str)]) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .header("HX-Request", "true")
            .form(form)
            .send()
            .await
            .expect("POST request failed")
    }

    /// POST a plain form (no htmx) and return the response.
    ///
    /// # Panics
    ///
    /// Panics if the request fails.
    #[allow(clippy::expect_used)]
    pub async fn post(&self, path: &str, form: &[(&str, &str)]) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .form(form)
            .send()
            .await
            .expect("POST request failed")
    }
}

/// Byte offset of `needle` in `haystack`, for ordering assertions.
///
/// # Panics
///
/// Panics if `needle` does not occur.
#[must_use]
pub fn position(haystack: &str, needle: &str) -> usize {
    haystack
        .find(needle)
        .unwrap_or_else(|| panic!("{needle:?} not found in response"))
}
