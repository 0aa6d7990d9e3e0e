//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_BASE_URL` - Public URL for the storefront (default: <http://localhost:3000>)
//! - `STOREFRONT_DATA_DIR` - Directory holding the catalog JSON documents
//!   (default: crates/storefront/static/data)
//! - `STOREFRONT_DATA_URL` - Base URL to fetch catalog documents from; takes
//!   precedence over `STOREFRONT_DATA_DIR`
//! - `STOREFRONT_CATALOG_TTL_SECS` - How long a loaded catalog is reused (default: 300)
//! - `STOREFRONT_STATIC_DIR` - Static asset directory (default: crates/storefront/static)
//! - `STOREFRONT_CONTENT_DIR` - Markdown content directory (default: crates/storefront/content)
//! - `CHECKOUT_WHATSAPP_NUMBER` - Order destination, digits only (default: 918767578885)
//! - `CHECKOUT_MESSAGING_BASE` - Messaging deep-link base (default: <https://wa.me/>)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_DATA_DIR: &str = "crates/storefront/static/data";
const DEFAULT_STATIC_DIR: &str = "crates/storefront/static";
const DEFAULT_CONTENT_DIR: &str = "crates/storefront/content";
const DEFAULT_WHATSAPP_NUMBER: &str = "918767578885";
const DEFAULT_MESSAGING_BASE: &str = "https://wa.me/";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Where catalog documents come from and how long they are reused
    pub catalog: CatalogConfig,
    /// Checkout hand-off settings
    pub checkout: CheckoutConfig,
    /// Static asset directory served under `/static`
    pub static_dir: PathBuf,
    /// Markdown content directory
    pub content_dir: PathBuf,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Location of the catalog documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataLocation {
    /// Read from a local directory.
    Directory(PathBuf),
    /// Fetch relative to a base URL (always ends with `/`).
    Remote(Url),
}

/// Catalog loading configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub location: DataLocation,
    pub cache_ttl: Duration,
}

/// Checkout hand-off configuration.
#[derive(Debug, Clone)]
pub struct CheckoutConfig {
    /// Messaging deep-link base, e.g. `https://wa.me/`
    pub messaging_base: Url,
    /// Phone number orders are sent to, digits only
    pub destination: String,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Lookup(&lookup);

        let host = env
            .or_default("STOREFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| invalid("STOREFRONT_HOST", &e))?;
        let port = env
            .or_default("STOREFRONT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| invalid("STOREFRONT_PORT", &e))?;
        let base_url = env.or_default("STOREFRONT_BASE_URL", "http://localhost:3000");

        Ok(Self {
            host,
            port,
            base_url,
            catalog: CatalogConfig::from_lookup(&env)?,
            checkout: CheckoutConfig::from_lookup(&env)?,
            static_dir: env.or_default("STOREFRONT_STATIC_DIR", DEFAULT_STATIC_DIR).into(),
            content_dir: env
                .or_default("STOREFRONT_CONTENT_DIR", DEFAULT_CONTENT_DIR)
                .into(),
            sentry_dsn: env.optional("SENTRY_DSN"),
            sentry_environment: env.optional("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the storefront is served over HTTPS.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

impl CatalogConfig {
    fn from_lookup(env: &Lookup<'_>) -> Result<Self, ConfigError> {
        let location = match env.optional("STOREFRONT_DATA_URL") {
            Some(raw) => DataLocation::Remote(
                parse_base_url(&raw).map_err(|e| invalid("STOREFRONT_DATA_URL", &e))?,
            ),
            None => DataLocation::Directory(
                env.or_default("STOREFRONT_DATA_DIR", DEFAULT_DATA_DIR).into(),
            ),
        };
        let ttl_secs = env
            .or_default("STOREFRONT_CATALOG_TTL_SECS", "300")
            .parse::<u64>()
            .map_err(|e| invalid("STOREFRONT_CATALOG_TTL_SECS", &e))?;

        Ok(Self {
            location,
            cache_ttl: Duration::from_secs(ttl_secs),
        })
    }
}

impl CheckoutConfig {
    fn from_lookup(env: &Lookup<'_>) -> Result<Self, ConfigError> {
        let destination = env.or_default("CHECKOUT_WHATSAPP_NUMBER", DEFAULT_WHATSAPP_NUMBER);
        validate_destination(&destination)?;

        let messaging_base = parse_base_url(
            &env.or_default("CHECKOUT_MESSAGING_BASE", DEFAULT_MESSAGING_BASE),
        )
        .map_err(|e| invalid("CHECKOUT_MESSAGING_BASE", &e))?;

        Ok(Self {
            messaging_base,
            destination,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Variable lookup with default handling.
struct Lookup<'a>(&'a dyn Fn(&str) -> Option<String>);

impl Lookup<'_> {
    /// Get an optional variable, treating empty values as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }
}

fn invalid(key: &str, err: &impl ToString) -> ConfigError {
    ConfigError::InvalidEnvVar(key.to_string(), err.to_string())
}

/// Parse a URL used as a base for relative joins, forcing a trailing slash.
fn parse_base_url(raw: &str) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(raw.trim())?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Deep links only accept an international number without `+` or spaces.
fn validate_destination(destination: &str) -> Result<(), ConfigError> {
    if destination.is_empty() || !destination.chars().all(|c| c.is_ascii_digit()) {
        return Err(ConfigError::InvalidEnvVar(
            "CHECKOUT_WHATSAPP_NUMBER".to_string(),
            "must contain digits only, including the country code".to_string(),
        ));
    }
    Ok(())
}
