//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `SHOP_HOST` - Bind address (default: 127.0.0.1)
//! - `SHOP_PORT` - Listen port (default: 3000)
//! - `SHOP_BASE_URL` - Public URL of the storefront (default: <http://localhost:3000>)
//! - `SHOP_CATALOG_URL` - Product service base URL (default: <http://127.0.0.1:5000/api>)
//! - `SHOP_CATALOG_TIMEOUT_SECS` - Product service request timeout (default: 10)
//! - `SHOP_CATALOG_CACHE_TTL_SECS` - How long a fetched catalog is reused (default: 300)
//! - `SHOP_CATALOG_RETRY` - Retry a failed connection once (default: true)
//! - `SHOP_USE_FALLBACK` - Show the static product list when fetching fails (default: true)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Default product service location.
pub const DEFAULT_CATALOG_URL: &str = "http://127.0.0.1:5000/api";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct ShopConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Product service configuration
    pub catalog: CatalogConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. production, staging)
    pub sentry_environment: Option<String>,
}

/// Product service client configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL; `/products` is appended to it
    pub base_url: Url,
    /// Per-request timeout
    pub timeout: Duration,
    /// Lifetime of a cached product list
    pub cache_ttl: Duration,
    /// Retry once, immediately, on connection failure
    pub retry: bool,
    /// Substitute the static product list when fetching fails
    pub use_fallback: bool,
}

impl ShopConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparsable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparsable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            host: parse_or_default(&lookup, "SHOP_HOST", IpAddr::from([127, 0, 0, 1]))?,
            port: parse_or_default(&lookup, "SHOP_PORT", 3000)?,
            base_url: lookup("SHOP_BASE_URL")
                .unwrap_or_else(|| "http://localhost:3000".to_string()),
            catalog: CatalogConfig::from_lookup(&lookup)?,
            sentry_dsn: lookup("SENTRY_DSN"),
            sentry_environment: lookup("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether cookies should be marked `Secure`.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

impl CatalogConfig {
    /// Defaults pointed at `base_url`.
    #[must_use]
    pub const fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: Duration::from_secs(10),
            cache_ttl: Duration::from_secs(300),
            retry: true,
            use_fallback: true,
        }
    }

    /// Load product service settings from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparsable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build product service settings from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparsable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_url = lookup("SHOP_CATALOG_URL").unwrap_or_else(|| DEFAULT_CATALOG_URL.to_string());
        let base_url = parse_catalog_url(&raw_url)?;
        let defaults = Self::new(base_url);

        Ok(Self {
            timeout: Duration::from_secs(parse_or_default(
                &lookup,
                "SHOP_CATALOG_TIMEOUT_SECS",
                defaults.timeout.as_secs(),
            )?),
            cache_ttl: Duration::from_secs(parse_or_default(
                &lookup,
                "SHOP_CATALOG_CACHE_TTL_SECS",
                defaults.cache_ttl.as_secs(),
            )?),
            retry: parse_bool_or_default(&lookup, "SHOP_CATALOG_RETRY", defaults.retry)?,
            use_fallback: parse_bool_or_default(
                &lookup,
                "SHOP_USE_FALLBACK",
                defaults.use_fallback,
            )?,
            ..defaults
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse the product service URL, requiring http(s).
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for unparsable or non-http URLs.
pub fn parse_catalog_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar("SHOP_CATALOG_URL".to_string(), reason);
    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    Ok(url)
}

/// Parse a variable, falling back to `default` when unset.
fn parse_or_default<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key).map_or(Ok(default), |value| {
        value
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}

/// Parse a boolean flag (`true/false`, `1/0`, `yes/no`), falling back to `default`.
fn parse_bool_or_default(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: bool,
) -> Result<bool, ConfigError> {
    let Some(value) = lookup(key) else {
        return Ok(default);
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("expected a boolean, got '{other}'"),
        )),
    }
}
