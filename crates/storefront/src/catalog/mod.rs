//! Product service client.
//!
//! # Architecture
//!
//! - `reqwest` for HTTP, `serde_json` for decoding
//! - The product service is the source of truth - no local sync
//! - The product list is cached in memory via `moka` (configurable TTL)
//!
//! # Endpoints
//!
//! - `GET {base}/products` - the full catalog as a JSON array
//! - `GET {base}/products/{id}` - a single product (404 when unknown)
//!
//! # Example
//!
//! ```rust,ignore
//! use minimalist_shop_storefront::catalog::CatalogClient;
//!
//! let client = CatalogClient::new(&config.catalog)?;
//! let products = client.fetch_products().await?;
//! ```

mod client;

pub use client::CatalogClient;

use thiserror::Error;

/// Errors that can occur when talking to the product service.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Transport failure: connection refused, timeout, broken body.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("Product service returned HTTP {0}")]
    Status(reqwest::StatusCode),

    /// The response body was not the expected JSON.
    #[error("Malformed product data: {0}")]
    Decode(#[from] serde_json::Error),
}

impl CatalogError {
    /// Whether an immediate retry could plausibly succeed.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}
