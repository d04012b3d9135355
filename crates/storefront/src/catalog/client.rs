//! HTTP client for the product service.

use std::sync::Arc;

use minimalist_shop_core::catalog::{CatalogState, fallback_products};
use minimalist_shop_core::{Product, ProductId};
use moka::future::Cache;
use reqwest::StatusCode;
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use super::CatalogError;
use crate::config::CatalogConfig;

/// Cache key for product service responses.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
enum CacheKey {
    Products,
}

/// Client for the product service.
///
/// Cheap to clone; clones share the HTTP connection pool and the cache.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: String,
    retry: bool,
    use_fallback: bool,
    cache: Option<Cache<CacheKey, Arc<Vec<Product>>>>,
}

impl CatalogClient {
    /// Create a new product service client.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Network` if the HTTP client cannot be built.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;

        let cache = (!config.cache_ttl.is_zero()).then(|| {
            Cache::builder()
                .max_capacity(16)
                .time_to_live(config.cache_ttl)
                .build()
        });

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client,
                base_url: config.base_url.as_str().trim_end_matches('/').to_string(),
                retry: config.retry,
                use_fallback: config.use_fallback,
                cache,
            }),
        })
    }

    /// Fetch the full catalog.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` on transport failure, a non-success status, or
    /// a body that is not a JSON array of products.
    #[instrument(skip(self))]
    pub async fn fetch_products(&self) -> Result<Arc<Vec<Product>>, CatalogError> {
        if let Some(products) = self.cached_products().await {
            debug!(count = products.len(), "Catalog served from cache");
            return Ok(products);
        }

        let url = format!("{}/products", self.inner.base_url);
        let products: Arc<Vec<Product>> = Arc::new(self.get_json(&url).await?);
        debug!(count = products.len(), "Catalog fetched");

        if let Some(cache) = &self.inner.cache {
            cache.insert(CacheKey::Products, Arc::clone(&products)).await;
        }
        Ok(products)
    }

    /// Look up one product.
    ///
    /// Consults the cached catalog first, then the single-product endpoint.
    /// Returns `Ok(None)` when the service answers 404.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` on transport failure, an unexpected status, or
    /// a malformed body.
    #[instrument(skip(self))]
    pub async fn fetch_product(&self, id: ProductId) -> Result<Option<Product>, CatalogError> {
        if let Some(products) = self.cached_products().await
            && let Some(product) = products.iter().find(|p| p.id == id)
        {
            return Ok(Some(product.clone()));
        }

        let url = format!("{}/products/{id}", self.inner.base_url);
        match self.get_json::<Product>(&url).await {
            Ok(product) => Ok(Some(product)),
            Err(CatalogError::Status(StatusCode::NOT_FOUND)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Run a catalog fetch through the view load lifecycle.
    ///
    /// On failure the state carries the static fallback list when enabled.
    #[instrument(skip(self))]
    pub async fn load_catalog(&self) -> CatalogState {
        let mut state = CatalogState::default();
        state.begin();
        let result = self
            .fetch_products()
            .await
            .map(|products| products.as_ref().clone());
        if let Err(e) = &result {
            warn!(error = %e, fallback = self.inner.use_fallback, "Catalog fetch failed");
        }
        let fallback = self.inner.use_fallback.then(fallback_products);
        state.finish(result, fallback);
        state
    }

    /// Look up a product the way the detail view does: live service first,
    /// then the fallback list if fetching failed and fallback is enabled.
    ///
    /// # Errors
    ///
    /// Returns the fetch error when fallback is disabled.
    pub async fn find_product(&self, id: ProductId) -> Result<Option<Product>, CatalogError> {
        match self.fetch_product(id).await {
            Ok(found) => Ok(found),
            Err(e) if self.inner.use_fallback => {
                warn!(error = %e, product_id = %id, "Product lookup failed, using fallback list");
                Ok(fallback_products().into_iter().find(|p| p.id == id))
            }
            Err(e) => Err(e),
        }
    }

    /// Drop the cached catalog so the next fetch goes to the service.
    pub fn invalidate(&self) {
        if let Some(cache) = &self.inner.cache {
            cache.invalidate_all();
        }
    }

    async fn cached_products(&self) -> Option<Arc<Vec<Product>>> {
        match &self.inner.cache {
            Some(cache) => cache.get(&CacheKey::Products).await,
            None => None,
        }
    }

    /// GET and decode, retrying once on a transport failure if enabled.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, CatalogError> {
        match self.get_json_once(url).await {
            Err(e) if self.inner.retry && e.is_transient() => {
                warn!(error = %e, url, "Product service request failed, retrying once");
                self.get_json_once(url).await
            }
            result => result,
        }
    }

    async fn get_json_once<T: DeserializeOwned>(&self, url: &str) -> Result<T, CatalogError> {
        let response = self
            .inner
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            debug!(status = %status, url, "Product service returned non-success status");
            return Err(CatalogError::Status(status));
        }

        // Read as text first so decode failures stay distinct from transport failures
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            warn!(
                error = %e,
                body = %body.chars().take(200).collect::<String>(),
                "Failed to decode product service response"
            );
            CatalogError::Decode(e)
        })
    }
}
