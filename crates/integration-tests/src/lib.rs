//! Integration test harness for Minimalist Shop.
//!
//! Every test runs against real sockets on `127.0.0.1`: a stub product
//! service built with axum, and the storefront router served next to it.
//!
//! ```bash
//! cargo test -p minimalist-shop-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use minimalist_shop_core::{Price, Product, ProductId};
use minimalist_shop_storefront::config::{CatalogConfig, ConfigError, ShopConfig, parse_catalog_url};
use minimalist_shop_storefront::{app, state::AppState};
use tokio::net::TcpListener;

/// Error type for harness setup.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// How the stub product service answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceMode {
    /// Serve the product list.
    Healthy,
    /// Answer every request with 500.
    Failing,
}

#[derive(Clone)]
struct StubState {
    products: Arc<Vec<Product>>,
    mode: ServiceMode,
    hits: Arc<AtomicUsize>,
}

/// A running stub product service.
pub struct ProductService {
    /// Base URL, without a trailing slash (e.g. `http://127.0.0.1:4711/api`).
    pub base_url: String,
    hits: Arc<AtomicUsize>,
}

impl ProductService {
    /// Start a stub service that serves `products` under `/api`.
    ///
    /// # Errors
    ///
    /// Returns an error if no local port can be bound.
    pub async fn start(products: Vec<Product>, mode: ServiceMode) -> Result<Self, BoxError> {
        let hits = Arc::new(AtomicUsize::new(0));
        let state = StubState {
            products: Arc::new(products),
            mode,
            hits: Arc::clone(&hits),
        };

        let api = Router::new()
            .route("/products", get(list_products))
            .route("/products/{id}", get(get_product))
            .with_state(state);
        let router = Router::new().nest("/api", api);

        let addr = serve(router).await?;
        Ok(Self {
            base_url: format!("http://{addr}/api"),
            hits,
        })
    }

    /// Number of requests the service has answered.
    #[must_use]
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

async fn list_products(State(state): State<StubState>) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);
    match state.mode {
        ServiceMode::Healthy => Json(state.products.as_ref().clone()).into_response(),
        ServiceMode::Failing => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

async fn get_product(State(state): State<StubState>, Path(id): Path<i64>) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);
    if state.mode == ServiceMode::Failing {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    state
        .products
        .iter()
        .find(|p| p.id.as_i64() == id)
        .map_or_else(
            || StatusCode::NOT_FOUND.into_response(),
            |p| Json(p.clone()).into_response(),
        )
}

/// Product service settings for tests: short timeout, no cache.
///
/// # Errors
///
/// Returns `ConfigError` if `base_url` is not an http(s) URL.
pub fn catalog_config(base_url: &str, use_fallback: bool) -> Result<CatalogConfig, ConfigError> {
    Ok(CatalogConfig {
        timeout: Duration::from_secs(2),
        cache_ttl: Duration::ZERO,
        use_fallback,
        ..CatalogConfig::new(parse_catalog_url(base_url)?)
    })
}

/// A running storefront.
pub struct Storefront {
    pub base_url: String,
}

impl Storefront {
    /// Serve the storefront against the given product service settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the config is invalid or no local port can be bound.
    pub async fn start(catalog: CatalogConfig) -> Result<Self, BoxError> {
        let mut config = ShopConfig::from_lookup(|_| None)?;
        config.catalog = catalog;

        let state = AppState::new(config)?;
        let addr = serve(app(state)).await?;
        Ok(Self {
            base_url: format!("http://{addr}"),
        })
    }

    /// Absolute URL for a storefront path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// A client with its own cookie jar, i.e. a fresh visitor.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be built.
    pub fn visitor(&self) -> Result<reqwest::Client, reqwest::Error> {
        reqwest::Client::builder().cookie_store(true).build()
    }
}

async fn serve(router: Router) -> Result<std::net::SocketAddr, BoxError> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    Ok(addr)
}

/// Sample catalog served by the stub service.
#[must_use]
pub fn sample_products() -> Vec<Product> {
    let product = |id: i64, name: &str, cents: u32, category: Option<&str>| Product {
        id: ProductId::new(id),
        name: name.to_string(),
        price: Price::from_unsigned_cents(cents),
        category: category.map(String::from),
        description: Some(format!("The {name}.")),
        image_url: None,
    };

    vec![
        product(1, "Shoe", 1000, Some("Footwear")),
        product(2, "Hat", 550, Some("Apparel")),
        product(3, "Sock", 300, Some("Footwear")),
        product(4, "Gift Card", 2500, None),
    ]
}

/// POST a url-encoded form, optionally as an HTMX request.
///
/// # Errors
///
/// Returns the transport error, if any.
pub async fn post_form(
    client: &reqwest::Client,
    url: &str,
    body: &str,
    htmx: bool,
) -> Result<reqwest::Response, reqwest::Error> {
    let mut request = client
        .post(url)
        .header(
            reqwest::header::CONTENT_TYPE,
            "application/x-www-form-urlencoded",
        )
        .body(body.to_string());
    if htmx {
        request = request.header("HX-Request", "true");
    }
    request.send().await
}
