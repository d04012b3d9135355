//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Catalog listing (?q=<search>&category=<name|All>)
//! GET  /health                 - Health check
//!
//! # Products
//! GET  /products/{id}          - Product detail ("not found" page for unknown ids)
//!
//! # Cart (HTMX fragments, redirects for plain form posts)
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add to cart (returns count badge, triggers cart-updated)
//! POST /cart/update            - Change quantity by a delta (returns cart_items fragment)
//! POST /cart/remove            - Remove item (returns cart_items fragment)
//! GET  /cart/count             - Cart count badge (fragment)
//! ```

pub mod cart;
pub mod catalog;
pub mod nav;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Catalog listing
        .route("/", get(catalog::index))
        // Product detail, keyed by the id in the path
        .route("/products/{id}", get(products::show))
        // Cart routes
        .nest("/cart", cart_routes())
}
