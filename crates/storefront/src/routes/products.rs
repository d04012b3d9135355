//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use minimalist_shop_core::{Product, ProductId};
use tower_sessions::Session;
use tracing::instrument;

use super::cart::load_cart;
use super::nav::{NavView, Route};
use crate::error::Result;
use crate::filters;
use crate::state::AppState;

/// Product display data for templates.
#[derive(Debug, Clone)]
pub struct ProductView {
    pub id: String,
    pub href: String,
    pub name: String,
    pub initial: String,
    pub price: String,
    pub category: String,
    pub description: String,
    pub image_url: String,
    pub has_image: bool,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            href: Route::Product(product.id).href(),
            name: product.name.clone(),
            initial: product.initial(),
            price: product.price.to_string(),
            category: product.category().unwrap_or_default().to_string(),
            description: product.description.clone().unwrap_or_default(),
            image_url: product.image_or_placeholder().to_string(),
            has_image: product.image_url.as_deref().is_some_and(|url| !url.is_empty()),
        }
    }
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub nav: NavView,
    pub product: ProductView,
}

/// Product not found page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/not_found.html")]
pub struct ProductNotFoundTemplate {
    pub nav: NavView,
    pub requested: String,
}

/// Display product detail page.
///
/// Unknown or non-numeric identifiers render the "not found" page with a
/// 404 status.
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    Path(raw_id): Path<String>,
) -> Result<Response> {
    let cart = load_cart(&session).await;

    let product = match raw_id.parse::<ProductId>() {
        Ok(id) => state.catalog().find_product(id).await?,
        Err(_) => None,
    };

    let Some(product) = product else {
        tracing::debug!(id = %raw_id, "Product not found");
        return Ok((
            StatusCode::NOT_FOUND,
            ProductNotFoundTemplate {
                nav: NavView::new(&cart, None),
                requested: raw_id,
            },
        )
            .into_response());
    };

    Ok(ProductShowTemplate {
        nav: NavView::new(&cart, Some(Route::Product(product.id))),
        product: ProductView::from(&product),
    }
    .into_response())
}
