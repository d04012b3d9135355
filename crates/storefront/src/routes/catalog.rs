//! Catalog listing (home page) with search and category filtering.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use minimalist_shop_core::catalog::{ALL_CATEGORIES, CatalogState, CategoryFilter, FilterState};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use super::cart::load_cart;
use super::nav::{NavView, Route};
use super::products::ProductView;
use crate::filters;
use crate::state::AppState;

/// Catalog query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    /// Search text matched against product names.
    pub q: Option<String>,
    /// Category name, or `All`.
    pub category: Option<String>,
}

impl CatalogQuery {
    #[must_use]
    pub fn filter_state(&self) -> FilterState {
        FilterState::new(
            self.q.clone().unwrap_or_default(),
            CategoryFilter::parse(self.category.as_deref()),
        )
    }
}

/// Category picker entry.
#[derive(Debug, Clone)]
pub struct CategoryOption {
    pub name: String,
    pub selected: bool,
}

/// Catalog page template.
#[derive(Template, WebTemplate)]
#[template(path = "catalog/index.html")]
pub struct CatalogIndexTemplate {
    pub nav: NavView,
    pub products: Vec<ProductView>,
    pub search: String,
    pub categories: Vec<CategoryOption>,
    pub status_message: Option<String>,
    pub showing_fallback: bool,
    pub filtered: bool,
}

/// Build the picker: `All` first, then categories in first-seen order.
fn category_options(state: &CatalogState, selected: &CategoryFilter) -> Vec<CategoryOption> {
    std::iter::once(ALL_CATEGORIES.to_string())
        .chain(state.categories())
        .map(|name| CategoryOption {
            selected: name == selected.as_str(),
            name,
        })
        .collect()
}

/// Display the catalog listing.
#[instrument(skip(state, session))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<CatalogQuery>,
) -> impl IntoResponse {
    let cart = load_cart(&session).await;
    let catalog = state.catalog().load_catalog().await;
    let filter = query.filter_state();

    let products = catalog
        .visible(&filter)
        .into_iter()
        .map(ProductView::from)
        .collect();

    CatalogIndexTemplate {
        nav: NavView::new(&cart, Some(Route::Catalog)),
        products,
        categories: category_options(&catalog, &filter.category),
        search: filter.search.clone(),
        status_message: catalog.error_message().map(String::from),
        showing_fallback: catalog.is_fallback(),
        filtered: filter.is_active(),
    }
}
