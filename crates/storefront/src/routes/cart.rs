//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads;
//! plain form posts are redirected back to the cart page.
//! The cart lines live in the session under [`CART_STORAGE_KEY`], in the
//! same JSON format the CLI writes to disk.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::HeaderMap,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use minimalist_shop_core::ProductId;
use minimalist_shop_core::cart::{CART_STORAGE_KEY, CartLine, CartStore, KeyValueStore, MemoryStore};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use super::nav::{NavView, Route};
use crate::error::{AppError, Result};
use crate::filters;
use crate::state::AppState;

/// Header HTMX sets on its requests.
const HX_REQUEST_HEADER: &str = "hx-request";

/// Event name other page fragments listen for.
const CART_UPDATED_EVENT: &str = "cart-updated";

/// Cart item display data for templates.
#[derive(Debug, Clone)]
pub struct CartItemView {
    pub product_id: String,
    pub href: String,
    pub name: String,
    pub image_url: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
    pub can_decrement: bool,
}

/// Cart display data for templates.
#[derive(Debug, Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u64,
}

impl CartView {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<&CartLine> for CartItemView {
    fn from(line: &CartLine) -> Self {
        Self {
            product_id: line.product.id.to_string(),
            href: Route::Product(line.product.id).href(),
            name: line.product.name.clone(),
            image_url: line.product.image_or_placeholder().to_string(),
            quantity: line.quantity,
            price: line.product.price.to_string(),
            line_price: line.line_total().to_string(),
            can_decrement: line.quantity > 1,
        }
    }
}

impl<S: KeyValueStore> From<&CartStore<S>> for CartView {
    fn from(cart: &CartStore<S>) -> Self {
        Self {
            items: cart.lines().iter().map(CartItemView::from).collect(),
            subtotal: cart.total_price().to_string(),
            item_count: cart.total_item_count(),
        }
    }
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Load the visitor's cart from the session.
///
/// A session read failure is treated like an absent cart.
pub async fn load_cart(session: &Session) -> CartStore<MemoryStore> {
    let stored = session
        .get::<String>(CART_STORAGE_KEY)
        .await
        .unwrap_or_else(|e| {
            tracing::warn!("Failed to read cart from session: {e}");
            None
        });
    CartStore::load(MemoryStore::with_value(CART_STORAGE_KEY, stored))
}

/// Write the cart slot back into the session.
///
/// Fire-and-forget: a failed write is logged, not surfaced.
async fn store_cart(session: &Session, cart: CartStore<MemoryStore>) {
    let mut storage = cart.into_storage();
    if let Some(json) = storage.take(CART_STORAGE_KEY)
        && let Err(e) = session.insert(CART_STORAGE_KEY, json).await
    {
        tracing::error!("Failed to save cart to session: {e}");
    }
}

fn is_htmx(headers: &HeaderMap) -> bool {
    headers.contains_key(HX_REQUEST_HEADER)
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: ProductId,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: ProductId,
    pub delta: i64,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: ProductId,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub nav: NavView,
    pub cart: CartView,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u64,
}

/// Respond to a cart mutation: the items fragment for HTMX, a redirect otherwise.
fn mutation_response(headers: &HeaderMap, cart: CartView) -> Response {
    if is_htmx(headers) {
        (
            AppendHeaders([("HX-Trigger", CART_UPDATED_EVENT)]),
            CartItemsTemplate { cart },
        )
            .into_response()
    } else {
        Redirect::to(&Route::Cart.href()).into_response()
    }
}

/// Display cart page.
#[instrument(skip(session))]
pub async fn show(session: Session) -> impl IntoResponse {
    let cart = load_cart(&session).await;

    CartShowTemplate {
        nav: NavView::new(&cart, Some(Route::Cart)),
        cart: CartView::from(&cart),
    }
}

/// Add one unit of a product to the cart.
///
/// The product is looked up in the catalog so the cart line carries a
/// snapshot of its display fields.
#[instrument(skip(state, session, headers))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let product = state
        .catalog()
        .find_product(form.product_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {}", form.product_id)))?;

    let mut cart = load_cart(&session).await;
    cart.add(&product);
    let count = cart.total_item_count();
    store_cart(&session, cart).await;

    if is_htmx(&headers) {
        Ok((
            AppendHeaders([("HX-Trigger", CART_UPDATED_EVENT)]),
            CartCountTemplate { count },
        )
            .into_response())
    } else {
        Ok(Redirect::to(&Route::Cart.href()).into_response())
    }
}

/// Change a line's quantity by a delta (clamped at 1).
#[instrument(skip(session, headers))]
pub async fn update(
    session: Session,
    headers: HeaderMap,
    Form(form): Form<UpdateCartForm>,
) -> Response {
    let mut cart = load_cart(&session).await;
    cart.update_quantity(form.product_id, form.delta);
    let view = CartView::from(&cart);
    store_cart(&session, cart).await;

    mutation_response(&headers, view)
}

/// Remove a line from the cart.
#[instrument(skip(session, headers))]
pub async fn remove(
    session: Session,
    headers: HeaderMap,
    Form(form): Form<RemoveFromCartForm>,
) -> Response {
    let mut cart = load_cart(&session).await;
    cart.remove(form.product_id);
    let view = CartView::from(&cart);
    store_cart(&session, cart).await;

    mutation_response(&headers, view)
}

/// Get cart count badge (HTMX).
#[instrument(skip(session))]
pub async fn count(session: Session) -> impl IntoResponse {
    let cart = load_cart(&session).await;
    CartCountTemplate {
        count: cart.total_item_count(),
    }
}
