//! Integration tests for the session-backed cart.

#![allow(clippy::unwrap_used)]

use minimalist_shop_integration_tests::{
    ProductService, ServiceMode, Storefront, catalog_config, post_form, sample_products,
};
use reqwest::{Client, StatusCode};

struct Shop {
    _service: ProductService,
    storefront: Storefront,
    visitor: Client,
}

impl Shop {
    async fn start() -> Self {
        let service = ProductService::start(sample_products(), ServiceMode::Healthy)
            .await
            .unwrap();
        let storefront = Storefront::start(catalog_config(&service.base_url, true).unwrap())
            .await
            .unwrap();
        let visitor = storefront.visitor().unwrap();
        Self {
            _service: service,
            storefront,
            visitor,
        }
    }

    async fn add(&self, product_id: i64) -> reqwest::Response {
        post_form(
            &self.visitor,
            &self.storefront.url("/cart/add"),
            &format!("product_id={product_id}"),
            true,
        )
        .await
        .unwrap()
    }

    async fn update(&self, product_id: i64, delta: i64) -> String {
        let response = post_form(
            &self.visitor,
            &self.storefront.url("/cart/update"),
            &format!("product_id={product_id}&delta={delta}"),
            true,
        )
        .await
        .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        response.text().await.unwrap()
    }

    async fn page(&self, path: &str) -> String {
        self.visitor
            .get(self.storefront.url(path))
            .send()
            .await
            .unwrap()
            .text()
            .await
            .unwrap()
    }
}

// =============================================================================
// Adding
// =============================================================================

#[tokio::test]
async fn test_new_visitor_has_empty_cart() {
    let shop = Shop::start().await;
    let page = shop.page("/cart").await;

    assert!(page.contains("Your cart is empty."));
    assert!(page.contains(r#"<span id="cart-count" class="cart-badge">0</span>"#));
}

#[tokio::test]
async fn test_htmx_add_returns_count_badge_and_trigger() {
    let shop = Shop::start().await;

    let response = shop.add(1).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["hx-trigger"], "cart-updated");
    let body = response.text().await.unwrap();
    assert!(body.contains(">1</span>"));

    let body = shop.add(1).await.text().await.unwrap();
    assert!(body.contains(">2</span>"));

    let count = shop.page("/cart/count").await;
    assert!(count.contains(">2</span>"));
}

#[tokio::test]
async fn test_plain_form_add_redirects_to_cart() {
    let shop = Shop::start().await;

    let response = post_form(
        &shop.visitor,
        &shop.storefront.url("/cart/add"),
        "product_id=2",
        false,
    )
    .await
    .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.url().path(), "/cart");
    let page = response.text().await.unwrap();
    assert!(page.contains("Your Shopping Cart"));
    assert!(page.contains("Hat"));
    assert!(page.contains("Total: $5.50"));
}

#[tokio::test]
async fn test_adding_unknown_product_is_not_found() {
    let shop = Shop::start().await;

    let response = shop.add(999).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(shop.page("/cart").await.contains("Your cart is empty."));
}

#[tokio::test]
async fn test_malformed_form_is_rejected() {
    let shop = Shop::start().await;

    let response = post_form(
        &shop.visitor,
        &shop.storefront.url("/cart/add"),
        "product_id=shoe",
        true,
    )
    .await
    .unwrap();
    assert!(response.status().is_client_error());
}

// =============================================================================
// Totals and quantities
// =============================================================================

#[tokio::test]
async fn test_totals_across_lines() {
    let shop = Shop::start().await;
    shop.add(1).await;
    shop.add(1).await;
    shop.add(2).await;

    let page = shop.page("/cart").await;
    assert!(page.contains("3 item(s)"));
    assert!(page.contains("Total: $25.50"));
    assert!(page.find(">Shoe</a>").unwrap() < page.find(">Hat</a>").unwrap());
}

#[tokio::test]
async fn test_update_quantity_never_drops_below_one() {
    let shop = Shop::start().await;
    shop.add(1).await;

    let fragment = shop.update(1, 2).await;
    assert!(fragment.contains(r#"<div id="cart-items">"#));
    assert!(fragment.contains("Total: $30.00"));

    let fragment = shop.update(1, -10).await;
    assert!(fragment.contains("Total: $10.00"));
    assert!(fragment.contains("1 item(s)"));
}

#[tokio::test]
async fn test_update_for_missing_line_is_a_noop() {
    let shop = Shop::start().await;
    shop.add(2).await;

    let fragment = shop.update(3, 4).await;
    assert!(fragment.contains("Total: $5.50"));
    assert!(!fragment.contains("Sock"));
}

// =============================================================================
// Removing
// =============================================================================

#[tokio::test]
async fn test_remove_line() {
    let shop = Shop::start().await;
    shop.add(1).await;
    shop.add(3).await;

    let response = post_form(
        &shop.visitor,
        &shop.storefront.url("/cart/remove"),
        "product_id=1",
        true,
    )
    .await
    .unwrap();
    assert_eq!(response.headers()["hx-trigger"], "cart-updated");
    let fragment = response.text().await.unwrap();
    assert!(!fragment.contains("Shoe"));
    assert!(fragment.contains("Sock"));

    let response = post_form(
        &shop.visitor,
        &shop.storefront.url("/cart/remove"),
        "product_id=3",
        true,
    )
    .await
    .unwrap();
    assert!(response.text().await.unwrap().contains("Your cart is empty."));
}

// =============================================================================
// Sessions
// =============================================================================

#[tokio::test]
async fn test_visitors_have_separate_carts() {
    let shop = Shop::start().await;
    shop.add(1).await;

    let stranger = shop.storefront.visitor().unwrap();
    let page = stranger
        .get(shop.storefront.url("/cart"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains("Your cart is empty."));
}

#[tokio::test]
async fn test_concurrent_adds_are_all_counted() {
    let shop = Shop::start().await;
    // Establish the session cookie first
    shop.add(1).await;

    let url = shop.storefront.url("/cart/add");
    let mut requests = tokio::task::JoinSet::new();
    for _ in 0..20 {
        let visitor = shop.visitor.clone();
        let url = url.clone();
        requests.spawn(async move {
            post_form(&visitor, &url, "product_id=1", true)
                .await
                .unwrap()
                .status()
        });
    }
    while let Some(status) = requests.join_next().await {
        assert_eq!(status.unwrap(), StatusCode::OK);
    }

    let count = shop.page("/cart/count").await;
    assert!(count.contains(">21</span>"), "lost updates: {count}");
}

#[tokio::test]
async fn test_nav_badge_follows_cart_on_every_page() {
    let shop = Shop::start().await;
    shop.add(2).await;
    shop.add(3).await;

    for path in ["/", "/products/1", "/cart"] {
        let page = shop.page(path).await;
        assert!(
            page.contains(r#"<span id="cart-count" class="cart-badge">2</span>"#),
            "badge missing on {path}"
        );
    }
}
