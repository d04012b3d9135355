//! Integration tests for catalog listing, filtering and product detail.

#![allow(clippy::unwrap_used)]

use minimalist_shop_integration_tests::{
    ProductService, ServiceMode, Storefront, catalog_config, sample_products,
};
use reqwest::StatusCode;

async fn storefront(mode: ServiceMode, use_fallback: bool) -> (ProductService, Storefront) {
    let service = ProductService::start(sample_products(), mode).await.unwrap();
    let config = catalog_config(&service.base_url, use_fallback).unwrap();
    let storefront = Storefront::start(config).await.unwrap();
    (service, storefront)
}

async fn get_page(storefront: &Storefront, path: &str) -> (StatusCode, String) {
    let response = storefront
        .visitor()
        .unwrap()
        .get(storefront.url(path))
        .send()
        .await
        .unwrap();
    let status = response.status();
    (status, response.text().await.unwrap())
}

fn lists(page: &str, name: &str) -> bool {
    page.contains(&format!(">{name}</a></h3>"))
}

// =============================================================================
// Listing
// =============================================================================

#[tokio::test]
async fn test_health() {
    let (_service, storefront) = storefront(ServiceMode::Healthy, true).await;
    let (status, body) = get_page(&storefront, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn test_index_lists_every_product() {
    let (_service, storefront) = storefront(ServiceMode::Healthy, true).await;
    let (status, page) = get_page(&storefront, "/").await;

    assert_eq!(status, StatusCode::OK);
    for name in ["Shoe", "Hat", "Sock", "Gift Card"] {
        assert!(lists(&page, name), "missing {name}");
    }
    assert!(page.contains("$10.00"));
    assert!(page.contains("$5.50"));
    assert!(!page.contains("status-message"));
}

#[tokio::test]
async fn test_category_options_in_first_seen_order() {
    let (_service, storefront) = storefront(ServiceMode::Healthy, true).await;
    let (_, page) = get_page(&storefront, "/").await;

    let all = page.find(r#"<option value="All""#).unwrap();
    let footwear = page.find(r#"<option value="Footwear""#).unwrap();
    let apparel = page.find(r#"<option value="Apparel""#).unwrap();
    assert!(all < footwear && footwear < apparel);
    assert_eq!(page.matches("<option ").count(), 3);
}

#[tokio::test]
async fn test_search_is_case_insensitive() {
    let (_service, storefront) = storefront(ServiceMode::Healthy, true).await;
    let (_, page) = get_page(&storefront, "/?q=sHo").await;

    assert!(lists(&page, "Shoe"));
    assert!(!lists(&page, "Hat"));
    assert!(!lists(&page, "Sock"));
}

#[tokio::test]
async fn test_category_filter() {
    let (_service, storefront) = storefront(ServiceMode::Healthy, true).await;
    let (_, page) = get_page(&storefront, "/?category=Footwear").await;

    assert!(lists(&page, "Shoe"));
    assert!(lists(&page, "Sock"));
    assert!(!lists(&page, "Hat"));
    assert!(!lists(&page, "Gift Card"));
    assert!(page.contains(r#"<option value="Footwear" selected>"#));
}

#[tokio::test]
async fn test_all_with_empty_search_shows_everything() {
    let (_service, storefront) = storefront(ServiceMode::Healthy, true).await;
    let (_, page) = get_page(&storefront, "/?q=&category=All").await;

    for name in ["Shoe", "Hat", "Sock", "Gift Card"] {
        assert!(lists(&page, name), "missing {name}");
    }
}

#[tokio::test]
async fn test_no_matches_message() {
    let (_service, storefront) = storefront(ServiceMode::Healthy, true).await;
    let (status, page) = get_page(&storefront, "/?q=umbrella").await;

    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("No products match your search."));
}

// =============================================================================
// Product service failures
// =============================================================================

#[tokio::test]
async fn test_failing_service_shows_fallback_products() {
    let (_service, storefront) = storefront(ServiceMode::Failing, true).await;
    let (status, page) = get_page(&storefront, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("Could not load products"));
    assert!(page.contains("Showing our featured products instead."));
    assert!(lists(&page, "Linen Overshirt"));
    assert!(!lists(&page, "Shoe"));
}

#[tokio::test]
async fn test_failing_service_without_fallback_shows_empty_catalog() {
    let (_service, storefront) = storefront(ServiceMode::Failing, false).await;
    let (status, page) = get_page(&storefront, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("Could not load products"));
    assert!(page.contains("No products available."));
    assert!(!page.contains("Showing our featured products instead."));
}

#[tokio::test]
async fn test_unreachable_service_falls_back() {
    let config = catalog_config("http://127.0.0.1:9/api", true).unwrap();
    let storefront = Storefront::start(config).await.unwrap();
    let (status, page) = get_page(&storefront, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(lists(&page, "Canvas Tote"));
}

// =============================================================================
// Product detail
// =============================================================================

#[tokio::test]
async fn test_product_detail() {
    let (_service, storefront) = storefront(ServiceMode::Healthy, true).await;
    let (status, page) = get_page(&storefront, "/products/2").await;

    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("<h1>Hat</h1>"));
    assert!(page.contains("$5.50"));
    assert!(page.contains("The Hat."));
    assert!(page.contains("Back to Shop"));
    assert!(page.contains(r#"name="product_id" value="2""#));
}

#[tokio::test]
async fn test_unknown_product_is_not_found() {
    let (_service, storefront) = storefront(ServiceMode::Healthy, true).await;
    let (status, page) = get_page(&storefront, "/products/999").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(page.contains("Product not found!"));
    assert!(page.contains("Back to Shop"));
}

#[tokio::test]
async fn test_non_numeric_product_id_is_not_found() {
    let (_service, storefront) = storefront(ServiceMode::Healthy, true).await;
    let (status, page) = get_page(&storefront, "/products/abc").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(page.contains("Product not found!"));
    assert!(page.contains(r#"with id "abc""#));
}

#[tokio::test]
async fn test_product_detail_without_fallback_reports_bad_gateway() {
    let (_service, storefront) = storefront(ServiceMode::Failing, false).await;
    let (status, _) = get_page(&storefront, "/products/1").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
}
