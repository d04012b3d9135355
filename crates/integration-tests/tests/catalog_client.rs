//! Integration tests for the product service client.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use minimalist_shop_core::ProductId;
use minimalist_shop_integration_tests::{
    ProductService, ServiceMode, catalog_config, sample_products,
};
use minimalist_shop_storefront::catalog::{CatalogClient, CatalogError};

#[tokio::test]
async fn test_fetch_products_preserves_order() {
    let service = ProductService::start(sample_products(), ServiceMode::Healthy)
        .await
        .unwrap();
    let client = CatalogClient::new(&catalog_config(&service.base_url, false).unwrap()).unwrap();

    let products = client.fetch_products().await.unwrap();
    let names: Vec<_> = products.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Shoe", "Hat", "Sock", "Gift Card"]);
}

#[tokio::test]
async fn test_catalog_is_cached_until_invalidated() {
    let service = ProductService::start(sample_products(), ServiceMode::Healthy)
        .await
        .unwrap();
    let config = minimalist_shop_storefront::config::CatalogConfig {
        cache_ttl: Duration::from_secs(60),
        ..catalog_config(&service.base_url, false).unwrap()
    };
    let client = CatalogClient::new(&config).unwrap();

    client.fetch_products().await.unwrap();
    client.fetch_products().await.unwrap();
    assert_eq!(service.hits(), 1);

    // Served from the cached list, no extra request
    let hat = client.fetch_product(ProductId::new(2)).await.unwrap();
    assert_eq!(hat.unwrap().name, "Hat");
    assert_eq!(service.hits(), 1);

    client.invalidate();
    client.fetch_products().await.unwrap();
    assert_eq!(service.hits(), 2);
}

#[tokio::test]
async fn test_fetch_product_missing_is_none() {
    let service = ProductService::start(sample_products(), ServiceMode::Healthy)
        .await
        .unwrap();
    let client = CatalogClient::new(&catalog_config(&service.base_url, false).unwrap()).unwrap();

    assert!(client.fetch_product(ProductId::new(42)).await.unwrap().is_none());
}

#[tokio::test]
async fn test_server_error_is_not_retried() {
    let service = ProductService::start(sample_products(), ServiceMode::Failing)
        .await
        .unwrap();
    let client = CatalogClient::new(&catalog_config(&service.base_url, false).unwrap()).unwrap();

    let err = client.fetch_products().await.unwrap_err();
    assert!(matches!(err, CatalogError::Status(status) if status.as_u16() == 500));
    assert_eq!(service.hits(), 1);
}

#[tokio::test]
async fn test_load_catalog_without_fallback_reports_failure() {
    let service = ProductService::start(sample_products(), ServiceMode::Failing)
        .await
        .unwrap();
    let client = CatalogClient::new(&catalog_config(&service.base_url, false).unwrap()).unwrap();

    let state = client.load_catalog().await;
    assert!(state.products().is_empty());
    assert!(!state.is_fallback());
    assert!(
        state
            .error_message()
            .unwrap()
            .starts_with("Could not load products")
    );
}

#[tokio::test]
async fn test_load_catalog_with_fallback() {
    let service = ProductService::start(sample_products(), ServiceMode::Failing)
        .await
        .unwrap();
    let client = CatalogClient::new(&catalog_config(&service.base_url, true).unwrap()).unwrap();

    let state = client.load_catalog().await;
    assert!(state.is_fallback());
    assert_eq!(state.products().len(), 6);
}
