//! Catalog browsing commands.

#![allow(clippy::print_stdout)]

use minimalist_shop_core::catalog::{CategoryFilter, FilterState};
use minimalist_shop_core::{Product, ProductId};
use minimalist_shop_storefront::catalog::CatalogClient;

use super::CommandError;

/// List products matching the search text and category.
///
/// # Errors
///
/// Returns `CommandError::Json` if JSON output cannot be serialized.
pub async fn list(
    catalog: &CatalogClient,
    search: &str,
    category: Option<&str>,
    json: bool,
) -> Result<(), CommandError> {
    let state = catalog.load_catalog().await;
    if let Some(message) = state.error_message() {
        tracing::warn!("{message}");
    }

    let filter = FilterState::new(search, CategoryFilter::parse(category));
    let visible = state.visible(&filter);
    if json {
        println!("{}", serde_json::to_string_pretty(&visible)?);
        return Ok(());
    }

    if state.is_fallback() {
        println!("(product service unavailable, showing sample products)");
    }
    if visible.is_empty() {
        println!("No products found.");
        return Ok(());
    }

    for product in visible {
        println!("{}", summary_line(product));
    }
    Ok(())
}

/// List the distinct categories, with "All" first.
pub async fn categories(catalog: &CatalogClient) {
    let state = catalog.load_catalog().await;
    if let Some(message) = state.error_message() {
        tracing::warn!("{message}");
    }

    println!("{}", CategoryFilter::All.as_str());
    for category in state.categories() {
        println!("{category}");
    }
}

/// Print one product's details.
///
/// # Errors
///
/// Returns `CommandError::UnknownProduct` if no product has the id.
pub async fn show(catalog: &CatalogClient, id: ProductId, json: bool) -> Result<(), CommandError> {
    let product = catalog
        .find_product(id)
        .await?
        .ok_or(CommandError::UnknownProduct(id))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&product)?);
        return Ok(());
    }

    println!("{}", product.name);
    println!("  Price:    {}", product.price);
    println!("  Category: {}", product.category().unwrap_or("-"));
    println!("  Image:    {}", product.image_or_placeholder());
    if let Some(description) = &product.description {
        println!();
        println!("{description}");
    }
    Ok(())
}

fn summary_line(product: &Product) -> String {
    format!(
        "{:>5}  {:<32} {:>10}  {}",
        product.id,
        product.name,
        product.price.to_string(),
        product.category().unwrap_or("-"),
    )
}

#[cfg(test)]
mod tests {
    use minimalist_shop_core::catalog::fallback_products;

    use super::*;

    #[test]
    fn test_summary_line_shows_price_and_category() {
        let products = fallback_products();
        let line = summary_line(&products[0]);
        assert!(line.contains("Linen Overshirt"));
        assert!(line.contains("$68.00"));
        assert!(line.ends_with("Apparel"));
    }

    #[test]
    fn test_summary_line_without_category() {
        let mut product = fallback_products().remove(1);
        product.category = None;
        assert!(summary_line(&product).ends_with('-'));
    }
}
