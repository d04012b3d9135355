//! Cart commands backed by a file slot.

#![allow(clippy::print_stdout)]

use minimalist_shop_core::ProductId;
use minimalist_shop_core::cart::CartStore;
use minimalist_shop_storefront::catalog::CatalogClient;

use super::CommandError;
use crate::storage::FileStore;

/// Print every line with its subtotal, then the totals.
pub fn show(store: FileStore) {
    let cart = CartStore::load(store);
    print_cart(&cart);
}

/// Add one unit of a product, looked up through the product service.
///
/// # Errors
///
/// Returns `CommandError::UnknownProduct` if the product does not exist.
pub async fn add(
    catalog: &CatalogClient,
    store: FileStore,
    id: ProductId,
) -> Result<(), CommandError> {
    let product = catalog
        .find_product(id)
        .await?
        .ok_or(CommandError::UnknownProduct(id))?;

    let mut cart = CartStore::load(store);
    cart.add(&product);
    println!("Added {} to cart.", product.name);
    print_cart(&cart);
    Ok(())
}

/// Remove a product's line. Unknown ids leave the cart unchanged.
pub fn remove(store: FileStore, id: ProductId) {
    let mut cart = CartStore::load(store);
    cart.remove(id);
    print_cart(&cart);
}

/// Change a line's quantity by `delta`, never dropping below one.
pub fn update(store: FileStore, id: ProductId, delta: i64) {
    let mut cart = CartStore::load(store);
    if cart.line(id).is_none() {
        tracing::warn!(product_id = %id, "Product is not in the cart");
    }
    cart.update_quantity(id, delta);
    print_cart(&cart);
}

fn print_cart(cart: &CartStore<FileStore>) {
    if cart.is_empty() {
        println!("Your cart is empty.");
        return;
    }

    for line in cart.lines() {
        println!(
            "{:>5}  {:<32} {:>3} x {:>9} = {:>10}",
            line.product_id(),
            line.product.name,
            line.quantity,
            line.product.price.to_string(),
            line.line_total().to_string(),
        );
    }
    println!();
    println!("Items: {}", cart.total_item_count());
    println!("Total: {}", cart.total_price());
}
