//! Navigation shell: route paths and the header badge.

use minimalist_shop_core::ProductId;
use minimalist_shop_core::cart::{CartStore, KeyValueStore};

/// A navigable page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Catalog listing (default).
    Catalog,
    /// Cart page.
    Cart,
    /// Product detail page.
    Product(ProductId),
}

impl Route {
    /// Path for links and redirects.
    #[must_use]
    pub fn href(&self) -> String {
        match self {
            Self::Catalog => "/".to_string(),
            Self::Cart => "/cart".to_string(),
            Self::Product(id) => format!("/products/{id}"),
        }
    }
}

/// Data every full page needs for the header.
#[derive(Debug, Clone)]
pub struct NavView {
    /// Sum of quantities in the visitor's cart.
    pub cart_count: u64,
    /// Highlighted page, if any.
    pub active: Option<Route>,
}

impl NavView {
    #[must_use]
    pub fn new<S: KeyValueStore>(cart: &CartStore<S>, active: Option<Route>) -> Self {
        Self {
            cart_count: cart.total_item_count(),
            active,
        }
    }

    #[must_use]
    pub fn catalog_active(&self) -> bool {
        self.active == Some(Route::Catalog)
    }

    #[must_use]
    pub fn cart_active(&self) -> bool {
        self.active == Some(Route::Cart)
    }
}

#[cfg(test)]
mod tests {
    use minimalist_shop_core::cart::MemoryStore;
    use minimalist_shop_core::catalog::fallback_products;

    use super::*;

    #[test]
    fn test_hrefs() {
        assert_eq!(Route::Catalog.href(), "/");
        assert_eq!(Route::Cart.href(), "/cart");
        assert_eq!(Route::Product(ProductId::new(5)).href(), "/products/5");
    }

    #[test]
    fn test_nav_badge_counts_quantities() {
        let mut cart = CartStore::load(MemoryStore::new());
        for product in fallback_products().iter().take(2) {
            cart.add(product);
            cart.add(product);
        }
        let nav = NavView::new(&cart, Some(Route::Cart));
        assert_eq!(nav.cart_count, 4);
        assert!(nav.cart_active());
        assert!(!nav.catalog_active());
    }
}
