//! Static products shown when the live catalog cannot be fetched.

use crate::types::{Price, Product, ProductId};

fn item(id: i64, name: &str, cents: u32, category: &str, description: &str) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        price: Price::from_unsigned_cents(cents),
        category: Some(category.to_string()),
        description: Some(description.to_string()),
        image_url: None,
    }
}

/// The fallback product list.
#[must_use]
pub fn fallback_products() -> Vec<Product> {
    vec![
        item(
            1,
            "Linen Overshirt",
            6800,
            "Apparel",
            "Relaxed overshirt in washed European linen.",
        ),
        item(
            2,
            "Canvas Tote",
            2400,
            "Accessories",
            "Heavyweight cotton canvas with an inside pocket.",
        ),
        item(
            3,
            "Ceramic Mug",
            1850,
            "Home",
            "Stoneware mug with a matte glaze, 350 ml.",
        ),
        item(
            4,
            "Merino Beanie",
            3200,
            "Accessories",
            "Fine-gauge merino knit, one size.",
        ),
        item(
            5,
            "Oak Desk Tray",
            4500,
            "Home",
            "Solid oak organiser for everyday carry.",
        ),
        item(
            6,
            "Everyday Tee",
            2900,
            "Apparel",
            "Midweight organic cotton crew neck.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::catalog::categories;

    #[test]
    fn test_fallback_ids_are_unique() {
        let products = fallback_products();
        let ids: HashSet<_> = products.iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), products.len());
    }

    #[test]
    fn test_fallback_categories() {
        assert_eq!(
            categories(&fallback_products()),
            vec!["Apparel", "Accessories", "Home"]
        );
    }
}
