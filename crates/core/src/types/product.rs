//! Catalog product records as served by the product service.

use serde::{Deserialize, Serialize};

use super::{Price, ProductId};

/// Image shown when a product has no `image_url`.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/500";

/// A catalog entry.
///
/// Products are immutable once fetched. Fields the service sends but the
/// shop does not use (`stock`, `category_id`) are ignored on decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Product {
    /// Category with empty or whitespace-only values treated as absent.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category
            .as_deref()
            .filter(|category| !category.trim().is_empty())
    }

    /// First character of the name, used as placeholder art.
    #[must_use]
    pub fn initial(&self) -> String {
        self.name
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default()
    }

    /// The product image, or the shared placeholder.
    #[must_use]
    pub fn image_or_placeholder(&self) -> &str {
        self.image_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .unwrap_or(PLACEHOLDER_IMAGE_URL)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_minimal_service_record() {
        let product: Product =
            serde_json::from_str(r#"{"id": 3, "name": "Mug", "price": 8.5}"#).unwrap();
        assert_eq!(product.id, ProductId::new(3));
        assert_eq!(product.price.to_string(), "$8.50");
        assert!(product.category.is_none());
        assert_eq!(product.image_or_placeholder(), PLACEHOLDER_IMAGE_URL);
    }

    #[test]
    fn test_ignores_unknown_backend_fields() {
        let json = r#"{"id": 1, "name": "Lamp", "price": 40, "stock": 3, "category_id": 2,
                       "category": "Home", "image_url": "/img/lamp.png"}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.category(), Some("Home"));
        assert_eq!(product.image_or_placeholder(), "/img/lamp.png");
    }

    #[test]
    fn test_blank_category_is_absent() {
        let product: Product =
            serde_json::from_str(r#"{"id": 1, "name": "x", "price": 1, "category": "  "}"#)
                .unwrap();
        assert_eq!(product.category(), None);
    }

    #[test]
    fn test_missing_required_field_fails() {
        assert!(serde_json::from_str::<Product>(r#"{"id": 1, "price": 1}"#).is_err());
    }

    #[test]
    fn test_initial_uppercases() {
        let product: Product =
            serde_json::from_str(r#"{"id": 1, "name": "ёлка", "price": 1}"#).unwrap();
        assert_eq!(product.initial(), "Ё");
    }
}
