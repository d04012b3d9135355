//! Search and category filtering over the fetched catalog.

use serde::{Deserialize, Serialize};

use crate::types::Product;

/// Category value that disables category filtering.
pub const ALL_CATEGORIES: &str = "All";

/// Selected category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum CategoryFilter {
    #[default]
    All,
    Named(String),
}

impl CategoryFilter {
    /// Parse a query-string value. Missing, empty and `"All"` select everything.
    #[must_use]
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("" | ALL_CATEGORIES) => Self::All,
            Some(name) => Self::Named(name.to_string()),
        }
    }

    /// Exact match against the product category; `All` passes everything.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => product.category.as_deref() == Some(name.as_str()),
        }
    }

    /// The name to show in a category picker.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES,
            Self::Named(name) => name,
        }
    }
}

impl From<Option<String>> for CategoryFilter {
    fn from(value: Option<String>) -> Self {
        Self::parse(value.as_deref())
    }
}

impl From<CategoryFilter> for Option<String> {
    fn from(filter: CategoryFilter) -> Self {
        match filter {
            CategoryFilter::All => None,
            CategoryFilter::Named(name) => Some(name),
        }
    }
}

/// Current search text and category selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub category: CategoryFilter,
}

impl FilterState {
    #[must_use]
    pub fn new(search: impl Into<String>, category: CategoryFilter) -> Self {
        Self {
            search: search.into(),
            category,
        }
    }

    /// Case-insensitive substring match of the search text against the name.
    ///
    /// The text is used as typed, surrounding spaces included.
    #[must_use]
    pub fn matches_search(&self, product: &Product) -> bool {
        self.search.is_empty()
            || product
                .name
                .to_lowercase()
                .contains(&self.search.to_lowercase())
    }

    /// Both the category and the search filter pass.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        self.category.matches(product) && self.matches_search(product)
    }

    /// Products that pass, in catalog order.
    #[must_use]
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        products.iter().filter(|p| self.matches(p)).collect()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.search.is_empty() || self.category != CategoryFilter::All
    }
}

/// Distinct non-empty categories in first-seen order.
#[must_use]
pub fn categories(products: &[Product]) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for category in products.iter().filter_map(Product::category) {
        if !found.iter().any(|c| c == category) {
            found.push(category.to_string());
        }
    }
    found
}
