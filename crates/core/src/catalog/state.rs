//! Catalog load lifecycle: `Idle -> Loading -> (Ready | Failed)`.

use std::fmt::Display;

use super::filter::{FilterState, categories};
use crate::types::Product;

/// Where the catalog view is in loading its products.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CatalogState {
    #[default]
    Idle,
    Loading,
    Ready(Vec<Product>),
    Failed {
        /// Inline status message for the user.
        message: String,
        /// Static products shown instead of the live catalog, if enabled.
        fallback: Option<Vec<Product>>,
    },
}

impl CatalogState {
    /// Start (or restart) a fetch.
    pub fn begin(&mut self) {
        *self = Self::Loading;
    }

    /// Record the outcome of the fetch started by [`Self::begin`].
    ///
    /// A completion that arrives while not `Loading` still overwrites the
    /// state; a superseded fetch is harmless.
    pub fn finish<E: Display>(
        &mut self,
        result: Result<Vec<Product>, E>,
        fallback: Option<Vec<Product>>,
    ) {
        *self = match result {
            Ok(products) => Self::Ready(products),
            Err(e) => Self::Failed {
                message: format!("Could not load products: {e}"),
                fallback,
            },
        };
    }

    /// Products the filters run over: the live list, or the fallback list
    /// after a failure. Empty while idle or loading.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        match self {
            Self::Ready(products)
            | Self::Failed {
                fallback: Some(products),
                ..
            } => products,
            Self::Idle | Self::Loading | Self::Failed { fallback: None, .. } => &[],
        }
    }

    /// Filtered products, or nothing if not loaded.
    #[must_use]
    pub fn visible(&self, filter: &FilterState) -> Vec<&Product> {
        filter.apply(self.products())
    }

    /// Categories available for the picker.
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        categories(self.products())
    }

    /// The inline error message, if the fetch failed.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Failed { message, .. } => Some(message),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::Failed { fallback: Some(_), .. })
    }
}
