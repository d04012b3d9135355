//! Catalog view logic that does not depend on how products are fetched.
//!
//! - [`filter`] - search text and category filtering, category derivation
//! - [`state`] - the load lifecycle a catalog view moves through
//! - [`fallback`] - the static product list used when fetching fails

pub mod fallback;
pub mod filter;
pub mod state;

pub use fallback::fallback_products;
pub use filter::{ALL_CATEGORIES, CategoryFilter, FilterState, categories};
pub use state::CatalogState;
