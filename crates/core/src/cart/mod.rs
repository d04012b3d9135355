//! Client-side shopping cart.
//!
//! A [`CartStore`] holds at most one [`CartLine`] per product, in insertion
//! order, and writes the full line list to its key-value slot after every
//! mutation. Loading never fails: a missing or unreadable slot is an empty
//! cart.
//!
//! # Persisted format
//!
//! The slot holds a JSON array of product records extended with a quantity:
//!
//! ```json
//! [{"id": 1, "name": "Red Shoe", "price": 10.0, "category": "Shoes", "quantity": 2}]
//! ```

pub mod storage;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::types::{Price, Product, ProductId};

pub use storage::{KeyValueStore, MemoryStore, StorageError};

/// Key of the slot the cart is persisted under.
pub const CART_STORAGE_KEY: &str = "cart";

/// One product's quantity entry within the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Snapshot of the product taken when it was first added.
    #[serde(flatten)]
    pub product: Product,
    /// Always at least 1.
    pub quantity: u32,
}

impl CartLine {
    #[must_use]
    pub const fn product_id(&self) -> ProductId {
        self.product.id
    }

    /// Unit price times quantity, unrounded.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price.times(self.quantity)
    }
}

/// Reasons a persisted line list is rejected on load.
#[derive(Debug, Error)]
enum LoadError {
    #[error("storage read failed: {0}")]
    Storage(#[from] StorageError),
    #[error("malformed cart JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("line for product {0} has zero quantity")]
    ZeroQuantity(ProductId),
    #[error("product {0} appears on more than one line")]
    DuplicateLine(ProductId),
}

/// Ordered cart lines backed by a key-value slot.
#[derive(Debug)]
pub struct CartStore<S> {
    lines: Vec<CartLine>,
    storage: S,
}

impl<S: KeyValueStore> CartStore<S> {
    /// An empty cart that will persist into `storage`.
    ///
    /// Does not read or write the slot.
    pub const fn new(storage: S) -> Self {
        Self {
            lines: Vec::new(),
            storage,
        }
    }

    /// Restore the cart persisted in `storage`.
    ///
    /// A missing slot, malformed JSON, or content that breaks the cart's
    /// invariants all yield an empty cart.
    pub fn load(storage: S) -> Self {
        let lines = match read_lines(&storage) {
            Ok(lines) => lines,
            Err(e) => {
                warn!(error = %e, "Discarding persisted cart");
                Vec::new()
            }
        };
        Self { lines, storage }
    }

    /// Write the full line list to the slot.
    ///
    /// Failures are logged and otherwise ignored.
    pub fn save(&mut self) {
        let json = match serde_json::to_string(&self.lines) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "Failed to encode cart");
                return;
            }
        };
        if let Err(e) = self.storage.set(CART_STORAGE_KEY, json) {
            warn!(error = %e, "Failed to persist cart");
        }
    }

    /// Add one unit of `product`.
    ///
    /// Increments the existing line, or appends a new line with quantity 1.
    pub fn add(&mut self, product: &Product) {
        if let Some(line) = self.line_mut(product.id) {
            line.quantity = line.quantity.saturating_add(1);
        } else {
            self.lines.push(CartLine {
                product: product.clone(),
                quantity: 1,
            });
        }
        debug!(product_id = %product.id, "Added to cart");
        self.save();
    }

    /// Remove the line for `id`. No-op if absent.
    pub fn remove(&mut self, id: ProductId) {
        self.lines.retain(|line| line.product.id != id);
        debug!(product_id = %id, "Removed from cart");
        self.save();
    }

    /// Adjust the quantity of the line for `id` by `delta`, never below 1.
    ///
    /// No-op if absent. Use [`Self::remove`] to drop a line.
    pub fn update_quantity(&mut self, id: ProductId, delta: i64) {
        if let Some(line) = self.line_mut(id) {
            let updated = i64::from(line.quantity).saturating_add(delta);
            line.quantity = u32::try_from(updated.max(1)).unwrap_or(u32::MAX);
            debug!(product_id = %id, quantity = line.quantity, "Updated cart quantity");
        }
        self.save();
    }

    /// Lines in display order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// The line for `id`, if present.
    #[must_use]
    pub fn line(&self, id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product.id == id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Sum of quantities across all lines (the navigation badge).
    #[must_use]
    pub fn total_item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Sum of price times quantity, rounded to cents.
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.lines
            .iter()
            .map(CartLine::line_total)
            .sum::<Price>()
            .rounded()
    }

    /// Borrow the backing slot.
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Give back the backing slot.
    pub fn into_storage(self) -> S {
        self.storage
    }

    fn line_mut(&mut self, id: ProductId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.product.id == id)
    }
}

fn read_lines<S: KeyValueStore>(storage: &S) -> Result<Vec<CartLine>, LoadError> {
    let Some(json) = storage.get(CART_STORAGE_KEY)? else {
        return Ok(Vec::new());
    };
    let lines: Vec<CartLine> = serde_json::from_str(&json)?;

    let mut seen = HashSet::with_capacity(lines.len());
    for line in &lines {
        if line.quantity == 0 {
            return Err(LoadError::ZeroQuantity(line.product.id));
        }
        if !seen.insert(line.product.id) {
            return Err(LoadError::DuplicateLine(line.product.id));
        }
    }
    Ok(lines)
}
