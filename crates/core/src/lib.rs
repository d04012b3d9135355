//! Minimalist Shop Core - Shared types and client-side shop logic.
//!
//! This crate provides the pieces used by both the web storefront and the CLI:
//! - `storefront` - Server-rendered shop (catalog, product detail, cart)
//! - `cli` - Command-line catalog browser with a file-backed cart
//!
//! # Architecture
//!
//! The core crate contains only types, traits and pure logic - no network
//! access and no filesystem access. Persistence goes through the
//! [`cart::KeyValueStore`] trait, implemented by the callers.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs and prices, the product record
//! - [`cart`] - The cart store and its persistence slot
//! - [`catalog`] - Search and category filtering, load state, fallback products

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod types;

pub use types::*;
