//! Subcommand implementations.

pub mod cart;
pub mod catalog;

use minimalist_shop_storefront::catalog::CatalogClient;
use minimalist_shop_storefront::config::{CatalogConfig, ConfigError, parse_catalog_url};

/// Errors that can occur while running a command.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Catalog(#[from] minimalist_shop_storefront::catalog::CatalogError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("No product with id {0}")]
    UnknownProduct(minimalist_shop_core::ProductId),
}

/// Build the product service client from the environment, with an optional URL override.
///
/// # Errors
///
/// Returns `CommandError::Config` for invalid settings.
pub fn catalog_client(url_override: Option<&str>) -> Result<CatalogClient, CommandError> {
    let mut config = CatalogConfig::from_env()?;
    if let Some(url) = url_override {
        config.base_url = parse_catalog_url(url)?;
    }
    Ok(CatalogClient::new(&config)?)
}
