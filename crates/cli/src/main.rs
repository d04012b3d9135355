//! Minimalist Shop CLI - Browse the catalog and manage a local cart.
//!
//! # Usage
//!
//! ```bash
//! # List products, optionally filtered
//! shop-cli products --search shoe --category Shoes
//!
//! # List categories
//! shop-cli categories
//!
//! # Show one product
//! shop-cli show 3
//!
//! # Cart (persisted in --data-dir)
//! shop-cli cart add 3
//! shop-cli cart update 3 -1
//! shop-cli cart remove 3
//! shop-cli cart show
//! ```
//!
//! # Environment Variables
//!
//! - `SHOP_CATALOG_URL` - Product service base URL
//! - `SHOP_DATA_DIR` - Directory holding the cart file
//! - plus the `SHOP_CATALOG_*` settings understood by the storefront

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use minimalist_shop_core::ProductId;

mod commands;
mod storage;

#[derive(Parser)]
#[command(name = "shop-cli")]
#[command(author, version, about = "Minimalist Shop CLI tools")]
struct Cli {
    /// Directory holding the persisted cart
    #[arg(long, global = true, env = "SHOP_DATA_DIR", default_value = ".minimalist-shop")]
    data_dir: PathBuf,

    /// Product service base URL (overrides `SHOP_CATALOG_URL`)
    #[arg(long, global = true)]
    catalog_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products
    Products {
        /// Case-insensitive text to find in product names
        #[arg(short, long, default_value = "")]
        search: String,

        /// Category name, or "All"
        #[arg(short, long)]
        category: Option<String>,

        /// Print the matching products as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the categories present in the catalog
    Categories,
    /// Show one product
    Show {
        /// Product id
        id: ProductId,

        /// Print the product as JSON
        #[arg(long)]
        json: bool,
    },
    /// Manage the local cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart lines and totals
    Show,
    /// Add one unit of a product
    Add {
        /// Product id
        id: ProductId,
    },
    /// Remove a product's line
    Remove {
        /// Product id
        id: ProductId,
    },
    /// Change a line's quantity by a delta (never below 1)
    Update {
        /// Product id
        id: ProductId,
        /// Quantity change, e.g. 2 or -1
        #[arg(allow_hyphen_values = true)]
        delta: i64,
    },
}

#[tokio::main]
async fn main() {
    // Load .env before clap reads SHOP_DATA_DIR
    let _ = dotenvy::dotenv();

    // Logs go to stderr; command output goes to stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let catalog_url = cli.catalog_url.as_deref();
    let store = storage::FileStore::new(cli.data_dir);

    match cli.command {
        Commands::Products {
            search,
            category,
            json,
        } => {
            let catalog = commands::catalog_client(catalog_url)?;
            commands::catalog::list(&catalog, &search, category.as_deref(), json).await?;
        }
        Commands::Categories => {
            let catalog = commands::catalog_client(catalog_url)?;
            commands::catalog::categories(&catalog).await;
        }
        Commands::Show { id, json } => {
            let catalog = commands::catalog_client(catalog_url)?;
            commands::catalog::show(&catalog, id, json).await?;
        }
        // Only adding needs the product service; the other cart commands work offline
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(store),
            CartAction::Add { id } => {
                let catalog = commands::catalog_client(catalog_url)?;
                commands::cart::add(&catalog, store, id).await?;
            }
            CartAction::Remove { id } => commands::cart::remove(store, id),
            CartAction::Update { id, delta } => commands::cart::update(store, id, delta),
        },
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn cli(data_dir: &std::path::Path, args: &[&str]) -> Cli {
        let data_dir = data_dir.to_str().unwrap();
        let base = ["shop-cli", "--data-dir", data_dir, "--catalog-url", "ftp://not-http"];
        Cli::try_parse_from(base.iter().chain(args)).unwrap()
    }

    #[tokio::test]
    async fn test_offline_cart_commands_ignore_bad_catalog_url() {
        let dir = std::env::temp_dir().join(format!("minimalist-shop-offline-{}", std::process::id()));

        assert!(run(cli(&dir, &["cart", "show"])).await.is_ok());
        assert!(run(cli(&dir, &["cart", "update", "1", "-1"])).await.is_ok());
        assert!(run(cli(&dir, &["cart", "remove", "1"])).await.is_ok());

        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn test_catalog_commands_reject_bad_catalog_url() {
        let dir = std::env::temp_dir().join(format!("minimalist-shop-badurl-{}", std::process::id()));

        assert!(run(cli(&dir, &["products"])).await.is_err());
        assert!(run(cli(&dir, &["cart", "add", "1"])).await.is_err());

        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_negative_delta_parses() {
        let cli = Cli::try_parse_from(["shop-cli", "cart", "update", "3", "-2"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Cart {
                action: CartAction::Update { delta: -2, .. }
            }
        ));
    }
}
