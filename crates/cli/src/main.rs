//! EduCart CLI - Browse the catalog and manage a cart from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # List the catalog (bestsellers first)
//! educart catalog
//!
//! # Filter and sort
//! educart catalog --type comic --sort price_asc --digital
//!
//! # Item details
//! educart show wks-001
//!
//! # Cart
//! educart cart add wks-001 --qty 2
//! educart cart show
//! educart checkout
//! ```
//!
//! # Commands
//!
//! - `catalog` - List the filtered, sorted catalog
//! - `show` - Show one item
//! - `cart` - Show or change the cart
//! - `checkout` - Cart summary and payment link
//!
//! # Environment Variables
//!
//! - `EDUCART_STORE` - Key-value store file (default: `.educart/storage.json`)
//! - `EDUCART_CATALOG_PATH` - JSON catalog file (default: built-in sample catalog)
//! - `EDUCART_CHECKOUT_URL` - Payment link printed by `checkout`
//! - `RUST_LOG` - Log filter for diagnostics on stderr (default: warn)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use educart_core::{CartManager, CatalogFilter, PLACEHOLDER_CHECKOUT_URL, SortKey, TypeFilter};

mod commands;
mod store;

use store::{DEFAULT_STORE_PATH, FileStore};

#[derive(Parser)]
#[command(name = "educart")]
#[command(author, version, about = "EduCart catalog and cart")]
struct Cli {
    /// Key-value store file holding the cart
    #[arg(long, global = true, env = "EDUCART_STORE", default_value = DEFAULT_STORE_PATH)]
    store: PathBuf,

    /// JSON catalog file (built-in sample catalog when omitted)
    #[arg(long, global = true, env = "EDUCART_CATALOG_PATH")]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the catalog
    Catalog {
        /// Search titles, descriptions and tags
        #[arg(short, long, default_value = "")]
        query: String,

        /// Item type (`all`, `worksheet`, `course`, `comic`)
        #[arg(short = 't', long = "type", default_value = "all")]
        item_type: TypeFilter,

        /// Sort order (`popular`, `new`, `price_asc`, `price_desc`)
        #[arg(short, long, default_value = "popular")]
        sort: SortKey,

        /// Only digital items
        #[arg(short, long)]
        digital: bool,
    },
    /// Show one item
    Show {
        /// Item id, e.g. `wks-001`
        id: String,
    },
    /// Show or change the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Cart summary and payment link
    Checkout {
        /// External payment link
        #[arg(long, env = "EDUCART_CHECKOUT_URL", default_value = PLACEHOLDER_CHECKOUT_URL)]
        checkout_url: String,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart lines and total
    Show,
    /// Add an item
    Add {
        /// Item id
        id: String,

        /// Quantity to add (0 counts as 1)
        #[arg(short, long, default_value_t = 1)]
        qty: u32,
    },
    /// Remove an item
    Remove {
        /// Item id
        id: String,
    },
    /// Set an item's quantity (values below 1 become 1)
    Set {
        /// Item id
        id: String,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        qty: i64,
    },
    /// Empty the cart
    Clear,
}

fn main() {
    // Load .env file if present (ignore errors if not found)
    let _ = dotenvy::dotenv();

    // Diagnostics go to stderr; stdout is command output
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "warn".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = commands::load_catalog(cli.catalog.as_deref())?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Catalog {
            query,
            item_type,
            sort,
            digital,
        } => {
            let filter = CatalogFilter {
                query,
                item_type,
                only_digital: digital,
            };
            commands::catalog::list(&catalog, &filter, sort, &mut out)?;
        }
        Commands::Show { id } => commands::catalog::show(&catalog, &id, &mut out)?,
        Commands::Cart { action } => {
            let mut manager = CartManager::load(FileStore::new(&cli.store));
            match action {
                CartAction::Show => commands::cart::show(&manager, &catalog, &mut out)?,
                CartAction::Add { id, qty } => {
                    commands::cart::add(&mut manager, &catalog, &id, qty, &mut out)?;
                }
                CartAction::Remove { id } => commands::cart::remove(&mut manager, &id, &mut out)?,
                CartAction::Set { id, qty } => {
                    commands::cart::set(&mut manager, &id, qty, &mut out)?;
                }
                CartAction::Clear => commands::cart::clear(&mut manager, &mut out)?,
            }
        }
        Commands::Checkout { checkout_url } => {
            let manager = CartManager::load(FileStore::new(&cli.store));
            commands::cart::checkout(&manager, &catalog, &checkout_url, &mut out)?;
        }
    }

    out.flush()?;
    Ok(())
}
