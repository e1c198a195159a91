//! Command-line and environment configuration

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::{
    catalog::{PriceBand, SortOrder, feed::DEFAULT_FEED_BASE_URL},
    products::Category,
};

/// Stride storefront CLI
#[derive(Debug, Parser)]
#[command(name = "stride", about = "Stride storefront CLI", long_about = None)]
pub struct Cli {
    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Product source and storage settings.
    #[command(flatten)]
    pub store: StoreConfig,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(
        long,
        global = true,
        env = "LOG_FORMAT",
        value_enum,
        default_value_t = LogFormat::Compact
    )]
    pub log_format: LogFormat,
}

/// Where products come from and where the cart is kept.
#[derive(Debug, Args)]
pub struct StoreConfig {
    /// Directory holding the persisted cart
    #[arg(long, global = true, env = "STRIDE_DATA_DIR", default_value = ".stride")]
    pub data_dir: PathBuf,

    /// YAML product catalog used when the feed is not requested
    #[arg(
        long,
        global = true,
        env = "STRIDE_CATALOG",
        default_value = "fixtures/products/catalog.yml"
    )]
    pub catalog: PathBuf,

    /// Load products from the remote feed instead of the catalog file
    #[arg(long, global = true)]
    pub feed: bool,

    /// Remote feed base URL
    #[arg(long, global = true, env = "STRIDE_FEED_URL", default_value = DEFAULT_FEED_BASE_URL)]
    pub feed_url: String,
}

impl StoreConfig {
    /// Path of the key-value file backing the cart.
    #[must_use]
    pub fn storage_path(&self) -> PathBuf {
        self.data_dir.join("storage.json")
    }
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Browse the product catalog
    #[command(subcommand)]
    Catalog(CatalogCommand),

    /// Inspect or change the cart
    #[command(subcommand)]
    Cart(CartCommand),

    /// Place an order for the cart contents
    Checkout(CheckoutArgs),
}

/// Catalog subcommands.
#[derive(Debug, Subcommand)]
pub enum CatalogCommand {
    /// List products, optionally filtered and sorted
    List(ListArgs),

    /// Search product names, descriptions and categories
    Search {
        /// Search terms
        query: String,
    },
}

/// Catalog listing options.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Only this category (running, basketball, lifestyle, training)
    #[arg(long)]
    pub category: Option<Category>,

    /// Price band (under-100, 100-200, over-200); repeatable
    #[arg(long = "band")]
    pub bands: Vec<PriceBand>,

    /// Colour; repeatable
    #[arg(long = "color")]
    pub colors: Vec<String>,

    /// Size; repeatable
    #[arg(long = "size")]
    pub sizes: Vec<String>,

    /// Sort order (price-asc, price-desc, newest)
    #[arg(long, default_value = "newest")]
    pub sort: SortOrder,
}

/// Cart subcommands.
#[derive(Debug, Subcommand)]
pub enum CartCommand {
    /// Show the cart
    Show,

    /// Add a product
    Add {
        /// Product identifier
        id: String,

        /// Selected size
        #[arg(long)]
        size: Option<String>,

        /// Number of units
        #[arg(long, default_value_t = 1)]
        quantity: u32,
    },

    /// Remove a product; without --size the first matching line goes
    Remove {
        /// Product identifier
        id: String,

        /// Remove only the line with this size
        #[arg(long)]
        size: Option<String>,
    },

    /// Set a quantity of at least one. Without --size every line of the product changes
    Set {
        /// Product identifier
        id: String,

        /// New quantity
        quantity: u32,

        /// Change only the line with this size
        #[arg(long)]
        size: Option<String>,
    },

    /// Empty the cart
    Clear,
}

/// Shipping details for checkout.
#[derive(Debug, Args)]
pub struct CheckoutArgs {
    /// Full name
    #[arg(long)]
    pub name: String,

    /// Phone number
    #[arg(long)]
    pub phone: String,

    /// Country
    #[arg(long)]
    pub country: String,

    /// Province or wilaya
    #[arg(long)]
    pub province: String,

    /// Home address
    #[arg(long)]
    pub address: String,
}
