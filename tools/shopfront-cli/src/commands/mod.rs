//! CLI command implementations.

pub mod cart;
pub mod checkout;
pub mod config;

use clap::{Args, Subcommand};
use shopfront_cart::ProductId;

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: CartCommand,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show cart lines and totals.
    Show,
    /// Add a product to the cart.
    Add(AddArgs),
    /// Add products described as JSON (one object or an array).
    AddJson {
        /// File holding the product JSON, or `-` for stdin.
        file: String,

        /// Quantity of each product.
        #[arg(short, long, default_value = "1")]
        quantity: u32,
    },
    /// Set the quantity of a line.
    Update {
        /// Line key (`product` or `product:variant`).
        key: String,
        /// New quantity (at least 1).
        quantity: u32,
    },
    /// Add one unit to a line.
    Increase {
        /// Line key.
        key: String,
    },
    /// Take one unit from a line (never below 1).
    Decrease {
        /// Line key.
        key: String,
    },
    /// Remove lines by key or product id.
    Remove {
        /// Line key or bare product id.
        key: String,
    },
    /// Empty the cart.
    Clear {
        /// Skip confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
    /// Check whether a product is in the cart.
    Contains {
        /// Product id.
        product: String,
        /// Variant id; without it any variant matches.
        #[arg(long)]
        variant: Option<String>,
    },
}

/// Arguments for the cart add command.
#[derive(Args)]
pub struct AddArgs {
    /// Product id.
    #[arg(long, value_parser = parse_product_id)]
    pub id: String,

    /// Product name.
    #[arg(long)]
    pub name: String,

    /// Unit price (e.g. 749.99).
    #[arg(long)]
    pub price: String,

    /// Image reference.
    #[arg(long)]
    pub image: Option<String>,

    /// Category label.
    #[arg(long)]
    pub category: Option<String>,

    /// Selected variant id.
    #[arg(long)]
    pub variant_id: Option<String>,

    /// Selected variant name.
    #[arg(long, requires = "variant_id")]
    pub variant_name: Option<String>,

    /// Variant price, overriding the product price.
    #[arg(long, requires = "variant_id")]
    pub variant_price: Option<String>,

    /// Quantity to add.
    #[arg(short, long, default_value = "1")]
    pub quantity: u32,
}

fn parse_product_id(id: &str) -> Result<String, String> {
    ProductId::validate(id).map(|()| id.to_string())
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Customer name.
    #[arg(long)]
    pub name: String,

    /// Customer phone.
    #[arg(long)]
    pub phone: String,

    /// Customer email.
    #[arg(long)]
    pub email: Option<String>,

    /// Delivery address.
    #[arg(long)]
    pub address: Option<String>,

    /// Note for the shop.
    #[arg(long)]
    pub notes: Option<String>,

    /// Write the order request to a file instead of stdout.
    #[arg(short, long)]
    pub output: Option<String>,

    /// Empty the cart once the request is written.
    #[arg(long)]
    pub clear: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Get a config value.
    Get {
        /// Config key (dot-separated).
        key: String,
    },
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
