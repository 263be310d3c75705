//! CLI command implementations.

pub mod cart;
pub mod config;
pub mod products;
pub mod session;

use clap::{Args, Subcommand};

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    /// Category to browse (e.g. "Dairy & Bakery").
    #[arg(long, default_value = "All")]
    pub category: String,

    /// Search text, matched against name, category and description.
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Show a random featured selection, as on the home page.
    #[arg(long)]
    pub featured: bool,
}

/// Arguments for the add and remove commands.
#[derive(Args)]
pub struct ProductArgs {
    /// Product id.
    pub product_id: String,
}

/// Arguments for the set command.
#[derive(Args)]
pub struct SetArgs {
    /// Cart line id.
    pub line_id: String,

    /// New quantity; zero or less removes the line.
    #[arg(allow_negative_numbers = true)]
    pub quantity: i64,
}

/// Arguments for the drop command.
#[derive(Args)]
pub struct LineArgs {
    /// Cart line id.
    pub line_id: String,
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the login command.
#[derive(Args)]
pub struct LoginArgs {
    /// Email address.
    pub email: String,
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
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
