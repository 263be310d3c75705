//! GrocerEase CLI - browse the catalog and manage the cart from a terminal.
//!
//! Commands:
//! - `grocer products` - List products by category and search text
//! - `grocer cart` - Show the cart
//! - `grocer add` / `grocer remove` - Add or remove one unit of a product
//! - `grocer set` / `grocer drop` - Set a line's quantity or delete it
//! - `grocer checkout` - Place the order
//! - `grocer login` / `grocer logout` / `grocer whoami` - Shopper session
//! - `grocer config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;
mod session;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckoutArgs, ConfigArgs, LineArgs, LoginArgs, ProductArgs, ProductsArgs, SetArgs};

/// Environment variable holding the log filter.
const LOG_ENV: &str = "GROCER_LOG";

/// GrocerEase CLI - Browse groceries and manage your cart
#[derive(Parser)]
#[command(name = "grocer")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products
    Products(ProductsArgs),

    /// Show the cart
    Cart,

    /// Add one unit of a product to the cart
    Add(ProductArgs),

    /// Remove one unit of a product from the cart
    Remove(ProductArgs),

    /// Set the quantity of a cart line
    Set(SetArgs),

    /// Delete a cart line
    Drop(LineArgs),

    /// Place the order and empty the cart
    Checkout(CheckoutArgs),

    /// Log in with an email address
    Login(LoginArgs),

    /// Log out
    Logout,

    /// Show the logged-in shopper
    Whoami,

    /// Manage configuration
    Config(ConfigArgs),
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let output = output::Output::new(cli.json);

    let ctx = match context::Context::load(cli.config.as_deref(), output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Products(args) => commands::products::run(args, &ctx).await,
        Commands::Cart => commands::cart::show(&ctx).await,
        Commands::Add(args) => commands::cart::add(args, &ctx).await,
        Commands::Remove(args) => commands::cart::remove(args, &ctx).await,
        Commands::Set(args) => commands::cart::set(args, &ctx).await,
        Commands::Drop(args) => commands::cart::drop_line(args, &ctx).await,
        Commands::Checkout(args) => commands::cart::checkout(args, &ctx).await,
        Commands::Login(args) => commands::session::login(args, &ctx).await,
        Commands::Logout => commands::session::logout(&ctx).await,
        Commands::Whoami => commands::session::whoami(&ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
