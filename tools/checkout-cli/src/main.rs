//! Checkout CLI - the storefront and checkout pages in a terminal.
//!
//! Commands:
//! - `checkout products` - List the catalog
//! - `checkout add` - Add a product to the cart
//! - `checkout remove` - Remove a product from the cart
//! - `checkout update` - Change the quantity of a cart entry
//! - `checkout delivery` - Choose a delivery option for a cart entry
//! - `checkout summary` - Show the order summary
//! - `checkout clear` - Empty the cart
//! - `checkout config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{AddArgs, ClearArgs, ConfigArgs, DeliveryArgs, RemoveArgs, UpdateArgs};

/// Checkout CLI - Browse products and manage your cart
#[derive(Parser)]
#[command(name = "checkout")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Keep the cart in memory instead of on disk
    #[arg(long, global = true)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products in the catalog
    Products,

    /// Add a product to the cart
    Add(AddArgs),

    /// Remove a product from the cart
    Remove(RemoveArgs),

    /// Change the quantity of a cart entry
    Update(UpdateArgs),

    /// Choose a delivery option for a cart entry
    Delivery(DeliveryArgs),

    /// Show the order summary
    Summary,

    /// Remove everything from the cart
    Clear(ClearArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    let ctx = match context::Context::load(cli.config.as_deref(), output.clone(), cli.ephemeral) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    // Execute command
    let result = match cli.command {
        Commands::Products => commands::products::run(&ctx),
        Commands::Add(args) => commands::cart::add(args, &ctx),
        Commands::Remove(args) => commands::cart::remove(args, &ctx),
        Commands::Update(args) => commands::cart::update(args, &ctx),
        Commands::Delivery(args) => commands::cart::delivery(args, &ctx),
        Commands::Summary => commands::summary::run(&ctx),
        Commands::Clear(args) => commands::cart::clear(args, &ctx),
        Commands::Config(args) => commands::config::run(args, &ctx),
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

/// Log to stderr, filtered by `RUST_LOG` or the verbosity flag.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_add_with_quantity() {
        let cli = Cli::parse_from(["checkout", "add", "prod1", "-q", "3", "--json"]);
        assert!(cli.json);
        match cli.command {
            Commands::Add(args) => {
                assert_eq!(args.product_id, "prod1");
                assert_eq!(args.quantity, "3");
            }
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn test_parse_update_without_quantity() {
        let cli = Cli::parse_from(["checkout", "update", "prod1"]);
        match cli.command {
            Commands::Update(args) => assert!(args.quantity.is_none()),
            _ => panic!("expected update"),
        }
    }

    #[test]
    fn test_negative_quantity_reaches_validation() {
        // negative numbers parse as values, so validation can reject them
        let cli = Cli::try_parse_from(["checkout", "update", "prod1", "--", "-2"]).unwrap();
        match cli.command {
            Commands::Update(args) => assert_eq!(args.quantity.as_deref(), Some("-2")),
            _ => panic!("expected update"),
        }
    }
}
