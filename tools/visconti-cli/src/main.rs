//! Visconti CLI - the storefront from the terminal.
//!
//! Commands:
//! - `visconti menu` - Show the menu with live offer prices
//! - `visconti cart` - Show and edit the cart, and check out
//! - `visconti offer` - Refresh or show the active offer
//! - `visconti gallery` - List photos of the printed menu
//! - `visconti carousel` - Play a carousel of menu items
//! - `visconti config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{CarouselArgs, CartArgs, ConfigArgs, GalleryArgs, MenuArgs, OfferArgs};

/// Visconti CLI - Browse the menu and manage your order
#[derive(Parser)]
#[command(name = "visconti")]
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

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the menu
    Menu(MenuArgs),

    /// Show or edit the cart
    Cart(CartArgs),

    /// Manage the active offer
    Offer(OfferArgs),

    /// List menu photos
    Gallery(GalleryArgs),

    /// Play an auto-advancing carousel of menu items
    Carousel(CarouselArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = match context::Context::load(config_path, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    ctx.config.logging.init(cli.verbose);
    tracing::debug!(backend = %ctx.config.backend.uri, "Loaded configuration");

    // Execute command
    let result = match cli.command {
        Commands::Menu(args) => commands::menu::run(args, &ctx).await,
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Offer(args) => commands::offer::run(args, &ctx).await,
        Commands::Gallery(args) => commands::gallery::run(args, &ctx).await,
        Commands::Carousel(args) => commands::carousel::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
