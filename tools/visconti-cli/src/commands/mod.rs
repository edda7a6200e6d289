//! CLI command implementations.

pub mod carousel;
pub mod cart;
pub mod config;
pub mod gallery;
pub mod menu;
pub mod offer;

use anyhow::Result;
use clap::{Args, Subcommand};

use visconti_client::{load_catalog, FetchState, MenuSource};
use visconti_commerce::catalog::Catalog;

use crate::context::Context;

/// Arguments for the menu command.
#[derive(Args)]
pub struct MenuArgs {
    /// Only show this category.
    #[arg(short = 'C', long)]
    pub category: Option<String>,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart with prices.
    Show,
    /// Add one of an item.
    Add {
        /// Menu item ID.
        id: String,
    },
    /// Take one of an item away.
    Dec {
        /// Menu item ID.
        id: String,
    },
    /// Remove an item entirely.
    Remove {
        /// Menu item ID.
        id: String,
    },
    /// Empty the cart.
    Clear {
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
    /// Print the order summary to phone in.
    Checkout {
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,

        /// Keep the cart after checkout.
        #[arg(long)]
        keep: bool,
    },
}

/// Arguments for the offer command.
#[derive(Args)]
pub struct OfferArgs {
    #[command(subcommand)]
    pub command: Option<OfferCommand>,
}

#[derive(Subcommand)]
pub enum OfferCommand {
    /// Fetch offers and cache the active one.
    Refresh,
    /// Show the cached offer.
    Show,
}

/// Arguments for the gallery command.
#[derive(Args)]
pub struct GalleryArgs {
    /// Show only the newest N photos.
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for the carousel command.
#[derive(Args)]
pub struct CarouselArgs {
    /// Number of slides to show before stopping.
    #[arg(short, long, default_value = "5")]
    pub ticks: usize,

    /// Only use items from this category.
    #[arg(short = 'C', long)]
    pub category: Option<String>,

    /// Auto-advance interval in milliseconds (overrides config).
    #[arg(long)]
    pub interval_ms: Option<u64>,
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

/// Fetch the menu behind a spinner.
///
/// Returns the failure message on error so callers can decide whether the
/// menu is required.
pub(crate) async fn fetch_catalog<S>(source: &S, ctx: &Context) -> Result<Catalog, String>
where
    S: MenuSource + ?Sized,
{
    let spinner = ctx.output.spinner("Fetching menu...");
    let mut state = FetchState::Idle;
    load_catalog(source, &mut state).await;
    spinner.finish_and_clear();

    match state {
        FetchState::Ready(catalog) => Ok(catalog),
        FetchState::Failed { message } => Err(message),
        _ => Err(visconti_client::MENU_FETCH_FAILED.to_string()),
    }
}

/// Group catalog items by category, keeping the order categories first appear in.
pub(crate) fn by_category<'a>(
    catalog: &'a Catalog,
    only: Option<&str>,
) -> Vec<(&'a str, Vec<&'a visconti_commerce::catalog::CatalogItem>)> {
    let mut groups: Vec<(&str, Vec<_>)> = Vec::new();
    for item in catalog.items() {
        if only.is_some_and(|c| c != item.category) {
            continue;
        }
        match groups.iter_mut().find(|(name, _)| *name == item.category) {
            Some((_, items)) => items.push(item),
            None => groups.push((item.category.as_str(), vec![item])),
        }
    }
    groups
}
