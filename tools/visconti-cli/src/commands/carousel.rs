//! Auto-advancing carousel of menu items.

use std::time::Duration;

use anyhow::{bail, Result};
use chrono::Utc;

use visconti_carousel::{AutoPlayer, Carousel};
use visconti_client::refresh_active_offer;

use super::{fetch_catalog, CarouselArgs};
use crate::context::Context;
use crate::output::format_price;

/// Run the carousel command.
pub async fn run(args: CarouselArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let cache = ctx.offers()?;

    // Menu and offers are independent; fetch both at once.
    let (catalog, offer) = futures::join!(
        fetch_catalog(&client, ctx),
        refresh_active_offer(&client, &cache, Utc::now())
    );
    let catalog = match catalog {
        Ok(catalog) => catalog,
        Err(message) => bail!(message),
    };
    let offer = offer.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "offer refresh failed, using cached offer");
        cache.load_valid(Utc::now())
    });

    let slides: Vec<String> = catalog
        .items()
        .iter()
        .filter(|item| args.category.as_deref().map_or(true, |c| c == item.category))
        .map(|item| {
            let price = format_price(item.price, offer.as_ref().map(|o| o.apply(item.price)));
            format!("{}  {}", item.name, price)
        })
        .collect();

    if slides.is_empty() {
        ctx.output.warn("Nothing to show");
        return Ok(());
    }

    let mut config = ctx.config.carousel.clone();
    if let Some(ms) = args.interval_ms {
        config.auto_advance = Duration::from_millis(ms);
    }
    config.auto_play = true;
    if !config.auto_advances() {
        bail!("The auto-advance interval must be greater than 0 ms");
    }

    let total = slides.len();
    let player = AutoPlayer::start(Carousel::with_config(slides, &config), config);
    let mut index = player.subscribe();

    show_slide(&player, total, ctx);
    if total == 1 {
        ctx.output.debug("Single item, nothing to advance");
        return Ok(());
    }

    let mut shown = 1;
    while shown < args.ticks && index.changed().await.is_ok() {
        show_slide(&player, total, ctx);
        shown += 1;
    }

    Ok(())
}

fn show_slide(player: &AutoPlayer<String>, total: usize, ctx: &Context) {
    let (index, slide) = player.with_carousel(|c| (c.current_index(), c.current().cloned()));
    let Some(slide) = slide else {
        return;
    };

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "index": index, "slide": slide }));
    } else {
        ctx.output.line(&format!("[{}/{}] {}", index + 1, total, slide));
    }
}
