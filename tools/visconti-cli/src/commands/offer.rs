//! Offer commands.

use anyhow::{Context as _, Result};
use chrono::{DateTime, Utc};

use visconti_client::refresh_active_offer;
use visconti_commerce::offer::ActiveOffer;

use super::{OfferArgs, OfferCommand};
use crate::context::Context;

/// Run the offer command.
pub async fn run(args: OfferArgs, ctx: &Context) -> Result<()> {
    match args.command.unwrap_or(OfferCommand::Show) {
        OfferCommand::Refresh => refresh(ctx).await,
        OfferCommand::Show => show(ctx),
    }
}

async fn refresh(ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let cache = ctx.offers()?;

    let spinner = ctx.output.spinner("Checking offers...");
    let result = refresh_active_offer(&client, &cache, Utc::now()).await;
    spinner.finish_and_clear();

    let active = result.context("Failed to fetch offers")?;
    print_offer(active.as_ref(), Utc::now(), ctx);
    Ok(())
}

fn show(ctx: &Context) -> Result<()> {
    let now = Utc::now();
    let active = ctx.offers()?.load_valid(now);
    if active.is_none() && !ctx.output.is_json() {
        ctx.output.debug("Run `visconti offer refresh` to check the backend");
    }
    print_offer(active.as_ref(), now, ctx);
    Ok(())
}

fn print_offer(offer: Option<&ActiveOffer>, now: DateTime<Utc>, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(&offer);
        return;
    }

    let Some(offer) = offer else {
        ctx.output.info("No active offer");
        return;
    };

    ctx.output.header(&offer.title);
    ctx.output.kv("discount", &format!("{}%", offer.percent()));
    ctx.output.kv("expires", &offer.expiry_date.format("%Y-%m-%d %H:%M UTC").to_string());
    ctx.output.kv("status", &offer.expires_label(now));
}
