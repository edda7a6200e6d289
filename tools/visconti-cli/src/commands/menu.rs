//! Menu listing.

use anyhow::{bail, Result};
use chrono::Utc;
use serde::Serialize;

use visconti_commerce::cart::CartEntry;
use visconti_commerce::catalog::CatalogItem;
use visconti_commerce::ids::ItemId;
use visconti_commerce::Money;

use super::{by_category, fetch_catalog, MenuArgs};
use crate::context::Context;
use crate::output::{format_price, truncate};

#[derive(Serialize)]
struct MenuLine<'a> {
    id: &'a ItemId,
    name: &'a str,
    category: &'a str,
    price: Money,
    offer_price: Option<Money>,
    in_cart: u32,
}

/// Run the menu command.
pub async fn run(args: MenuArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let catalog = match fetch_catalog(&client, ctx).await {
        Ok(catalog) => catalog,
        Err(message) => {
            ctx.output.info("Run the command again to try again.");
            bail!(message);
        }
    };

    let offer = ctx.offers()?.load_valid(Utc::now());
    let entries = ctx.cart()?.entries();
    let groups = by_category(&catalog, args.category.as_deref());

    if ctx.output.is_json() {
        let lines: Vec<MenuLine> = groups
            .iter()
            .flat_map(|(_, items)| items.iter())
            .map(|item| MenuLine {
                id: &item.id,
                name: &item.name,
                category: &item.category,
                price: item.price,
                offer_price: offer.as_ref().map(|o| o.apply(item.price)),
                in_cart: in_cart(&entries, item),
            })
            .collect();
        ctx.output.json(&lines);
        return Ok(());
    }

    if groups.is_empty() {
        match args.category {
            Some(category) => ctx.output.warn(&format!("No items in category '{}'", category)),
            None => ctx.output.warn("The menu is empty"),
        }
        return Ok(());
    }

    if let Some(ref offer) = offer {
        ctx.output.success(&format!(
            "{} - {}% off ({})",
            offer.title,
            offer.percent(),
            offer.expires_label(Utc::now())
        ));
    }

    for (category, items) in &groups {
        ctx.output.header(category);
        for item in items {
            print_item(ctx, item, offer.as_ref().map(|o| o.apply(item.price)), in_cart(&entries, item));
        }
    }

    ctx.output.line("");
    ctx.output.info(&format!(
        "{} items. Add one with `visconti cart add <id>`.",
        groups.iter().map(|(_, items)| items.len()).sum::<usize>()
    ));

    Ok(())
}

/// Units of `item` in the cart, under either of its ids.
fn in_cart(entries: &[CartEntry], item: &CatalogItem) -> u32 {
    entries
        .iter()
        .filter(|entry| item.matches(&entry.id))
        .fold(0u32, |acc, entry| acc.saturating_add(entry.qty))
}

fn print_item(ctx: &Context, item: &CatalogItem, offer_price: Option<Money>, in_cart: u32) {
    let price = format_price(item.price, offer_price);
    let badge = if in_cart > 0 {
        format!("  [{} in cart]", in_cart)
    } else {
        String::new()
    };
    ctx.output.list_item(&format!("{}  {}{}", item.name, price, badge));
    ctx.output.kv("id", item.id.as_str());
    if !item.description.is_empty() {
        ctx.output.kv("about", &truncate(&item.description, 72));
    }
}
