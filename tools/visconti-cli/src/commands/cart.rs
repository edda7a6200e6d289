//! Cart commands.

use anyhow::{Context as _, Result};
use chrono::Utc;
use dialoguer::Confirm;
use serde::Serialize;

use visconti_commerce::cart::{CartPricing, CartService};
use visconti_commerce::catalog::Catalog;
use visconti_commerce::ids::ItemId;

use super::{fetch_catalog, CartArgs, CartCommand};
use crate::context::Context;
use crate::output::format_price;

/// Phone number printed at the end of the order summary.
pub const ORDER_PHONE: &str = "+39 0382 458734";

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let cart = ctx.cart()?;

    match args.command.unwrap_or(CartCommand::Show) {
        CartCommand::Show => show(&cart, ctx).await,
        CartCommand::Add { id } => add(&cart, &ItemId::new(id), ctx),
        CartCommand::Dec { id } => decrease(&cart, &ItemId::new(id), ctx),
        CartCommand::Remove { id } => remove(&cart, &ItemId::new(id), ctx),
        CartCommand::Clear { yes } => clear(&cart, yes, ctx),
        CartCommand::Checkout { yes, keep } => checkout(&cart, yes, keep, ctx).await,
    }
}

/// The menu, or an empty catalog when it cannot be fetched.
///
/// Cart views still work offline, with unknown items shown as placeholders.
async fn catalog_or_empty(ctx: &Context) -> Result<Catalog> {
    let client = ctx.client()?;
    Ok(match fetch_catalog(&client, ctx).await {
        Ok(catalog) => catalog,
        Err(message) => {
            ctx.output.warn(&format!("{} Showing cart without menu details.", message));
            Catalog::empty()
        }
    })
}

async fn show(cart: &CartService, ctx: &Context) -> Result<()> {
    let catalog = catalog_or_empty(ctx).await?;
    let offer = ctx.offers()?.load_valid(Utc::now());
    let pricing = cart.pricing(&catalog, offer.as_ref());

    if ctx.output.is_json() {
        ctx.output.json(&pricing);
        return Ok(());
    }

    if pricing.line_items.is_empty() {
        ctx.output.info("Your cart is empty");
        return Ok(());
    }

    ctx.output.header(&format!("Cart ({} items)", pricing.item_count()));
    let widths = [28, 4, 20];
    for line in &pricing.line_items {
        ctx.output.table_row(
            &[
                &line.name,
                &format!("x{}", line.quantity),
                &format_price(line.subtotal, Some(line.total)),
            ],
            &widths,
        );
    }
    print_totals(&pricing, ctx);

    Ok(())
}

fn print_totals(pricing: &CartPricing, ctx: &Context) {
    ctx.output.line("");
    ctx.output.kv("Subtotal", &pricing.subtotal.display());
    if pricing.has_discounts() {
        let label = pricing.offer_title.as_deref().unwrap_or("Discount");
        ctx.output.kv(label, &format!("-{}", pricing.discount_total.display()));
    }
    ctx.output.kv("Total", &pricing.grand_total.display());
}

#[derive(Serialize)]
struct QuantityChange<'a> {
    id: &'a ItemId,
    quantity: u32,
    count: u32,
}

fn report(cart: &CartService, id: &ItemId, quantity: u32, msg: &str, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(&QuantityChange {
            id,
            quantity,
            count: cart.count(),
        });
    } else {
        ctx.output.success(msg);
        ctx.output.debug(&format!("{} items in cart", cart.count()));
    }
}

fn add(cart: &CartService, id: &ItemId, ctx: &Context) -> Result<()> {
    let qty = cart
        .add_item(id)
        .with_context(|| format!("Failed to add {}", id))?;
    report(cart, id, qty, &format!("Added {} (now {})", id, qty), ctx);
    Ok(())
}

fn decrease(cart: &CartService, id: &ItemId, ctx: &Context) -> Result<()> {
    if cart.item_qty(id) == 0 {
        ctx.output.warn(&format!("{} is not in the cart", id));
        return Ok(());
    }
    let qty = cart.decrease_item(id)?;
    let msg = if qty == 0 {
        format!("Removed {}", id)
    } else {
        format!("Decreased {} (now {})", id, qty)
    };
    report(cart, id, qty, &msg, ctx);
    Ok(())
}

fn remove(cart: &CartService, id: &ItemId, ctx: &Context) -> Result<()> {
    if cart.remove_item(id)? {
        report(cart, id, 0, &format!("Removed {}", id), ctx);
    } else {
        ctx.output.warn(&format!("{} is not in the cart", id));
    }
    Ok(())
}

fn confirm(prompt: &str, yes: bool, ctx: &Context) -> Result<bool> {
    if yes || ctx.output.is_json() {
        return Ok(true);
    }
    Ok(Confirm::new().with_prompt(prompt).default(false).interact()?)
}

fn clear(cart: &CartService, yes: bool, ctx: &Context) -> Result<()> {
    if cart.count() == 0 {
        ctx.output.info("Your cart is already empty");
        return Ok(());
    }
    if !confirm("Remove everything from the cart?", yes, ctx)? {
        ctx.output.warn("Clear cancelled");
        return Ok(());
    }
    cart.clear_all()?;
    ctx.output.success("Cart cleared");
    Ok(())
}

async fn checkout(cart: &CartService, yes: bool, keep: bool, ctx: &Context) -> Result<()> {
    if cart.count() == 0 {
        ctx.output.info("Your cart is empty");
        return Ok(());
    }

    let catalog = catalog_or_empty(ctx).await?;
    let offer = ctx.offers()?.load_valid(Utc::now());
    let pricing = cart.pricing(&catalog, offer.as_ref());

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "pricing": pricing,
            "phone": ORDER_PHONE,
        }));
    } else {
        ctx.output.line(&order_summary(&pricing));
    }

    if keep {
        return Ok(());
    }
    if confirm("Clear the cart now?", yes, ctx)? {
        cart.clear_all()?;
        ctx.output.success("Cart cleared");
    }
    Ok(())
}

/// The order summary customers read out over the phone.
///
/// Line totals and the total are the prices `cart show` displays, with the
/// active offer already applied.
pub fn order_summary(pricing: &CartPricing) -> String {
    let mut summary = String::from("Order Summary:\n");
    for line in &pricing.line_items {
        summary.push_str(&format!(
            "{} x{} - {}\n",
            line.name,
            line.quantity,
            line.total.display()
        ));
    }
    if pricing.has_discounts() {
        summary.push_str(&format!(
            "\n{}: -{}",
            pricing.offer_title.as_deref().unwrap_or("Discount"),
            pricing.discount_total.display()
        ));
    }
    summary.push_str(&format!(
        "\nTotal: {}\n\nPlease call {} to complete your order.",
        pricing.grand_total.display(),
        ORDER_PHONE
    ));
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use visconti_commerce::cart::{price_cart, CartEntry};
    use visconti_commerce::catalog::CatalogItem;
    use visconti_commerce::offer::ActiveOffer;
    use visconti_commerce::Money;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            CatalogItem::new("a", "Margherita", Money::eur(700), "pizze"),
            CatalogItem::new("b", "Tiramisu", Money::eur(550), "dolci"),
        ])
    }

    #[test]
    fn test_order_summary() {
        let entries = vec![CartEntry::new("a", 2), CartEntry::new("b", 1)];

        let summary = order_summary(&price_cart(&entries, &catalog(), None));
        assert_eq!(
            summary,
            "Order Summary:\n\
             Margherita x2 - \u{20ac}14.00\n\
             Tiramisu x1 - \u{20ac}5.50\n\
             \n\
             Total: \u{20ac}19.50\n\
             \n\
             Please call +39 0382 458734 to complete your order."
        );
    }

    #[test]
    fn test_order_summary_applies_offer() {
        let entries = vec![CartEntry::new("a", 2), CartEntry::new("b", 1)];
        let offer = ActiveOffer {
            discount: 10.0,
            expiry_date: Utc::now() + Duration::days(3),
            title: "Festa di Primavera".to_string(),
        };

        let pricing = price_cart(&entries, &catalog(), Some(&offer));
        let summary = order_summary(&pricing);
        assert!(summary.contains("Margherita x2 - \u{20ac}12.60\n"));
        assert!(summary.contains("Tiramisu x1 - \u{20ac}4.95\n"));
        assert!(summary.contains("Festa di Primavera: -\u{20ac}1.95"));
        assert!(summary.contains("Total: \u{20ac}17.55"));
        assert!(summary.contains(&format!("Total: {}", pricing.grand_total.display())));
    }

    #[test]
    fn test_order_summary_unknown_item() {
        let entries = vec![CartEntry::new("gone", 3)];
        let summary = order_summary(&price_cart(&entries, &Catalog::empty(), None));
        assert!(summary.contains("Unknown Item x3 - \u{20ac}0.00"));
        assert!(summary.contains("Total: \u{20ac}0.00"));
    }
}
