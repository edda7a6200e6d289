//! Cart pricing calculations.

use crate::cart::enrich::{enrich, sum_lines, EnrichedCartLine};
use crate::cart::entry::CartEntry;
use crate::catalog::Catalog;
use crate::ids::ItemId;
use crate::money::Money;
use crate::offer::ActiveOffer;
use serde::{Deserialize, Serialize};

/// Complete pricing breakdown for a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartPricing {
    /// Subtotal at list prices.
    pub subtotal: Money,
    /// Total discount amount.
    pub discount_total: Money,
    /// Final total (subtotal - discounts).
    pub grand_total: Money,
    /// Title of the applied offer, if any.
    pub offer_title: Option<String>,
    /// Per-line pricing breakdown.
    pub line_items: Vec<LineItemPricing>,
}

impl CartPricing {
    /// Check if any discounts are applied.
    pub fn has_discounts(&self) -> bool {
        self.discount_total.amount_cents > 0
    }

    /// Get discount percentage of subtotal.
    pub fn discount_percentage(&self) -> f64 {
        if self.subtotal.amount_cents == 0 {
            return 0.0;
        }
        (self.discount_total.amount_cents as f64 / self.subtotal.amount_cents as f64) * 100.0
    }

    /// Total quantity across lines.
    pub fn item_count(&self) -> u32 {
        self.line_items.iter().map(|l| l.quantity).sum()
    }
}

/// Pricing breakdown for a single cart line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItemPricing {
    pub id: ItemId,
    pub name: String,
    /// List unit price.
    pub unit_price: Money,
    /// Unit price after the offer.
    pub discounted_unit_price: Money,
    pub quantity: u32,
    /// `unit_price * quantity`.
    pub subtotal: Money,
    /// `discounted_unit_price * quantity`.
    pub total: Money,
}

impl LineItemPricing {
    /// Discount applied to this line.
    pub fn discount_amount(&self) -> Money {
        Money::new(
            self.subtotal.amount_cents - self.total.amount_cents,
            self.subtotal.currency,
        )
    }
}

/// Price a cart against the catalog, applying `offer` per unit when given.
///
/// Without an offer the grand total equals the enriched total.
pub fn price_cart(
    entries: &[CartEntry],
    catalog: &Catalog,
    offer: Option<&ActiveOffer>,
) -> CartPricing {
    let lines = enrich(entries, catalog);
    price_lines(&lines, offer)
}

pub(crate) fn price_lines(lines: &[EnrichedCartLine], offer: Option<&ActiveOffer>) -> CartPricing {
    let line_items: Vec<LineItemPricing> = lines
        .iter()
        .map(|line| {
            let discounted = offer.map_or(line.unit_price, |o| o.apply(line.unit_price));
            let qty = i64::from(line.quantity);
            LineItemPricing {
                id: line.id.clone(),
                name: line.name.clone(),
                unit_price: line.unit_price,
                discounted_unit_price: discounted,
                quantity: line.quantity,
                subtotal: line.line_total(),
                total: Money::new(discounted.amount_cents.saturating_mul(qty), discounted.currency),
            }
        })
        .collect();

    let subtotal = sum_lines(lines);
    let grand_cents = line_items
        .iter()
        .fold(0i64, |acc, l| acc.saturating_add(l.total.amount_cents));
    let grand_total = Money::new(grand_cents, subtotal.currency);

    CartPricing {
        subtotal,
        discount_total: Money::new(subtotal.amount_cents - grand_cents, subtotal.currency),
        grand_total,
        offer_title: offer.map(|o| o.title.clone()),
        line_items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::enrich::total;
    use crate::catalog::CatalogItem;
    use chrono::{TimeZone, Utc};

    fn catalog() -> Catalog {
        Catalog::new(vec![
            CatalogItem::new("p1", "Margherita", Money::eur(1000), "pizze"),
            CatalogItem::new("p2", "Marinara", Money::eur(750), "pizze"),
        ])
    }

    fn offer(discount: f64) -> ActiveOffer {
        ActiveOffer {
            discount,
            expiry_date: Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap(),
            title: "Saldi".to_string(),
        }
    }

    #[test]
    fn test_no_offer_matches_total() {
        let entries = vec![CartEntry::new("p1", 2), CartEntry::new("p2", 1), CartEntry::new("x", 4)];
        let pricing = price_cart(&entries, &catalog(), None);

        assert_eq!(pricing.grand_total, total(&entries, &catalog()));
        assert_eq!(pricing.grand_total, Money::eur(2750));
        assert!(!pricing.has_discounts());
        assert_eq!(pricing.item_count(), 7);
    }

    #[test]
    fn test_offer_discounts_each_unit() {
        let entries = vec![CartEntry::new("p1", 2), CartEntry::new("p2", 1)];
        let pricing = price_cart(&entries, &catalog(), Some(&offer(10.0)));

        assert_eq!(pricing.subtotal, Money::eur(2750));
        assert_eq!(pricing.line_items[0].discounted_unit_price, Money::eur(900));
        assert_eq!(pricing.line_items[1].discounted_unit_price, Money::eur(675));
        assert_eq!(pricing.grand_total, Money::eur(2475));
        assert_eq!(pricing.discount_total, Money::eur(275));
        assert_eq!(pricing.line_items[0].discount_amount(), Money::eur(200));
        assert_eq!(pricing.offer_title.as_deref(), Some("Saldi"));
        assert!((pricing.discount_percentage() - 10.0).abs() < 0.01);
    }

    #[test]
    fn test_empty_cart() {
        let pricing = price_cart(&[], &catalog(), Some(&offer(50.0)));
        assert!(pricing.grand_total.is_zero());
        assert!(pricing.line_items.is_empty());
        assert_eq!(pricing.discount_percentage(), 0.0);
    }
}
