//! Joining cart entries with catalog data for display.

use crate::cart::entry::CartEntry;
use crate::catalog::{Catalog, PLACEHOLDER_IMAGE};
use crate::ids::ItemId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Name shown for an entry whose item is no longer on the menu.
pub const UNKNOWN_ITEM_NAME: &str = "Unknown Item";

/// A cart line with display data resolved from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedCartLine {
    pub id: ItemId,
    pub quantity: u32,
    pub name: String,
    pub unit_price: Money,
    pub image: String,
    pub description: Option<String>,
}

impl EnrichedCartLine {
    /// `unit_price * quantity`.
    pub fn line_total(&self) -> Money {
        Money::new(
            self.unit_price
                .amount_cents
                .saturating_mul(i64::from(self.quantity)),
            self.unit_price.currency,
        )
    }
}

/// Resolve every entry against the catalog, preserving entry order.
///
/// Entries the catalog does not know are still returned, with placeholder
/// data and a zero price.
pub fn enrich(entries: &[CartEntry], catalog: &Catalog) -> Vec<EnrichedCartLine> {
    entries
        .iter()
        .map(|entry| match catalog.find(&entry.id) {
            Some(item) => EnrichedCartLine {
                id: entry.id.clone(),
                quantity: entry.qty,
                name: item.name.clone(),
                unit_price: item.price,
                image: item.image_or_placeholder().to_string(),
                description: Some(item.description.clone()).filter(|d| !d.is_empty()),
            },
            None => {
                tracing::debug!(id = %entry.id, "cart entry not in catalog");
                EnrichedCartLine {
                    id: entry.id.clone(),
                    quantity: entry.qty,
                    name: UNKNOWN_ITEM_NAME.to_string(),
                    unit_price: Money::zero(Currency::EUR),
                    image: PLACEHOLDER_IMAGE.to_string(),
                    description: None,
                }
            }
        })
        .collect()
}

/// Sum of line totals. Unknown items contribute nothing.
pub fn total(entries: &[CartEntry], catalog: &Catalog) -> Money {
    sum_lines(&enrich(entries, catalog))
}

pub(crate) fn sum_lines(lines: &[EnrichedCartLine]) -> Money {
    let cents = lines
        .iter()
        .fold(0i64, |acc, line| acc.saturating_add(line.line_total().amount_cents));
    Money::eur(cents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogItem;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            CatalogItem::new("p1", "Margherita", Money::eur(1000), "pizze")
                .with_description("Pomodoro, mozzarella")
                .with_image("/margherita.jpg"),
            CatalogItem::new("p2", "Marinara", Money::eur(750), "pizze"),
        ])
    }

    #[test]
    fn test_enrich_known_items() {
        let entries = vec![CartEntry::new("p1", 2), CartEntry::new("p2", 1)];
        let lines = enrich(&entries, &catalog());

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].name, "Margherita");
        assert_eq!(lines[0].image, "/margherita.jpg");
        assert_eq!(lines[0].description.as_deref(), Some("Pomodoro, mozzarella"));
        assert_eq!(lines[0].line_total(), Money::eur(2000));
        assert_eq!(lines[1].image, PLACEHOLDER_IMAGE);
        assert_eq!(lines[1].description, None);
    }

    #[test]
    fn test_enrich_unknown_item() {
        let lines = enrich(&[CartEntry::new("gone", 3)], &catalog());

        assert_eq!(lines[0].name, UNKNOWN_ITEM_NAME);
        assert_eq!(lines[0].unit_price, Money::eur(0));
        assert_eq!(lines[0].image, PLACEHOLDER_IMAGE);
        assert_eq!(lines[0].quantity, 3);
    }

    #[test]
    fn test_total_ignores_unknown_items() {
        let entries = vec![
            CartEntry::new("p1", 2),
            CartEntry::new("p2", 1),
            CartEntry::new("gone", 5),
        ];
        assert_eq!(total(&entries, &catalog()), Money::eur(2750));
    }

    #[test]
    fn test_empty_catalog_keeps_quantities() {
        let entries = vec![CartEntry::new("p1", 2)];
        let lines = enrich(&entries, &Catalog::empty());

        assert_eq!(lines[0].quantity, 2);
        assert_eq!(total(&entries, &Catalog::empty()), Money::eur(0));
    }
}
