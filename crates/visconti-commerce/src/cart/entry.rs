//! Persisted cart entries.

use crate::ids::ItemId;
use serde::{Deserialize, Serialize};

/// One cart line as it is persisted: an item id and how many of it.
///
/// Serializes as `{"id": "...", "qty": n}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    /// Catalog item id.
    pub id: ItemId,
    /// Quantity, at least 1 for any entry in a saved cart.
    pub qty: u32,
}

impl CartEntry {
    /// Create an entry.
    pub fn new(id: impl Into<ItemId>, qty: u32) -> Self {
        Self { id: id.into(), qty }
    }
}

/// Drop zero-quantity entries and merge duplicate ids, keeping first-seen order.
///
/// Quantities are never reduced; merging saturates at `u32::MAX`.
pub(crate) fn normalize(entries: Vec<CartEntry>) -> Vec<CartEntry> {
    let mut out: Vec<CartEntry> = Vec::with_capacity(entries.len());
    for entry in entries {
        if entry.qty == 0 {
            continue;
        }
        match out.iter_mut().find(|e| e.id == entry.id) {
            Some(existing) => {
                existing.qty = existing.qty.saturating_add(entry.qty);
            }
            None => out.push(entry),
        }
    }
    out
}

/// Sum of quantities.
pub fn count(entries: &[CartEntry]) -> u32 {
    entries.iter().map(|e| e.qty).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_wire_format() {
        let json = serde_json::to_string(&CartEntry::new("p1", 2)).unwrap();
        assert_eq!(json, r#"{"id":"p1","qty":2}"#);
    }

    #[test]
    fn test_normalize_merges_and_drops() {
        let entries = vec![
            CartEntry::new("a", 1),
            CartEntry::new("b", 0),
            CartEntry::new("c", 2),
            CartEntry::new("a", 3),
        ];

        let normalized = normalize(entries);
        assert_eq!(
            normalized,
            vec![CartEntry::new("a", 4), CartEntry::new("c", 2)]
        );
    }

    #[test]
    fn test_normalize_keeps_large_quantities() {
        let normalized = normalize(vec![CartEntry::new("a", 80), CartEntry::new("a", 80)]);
        assert_eq!(normalized[0].qty, 160);

        let normalized = normalize(vec![CartEntry::new("b", u32::MAX), CartEntry::new("b", 1)]);
        assert_eq!(normalized[0].qty, u32::MAX);
    }

    #[test]
    fn test_count() {
        let entries = vec![CartEntry::new("a", 2), CartEntry::new("b", 3)];
        assert_eq!(count(&entries), 5);
        assert_eq!(count(&[]), 0);
    }
}
