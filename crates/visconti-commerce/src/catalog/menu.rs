//! Menu response and flattened catalog.

use crate::catalog::CatalogItem;
use crate::ids::ItemId;
use serde::{Deserialize, Serialize};

/// Response of `GET /api/menu`: items grouped by category key.
///
/// Categories keep the order the backend sends them in.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MenuResponse {
    /// `(category key, items)` pairs, in backend order.
    #[serde(with = "ordered_groups")]
    pub grouped_items: Vec<(String, Vec<CatalogItem>)>,
}

impl MenuResponse {
    /// Category keys, in order.
    pub fn categories(&self) -> Vec<&str> {
        self.grouped_items.iter().map(|(key, _)| key.as_str()).collect()
    }

    /// Items of one category (empty if the category is unknown).
    pub fn items_in(&self, category: &str) -> &[CatalogItem] {
        self.grouped_items
            .iter()
            .find(|(key, _)| key == category)
            .map(|(_, items)| items.as_slice())
            .unwrap_or(&[])
    }

    /// Total number of items across categories.
    pub fn item_count(&self) -> usize {
        self.grouped_items.iter().map(|(_, items)| items.len()).sum()
    }

    /// Flatten every category into one list, in category order.
    ///
    /// Items with an empty `category` inherit the key they were grouped under.
    pub fn flatten(&self) -> Vec<CatalogItem> {
        self.grouped_items
            .iter()
            .flat_map(|(category, items)| {
                items.iter().cloned().map(move |mut item| {
                    if item.category.is_empty() {
                        item.category = category.clone();
                    }
                    item
                })
            })
            .collect()
    }

    /// Build a lookup catalog over all categories.
    pub fn into_catalog(self) -> Catalog {
        Catalog::new(self.flatten())
    }
}

/// `groupedItems` as a JSON object whose key order is kept.
mod ordered_groups {
    use std::fmt;

    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};

    use crate::catalog::CatalogItem;

    type Groups = Vec<(String, Vec<CatalogItem>)>;

    pub fn serialize<S: Serializer>(groups: &Groups, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(groups.len()))?;
        for (key, items) in groups {
            map.serialize_entry(key, items)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Groups, D::Error> {
        struct GroupsVisitor;

        impl<'de> Visitor<'de> for GroupsVisitor {
            type Value = Groups;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object of category keys to item arrays")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Groups, A::Error> {
                let mut groups: Groups = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, items)) = access.next_entry::<String, Vec<CatalogItem>>()? {
                    match groups.iter_mut().find(|(k, _)| *k == key) {
                        Some((_, existing)) => *existing = items,
                        None => groups.push((key, items)),
                    }
                }
                Ok(groups)
            }
        }

        deserializer.deserialize_map(GroupsVisitor)
    }
}

/// A flat, read-only list of catalog items.
///
/// Lookups scan linearly; menus hold tens to low hundreds of items.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

impl Catalog {
    /// Wrap a list of items.
    pub fn new(items: Vec<CatalogItem>) -> Self {
        Self { items }
    }

    /// A catalog that has not loaded yet.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Find the item answering to `id`.
    pub fn find(&self, id: &ItemId) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.matches(id))
    }

    /// All items.
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the catalog has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<Vec<CatalogItem>> for Catalog {
    fn from(items: Vec<CatalogItem>) -> Self {
        Self::new(items)
    }
}
