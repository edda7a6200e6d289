//! Menu item types.

use crate::ids::ItemId;
use crate::money::{deserialize_price, serialize_price, Money};
use serde::{Deserialize, Serialize};

/// Image shown when an item has none, or is unknown to the catalog.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder-food.jpg";

/// An orderable item on the menu.
///
/// Owned by the backend and fetched read-only.
///
/// Serializes back to the backend's wire form, so a cached catalog reads the
/// same way a fetched one does.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "CatalogItemRecord", into = "CatalogItemRecord")]
pub struct CatalogItem {
    /// Identifier used as the cart key (the backend `_id` when present).
    pub id: ItemId,
    /// Secondary identifier (the backend `id` field) when it differs from `id`.
    pub alt_id: Option<ItemId>,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: Money,
    /// Description shown under the name.
    pub description: String,
    /// Image URL, if the item has one.
    pub image_url: Option<String>,
    /// Category key (e.g. "pizze-tradizionali").
    pub category: String,
}

impl CatalogItem {
    /// Create an item with no image and no secondary id.
    pub fn new(
        id: impl Into<ItemId>,
        name: impl Into<String>,
        price: Money,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            alt_id: None,
            name: name.into(),
            price,
            description: String::new(),
            image_url: None,
            category: category.into(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the image URL.
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// Whether this item answers to `id` under either of its identifiers.
    pub fn matches(&self, id: &ItemId) -> bool {
        &self.id == id || self.alt_id.as_ref() == Some(id)
    }

    /// Image URL, falling back to the placeholder.
    pub fn image_or_placeholder(&self) -> &str {
        self.image_url.as_deref().unwrap_or(PLACEHOLDER_IMAGE)
    }
}

/// Wire form of a menu item as the backend sends it.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogItemRecord {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    backend_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    name: String,
    #[serde(deserialize_with = "deserialize_price", serialize_with = "serialize_price")]
    price: Money,
    #[serde(default)]
    description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image_url: Option<String>,
    #[serde(default)]
    category: String,
}

impl From<CatalogItem> for CatalogItemRecord {
    fn from(item: CatalogItem) -> Self {
        Self {
            backend_id: Some(item.id.into_inner()),
            id: item.alt_id.map(ItemId::into_inner),
            name: item.name,
            price: item.price,
            description: item.description,
            image: None,
            image_url: item.image_url,
            category: item.category,
        }
    }
}

impl TryFrom<CatalogItemRecord> for CatalogItem {
    type Error = String;

    fn try_from(record: CatalogItemRecord) -> Result<Self, Self::Error> {
        let backend_id = record.backend_id.filter(|s| !s.is_empty());
        let plain_id = record.id.filter(|s| !s.is_empty());

        let (id, alt_id) = match (backend_id, plain_id) {
            (Some(primary), Some(secondary)) if primary != secondary => {
                (primary, Some(secondary))
            }
            (Some(primary), _) => (primary, None),
            (None, Some(plain)) => (plain, None),
            (None, None) => return Err(format!("menu item {:?} has no id", record.name)),
        };

        let image_url = record
            .image
            .or(record.image_url)
            .filter(|url| !url.is_empty());

        Ok(Self {
            id: ItemId::new(id),
            alt_id: alt_id.map(ItemId::new),
            name: record.name,
            price: record.price,
            description: record.description,
            image_url,
            category: record.category,
        })
    }
}
