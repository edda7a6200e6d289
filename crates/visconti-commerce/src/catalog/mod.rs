//! Menu catalog module.
//!
//! Contains the menu item, grouped menu response, flat lookup catalog and
//! gallery image types.

mod gallery;
mod item;
mod menu;

pub use gallery::{newest_first, GalleryImage};
pub use item::{CatalogItem, PLACEHOLDER_IMAGE};
pub use menu::{Catalog, MenuResponse};
