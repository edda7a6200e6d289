//! Shopping cart module.
//!
//! The cart is a list of `{id, qty}` entries persisted under one storage
//! key. Display data and prices are joined in from the catalog on read.

mod enrich;
mod entry;
mod pricing;
mod service;
mod store;

pub use enrich::{enrich, total, EnrichedCartLine, UNKNOWN_ITEM_NAME};
pub use entry::{count, CartEntry};
pub use pricing::{price_cart, CartPricing, LineItemPricing};
pub use service::CartService;
pub use store::{CartStore, CART_KEY};
