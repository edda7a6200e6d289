//! Storefront domain types and logic for the Visconti website.
//!
//! This crate provides the state the site keeps on the client:
//!
//! - **Catalog**: Menu items, grouped menu responses, gallery images
//! - **Cart**: Persisted `{id, qty}` entries, enrichment, pricing, mutations
//! - **Notify**: Payload-free change broadcasts between components
//! - **Offer**: Active discount offer selection and caching
//!
//! # Example
//!
//! ```rust,ignore
//! use visconti_commerce::prelude::*;
//! use visconti_store::LocalStore;
//!
//! let cart = CartService::new(LocalStore::open_dir(".visconti")?);
//! let _sub = cart.subscribe(|| println!("cart changed"));
//!
//! cart.add_item(&ItemId::new("margherita"))?;
//!
//! // Price against the fetched menu
//! let pricing = cart.pricing(&catalog, offer.as_ref());
//! println!("Total: {}", pricing.grand_total.display());
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod notify;
pub mod offer;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{Catalog, CatalogItem, GalleryImage, MenuResponse};

    // Cart
    pub use crate::cart::{
        CartEntry, CartPricing, CartService, CartStore, EnrichedCartLine, LineItemPricing,
    };

    // Notify
    pub use crate::notify::{ChangeNotifier, Subscription};

    // Offer
    pub use crate::offer::{ActiveOffer, OfferBadge, OfferCache};
}
