//! Durable key-value storage for the Visconti storefront.
//!
//! Plays the role browser local storage plays for the website: a flat map of
//! string keys to JSON values that survives restarts, with automatic
//! serialization on top.
//!
//! # Example
//!
//! ```rust,ignore
//! use visconti_store::LocalStore;
//!
//! let store = LocalStore::open_dir(".visconti")?;
//!
//! // Store a value
//! store.set("cart", &entries)?;
//!
//! // Retrieve a value
//! let entries: Option<Vec<CartEntry>> = store.get("cart")?;
//!
//! // Delete a value
//! store.delete("activeOffer")?;
//! ```

mod backend;
mod error;
mod kv;

pub use backend::{FileBackend, MemoryBackend, StorageBackend};
pub use error::StoreError;
pub use kv::LocalStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{LocalStore, StorageBackend, StoreError};
}
