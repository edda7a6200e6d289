//! Cart persistence.

use crate::cart::entry::{normalize, CartEntry};
use crate::error::CommerceError;
use visconti_store::LocalStore;

/// Storage key holding the cart.
pub const CART_KEY: &str = "cart";

/// Reads and writes the cart under a single storage key.
#[derive(Debug, Clone)]
pub struct CartStore {
    store: LocalStore,
}

impl CartStore {
    /// Wrap a store.
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &LocalStore {
        &self.store
    }

    /// Load the cart.
    ///
    /// Never fails: a missing key, an unreadable backend or malformed JSON all
    /// read as an empty cart.
    pub fn load(&self) -> Vec<CartEntry> {
        match self.store.get::<Vec<CartEntry>>(CART_KEY) {
            Ok(Some(entries)) => normalize(entries),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, key = CART_KEY, "unreadable cart, starting empty");
                Vec::new()
            }
        }
    }

    /// Replace the stored cart.
    pub fn save(&self, entries: &[CartEntry]) -> Result<(), CommerceError> {
        self.store.set(CART_KEY, entries)?;
        tracing::debug!(lines = entries.len(), "cart saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_is_empty() {
        let carts = CartStore::new(LocalStore::in_memory());
        assert!(carts.load().is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let carts = CartStore::new(LocalStore::in_memory());
        let entries = vec![CartEntry::new("a", 2), CartEntry::new("b", 1)];

        carts.save(&entries).unwrap();
        assert_eq!(carts.load(), entries);
    }

    #[test]
    fn test_corrupt_json_loads_empty() {
        let store = LocalStore::in_memory();
        store.set_raw(CART_KEY, "{not json").unwrap();

        let carts = CartStore::new(store);
        assert!(carts.load().is_empty());
    }

    #[test]
    fn test_wrong_shape_loads_empty() {
        let store = LocalStore::in_memory();
        store.set_raw(CART_KEY, r#"{"id":"a","qty":1}"#).unwrap();

        assert!(CartStore::new(store).load().is_empty());
    }

    #[test]
    fn test_hand_edited_storage_is_normalized() {
        let store = LocalStore::in_memory();
        store
            .set_raw(
                CART_KEY,
                r#"[{"id":"a","qty":1},{"id":"b","qty":0},{"id":"a","qty":2}]"#,
            )
            .unwrap();

        assert_eq!(CartStore::new(store).load(), vec![CartEntry::new("a", 3)]);
    }

    #[test]
    fn test_load_keeps_quantities_over_ninety_nine() {
        let store = LocalStore::in_memory();
        store.set_raw(CART_KEY, r#"[{"id":"a","qty":150}]"#).unwrap();

        assert_eq!(CartStore::new(store).load(), vec![CartEntry::new("a", 150)]);
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let entries = vec![CartEntry::new("p1", 4)];

        CartStore::new(LocalStore::open_dir(dir.path()).unwrap())
            .save(&entries)
            .unwrap();

        let reopened = CartStore::new(LocalStore::open_dir(dir.path()).unwrap());
        assert_eq!(reopened.load(), entries);
    }
}
