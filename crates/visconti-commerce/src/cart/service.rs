//! Cart mutations.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use visconti_store::LocalStore;

use crate::cart::enrich::{enrich, sum_lines, EnrichedCartLine};
use crate::cart::entry::{self, CartEntry};
use crate::cart::pricing::{price_lines, CartPricing};
use crate::cart::store::CartStore;
use crate::catalog::Catalog;
use crate::error::CommerceError;
use crate::ids::ItemId;
use crate::money::Money;
use crate::notify::{ChangeNotifier, Subscription};
use crate::offer::ActiveOffer;

/// The cart as seen by the rest of the application.
///
/// Every mutation loads the persisted entries, changes them, saves them and
/// then broadcasts on the cart channel. Mutations are serialized through an
/// internal lock, so a service may be shared between threads. Clones share
/// the lock and the channel.
#[derive(Debug, Clone)]
pub struct CartService {
    store: CartStore,
    notifier: ChangeNotifier,
    lock: Arc<Mutex<()>>,
}

impl CartService {
    /// Create a service over `store` with its own cart channel.
    pub fn new(store: LocalStore) -> Self {
        Self::with_notifier(store, ChangeNotifier::cart())
    }

    /// Create a service broadcasting on an existing channel.
    pub fn with_notifier(store: LocalStore, notifier: ChangeNotifier) -> Self {
        Self {
            store: CartStore::new(store),
            notifier,
            lock: Arc::new(Mutex::new(())),
        }
    }

    /// The cart channel.
    pub fn notifier(&self) -> &ChangeNotifier {
        &self.notifier
    }

    /// Listen for cart changes.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.notifier.subscribe(listener)
    }

    /// Add one of `id`. Returns the new quantity.
    pub fn add_item(&self, id: &ItemId) -> Result<u32, CommerceError> {
        let qty = self.mutate(|entries| {
            match entries.iter_mut().find(|e| &e.id == id) {
                Some(existing) => {
                    existing.qty = existing.qty.saturating_add(1);
                    Ok(Some(existing.qty))
                }
                None => {
                    entries.push(CartEntry::new(id.clone(), 1));
                    Ok(Some(1))
                }
            }
        })?
        .unwrap_or(0);
        tracing::debug!(id = %id, qty, "item added");
        Ok(qty)
    }

    /// Remove one of `id`, dropping the entry when it reaches zero.
    ///
    /// Returns the new quantity. Missing ids are a no-op without broadcast.
    pub fn decrease_item(&self, id: &ItemId) -> Result<u32, CommerceError> {
        let qty = self.mutate(|entries| {
            let Some(pos) = entries.iter().position(|e| &e.id == id) else {
                return Ok(None);
            };
            if entries[pos].qty > 1 {
                entries[pos].qty -= 1;
                Ok(Some(entries[pos].qty))
            } else {
                entries.remove(pos);
                Ok(Some(0))
            }
        })?;
        if let Some(qty) = qty {
            tracing::debug!(id = %id, qty, "item decreased");
        }
        Ok(qty.unwrap_or(0))
    }

    /// Remove every unit of `id`. Returns whether anything was removed.
    ///
    /// Missing ids are a no-op without broadcast.
    pub fn remove_item(&self, id: &ItemId) -> Result<bool, CommerceError> {
        let removed = self.mutate(|entries| {
            let before = entries.len();
            entries.retain(|e| &e.id != id);
            Ok((entries.len() < before).then_some(true))
        })?;
        if removed.is_some() {
            tracing::debug!(id = %id, "item removed");
        }
        Ok(removed.unwrap_or(false))
    }

    /// Empty the cart. Always broadcasts.
    pub fn clear_all(&self) -> Result<(), CommerceError> {
        {
            let _guard = self.guard();
            self.store.save(&[])?;
        }
        tracing::debug!("cart cleared");
        self.notifier.notify();
        Ok(())
    }

    /// Current entries.
    pub fn entries(&self) -> Vec<CartEntry> {
        self.store.load()
    }

    /// Quantity of `id` in the cart, 0 when absent.
    pub fn item_qty(&self, id: &ItemId) -> u32 {
        self.entries()
            .iter()
            .find(|e| &e.id == id)
            .map_or(0, |e| e.qty)
    }

    /// Total number of units. Does not need the catalog.
    pub fn count(&self) -> u32 {
        entry::count(&self.entries())
    }

    /// Entries joined with catalog data.
    pub fn enriched(&self, catalog: &Catalog) -> Vec<EnrichedCartLine> {
        enrich(&self.entries(), catalog)
    }

    /// Sum of line totals at list prices.
    pub fn total(&self, catalog: &Catalog) -> Money {
        sum_lines(&self.enriched(catalog))
    }

    /// Full pricing breakdown, with `offer` applied when given.
    pub fn pricing(&self, catalog: &Catalog, offer: Option<&ActiveOffer>) -> CartPricing {
        price_lines(&self.enriched(catalog), offer)
    }

    /// Run a read-modify-write under the lock.
    ///
    /// `change` returns `None` when nothing changed; then nothing is saved and
    /// nothing is broadcast. The broadcast happens after the lock is released
    /// so listeners can read the cart.
    fn mutate<T, F>(&self, change: F) -> Result<Option<T>, CommerceError>
    where
        F: FnOnce(&mut Vec<CartEntry>) -> Result<Option<T>, CommerceError>,
    {
        let outcome = {
            let _guard = self.guard();
            let mut entries = self.store.load();
            let outcome = change(&mut entries)?;
            if outcome.is_some() {
                self.store.save(&entries)?;
            }
            outcome
        };
        if outcome.is_some() {
            self.notifier.notify();
        }
        Ok(outcome)
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogItem;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn id(s: &str) -> ItemId {
        ItemId::new(s)
    }

    fn listen(cart: &CartService) -> (Arc<AtomicUsize>, Subscription) {
        let count = Arc::new(AtomicUsize::new(0));
        let handle = Arc::clone(&count);
        let sub = cart.subscribe(move || {
            handle.fetch_add(1, Ordering::SeqCst);
        });
        (count, sub)
    }

    #[test]
    fn test_add_then_decrease_restores_empty_cart() {
        let cart = CartService::new(LocalStore::in_memory());

        cart.add_item(&id("p1")).unwrap();
        assert_eq!(cart.entries(), vec![CartEntry::new("p1", 1)]);

        cart.decrease_item(&id("p1")).unwrap();
        assert!(cart.entries().is_empty());
    }

    #[test]
    fn test_add_increments_existing() {
        let cart = CartService::new(LocalStore::in_memory());

        assert_eq!(cart.add_item(&id("a")).unwrap(), 1);
        assert_eq!(cart.add_item(&id("b")).unwrap(), 1);
        assert_eq!(cart.add_item(&id("a")).unwrap(), 2);

        assert_eq!(
            cart.entries(),
            vec![CartEntry::new("a", 2), CartEntry::new("b", 1)]
        );
        assert_eq!(cart.item_qty(&id("a")), 2);
        assert_eq!(cart.item_qty(&id("zzz")), 0);
    }

    #[test]
    fn test_decrease_keeps_entry_above_one() {
        let cart = CartService::new(LocalStore::in_memory());
        cart.add_item(&id("a")).unwrap();
        cart.add_item(&id("a")).unwrap();

        assert_eq!(cart.decrease_item(&id("a")).unwrap(), 1);
        assert_eq!(cart.entries(), vec![CartEntry::new("a", 1)]);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let cart = CartService::new(LocalStore::in_memory());
        let (notified, _sub) = listen(&cart);

        assert!(!cart.remove_item(&id("x")).unwrap());
        assert!(cart.entries().is_empty());

        cart.add_item(&id("a")).unwrap();
        assert!(!cart.remove_item(&id("x")).unwrap());
        assert_eq!(cart.entries(), vec![CartEntry::new("a", 1)]);

        // Only the add broadcast.
        assert_eq!(notified.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_remove_drops_all_units() {
        let cart = CartService::new(LocalStore::in_memory());
        cart.add_item(&id("a")).unwrap();
        cart.add_item(&id("a")).unwrap();

        assert!(cart.remove_item(&id("a")).unwrap());
        assert_eq!(cart.count(), 0);
    }

    #[test]
    fn test_decrease_missing_is_noop() {
        let cart = CartService::new(LocalStore::in_memory());
        let (notified, _sub) = listen(&cart);

        assert_eq!(cart.decrease_item(&id("x")).unwrap(), 0);
        assert_eq!(notified.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_large_persisted_quantity_survives_mutations() {
        let store = LocalStore::in_memory();
        store.set_raw("cart", r#"[{"id":"a","qty":150}]"#).unwrap();
        let cart = CartService::new(store.clone());
        assert_eq!(cart.count(), 150);

        cart.add_item(&id("b")).unwrap();
        let saved: Vec<CartEntry> = store.get("cart").unwrap().unwrap();
        assert_eq!(saved, vec![CartEntry::new("a", 150), CartEntry::new("b", 1)]);

        assert_eq!(cart.add_item(&id("a")).unwrap(), 151);
        assert_eq!(cart.count(), 152);
    }

    #[test]
    fn test_every_mutation_broadcasts_before_returning() {
        let cart = CartService::new(LocalStore::in_memory());
        let (first, _a) = listen(&cart);
        let (second, _b) = listen(&cart);

        cart.add_item(&id("a")).unwrap();
        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 1);

        cart.add_item(&id("a")).unwrap();
        cart.decrease_item(&id("a")).unwrap();
        cart.remove_item(&id("a")).unwrap();
        cart.clear_all().unwrap();

        assert_eq!(first.load(Ordering::SeqCst), 5);
        assert_eq!(second.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn test_listener_sees_saved_state() {
        let cart = CartService::new(LocalStore::in_memory());
        let seen = Arc::new(AtomicUsize::new(0));

        let reader = cart.clone();
        let handle = Arc::clone(&seen);
        let _sub = cart.subscribe(move || {
            handle.store(reader.count() as usize, Ordering::SeqCst);
        });

        cart.add_item(&id("a")).unwrap();
        cart.add_item(&id("b")).unwrap();
        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_count_without_catalog() {
        let store = LocalStore::in_memory();
        store
            .set("cart", &vec![CartEntry::new("a", 2), CartEntry::new("b", 3)])
            .unwrap();
        let cart = CartService::new(store);

        assert_eq!(cart.count(), 5);
        assert_eq!(cart.total(&Catalog::empty()), Money::eur(0));
    }

    #[test]
    fn test_total_with_catalog() {
        let store = LocalStore::in_memory();
        store
            .set("cart", &vec![CartEntry::new("a", 2), CartEntry::new("b", 3)])
            .unwrap();
        let cart = CartService::new(store);
        let catalog = Catalog::new(vec![
            CatalogItem::new("a", "Margherita", Money::eur(500), "pizze"),
            CatalogItem::new("b", "Acqua", Money::eur(250), "bibite"),
        ]);

        assert_eq!(cart.total(&catalog), Money::eur(1750));
        assert_eq!(cart.total(&catalog).display(), "\u{20ac}17.50");
        assert_eq!(cart.pricing(&catalog, None).grand_total, Money::eur(1750));
    }

    #[test]
    fn test_missing_catalog_fallback() {
        let store = LocalStore::in_memory();
        store.set("cart", &vec![CartEntry::new("x", 1)]).unwrap();
        let cart = CartService::new(store);

        let lines = cart.enriched(&Catalog::empty());
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].name, "Unknown Item");
        assert!(lines[0].unit_price.is_zero());
        assert!(cart.total(&Catalog::empty()).is_zero());
        assert_eq!(cart.count(), 1);
    }

    #[test]
    fn test_shared_across_threads() {
        let cart = CartService::new(LocalStore::in_memory());

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let cart = cart.clone();
                std::thread::spawn(move || {
                    for _ in 0..10 {
                        cart.add_item(&ItemId::new("a")).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(cart.item_qty(&id("a")), 40);
    }
}
