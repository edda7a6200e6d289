//! Process-wide change notification.
//!
//! A notifier is a named broadcast channel without payload. Listeners are
//! told *that* something changed and re-read the state they care about, so a
//! listener never acts on a stale pushed value.
//!
//! Delivery is synchronous: every listener subscribed when [`ChangeNotifier::notify`]
//! is called has run by the time it returns.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

/// Channel name used for cart changes.
pub const CART_UPDATED: &str = "cartUpdated";

type Listener = Arc<dyn Fn() + Send + Sync>;

struct Inner {
    name: String,
    next_id: AtomicU64,
    listeners: Mutex<Vec<(u64, Listener)>>,
}

impl Inner {
    fn listeners(&self) -> MutexGuard<'_, Vec<(u64, Listener)>> {
        // A panicking listener runs outside the lock, so the list itself
        // cannot be left half-updated.
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A named, payload-free broadcast channel.
///
/// Cloning shares the channel.
#[derive(Clone)]
pub struct ChangeNotifier {
    inner: Arc<Inner>,
}

impl ChangeNotifier {
    /// Create a channel with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(Inner {
                name: name.into(),
                next_id: AtomicU64::new(0),
                listeners: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Create the cart channel.
    pub fn cart() -> Self {
        Self::new(CART_UPDATED)
    }

    /// Channel name.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Register a listener.
    ///
    /// The listener stays registered until the returned [`Subscription`] is
    /// dropped or cancelled.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner.listeners().push((id, Arc::new(listener)));
        tracing::trace!(channel = %self.inner.name, id, "listener subscribed");
        Subscription {
            id,
            notifier: Arc::downgrade(&self.inner),
        }
    }

    /// Invoke every current listener.
    ///
    /// Listeners run outside the internal lock, so they may read state,
    /// subscribe, or drop subscriptions.
    pub fn notify(&self) {
        let snapshot: Vec<Listener> = self
            .inner
            .listeners()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        tracing::debug!(
            channel = %self.inner.name,
            listeners = snapshot.len(),
            "broadcasting change"
        );
        for listener in snapshot {
            listener();
        }
    }

    /// Number of registered listeners.
    pub fn subscriber_count(&self) -> usize {
        self.inner.listeners().len()
    }
}

impl std::fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("name", &self.inner.name)
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// Handle to a registered listener. Unsubscribes on drop.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    notifier: Weak<Inner>,
}

impl Subscription {
    /// Unsubscribe now.
    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.notifier.upgrade() {
            inner.listeners().retain(|(id, _)| *id != self.id);
        }
    }
}
