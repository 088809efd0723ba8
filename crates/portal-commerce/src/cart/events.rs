//! Cart change notifications.
//!
//! Listeners receive only the scope that changed and re-read the cart
//! themselves. Every successful mutation emits exactly once, synchronously,
//! before the mutating call returns.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};

use crate::cart::ScopeKey;

type Listener = Arc<dyn Fn(&ScopeKey) + Send + Sync>;

#[derive(Default)]
struct Registry {
    next_id: AtomicU64,
    listeners: Mutex<Vec<(u64, Listener)>>,
}

impl Registry {
    fn remove(&self, id: u64) {
        let mut listeners = self.listeners.lock().unwrap_or_else(PoisonError::into_inner);
        listeners.retain(|(lid, _)| *lid != id);
    }
}

/// Broadcaster for `cart updated` signals.
///
/// Cloning shares the same listener set.
#[derive(Clone, Default)]
pub struct CartEvents {
    registry: Arc<Registry>,
}

impl CartEvents {
    /// Create a broadcaster with no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. It stays attached until the returned
    /// [`Subscription`] is dropped.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&ScopeKey) + Send + Sync + 'static,
    {
        let id = self.registry.next_id.fetch_add(1, Ordering::Relaxed);
        self.registry
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::new(listener)));
        Subscription {
            id,
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Notify every listener, in subscription order.
    ///
    /// The listener list is snapshotted first so listeners may subscribe,
    /// unsubscribe or read the cart without deadlocking.
    pub fn emit(&self, scope: &ScopeKey) {
        let snapshot: Vec<Listener> = self
            .registry
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, l)| Arc::clone(l))
            .collect();
        tracing::trace!(%scope, listeners = snapshot.len(), "cart updated");
        for listener in snapshot {
            listener(scope);
        }
    }

    /// Number of attached listeners.
    pub fn listener_count(&self) -> usize {
        self.registry
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl fmt::Debug for CartEvents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartEvents")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// Handle that keeps a listener attached.
#[must_use = "dropping a Subscription detaches its listener"]
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    registry: Weak<Registry>,
}

impl Subscription {
    /// Detach the listener now.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.remove(self.id);
        }
    }
}
