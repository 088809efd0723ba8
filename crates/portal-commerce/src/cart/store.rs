//! Persisted cart store.

use std::collections::HashSet;

use portal_cache::{Cache, CacheError, KvStore};

use crate::cart::{CartEvents, IdentityKey, LineItem, ScopeKey, Subscription};
use crate::error::CartError;
use crate::quote::QuoteDraft;

/// Whether `add` created a new line or merged into an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new line was appended.
    Added,
    /// The quantity of an existing line with the same identity was increased.
    Merged,
}

/// Result of [`CartStore::add`].
#[derive(Debug, Clone, PartialEq)]
pub struct CartMutation {
    /// The full cart after the add.
    pub items: Vec<LineItem>,
    /// Added or merged.
    pub outcome: AddOutcome,
}

/// Keyed, persisted collection of line items.
///
/// The store is the only writer of the persisted carts. Every public
/// operation reads the current value, computes the new one, writes it back
/// and notifies listeners before returning. Returned collections are owned
/// copies.
#[derive(Debug)]
pub struct CartStore<S> {
    cache: Cache<S>,
    events: CartEvents,
}

impl<S: KvStore> CartStore<S> {
    /// Create a store over a key-value port.
    pub fn new(store: S) -> Self {
        Self::with_events(store, CartEvents::new())
    }

    /// Create a store that notifies through an existing broadcaster.
    pub fn with_events(store: S, events: CartEvents) -> Self {
        Self {
            cache: Cache::new(store),
            events,
        }
    }

    /// The change broadcaster.
    pub fn events(&self) -> &CartEvents {
        &self.events
    }

    /// Register a change listener.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&ScopeKey) + Send + Sync + 'static,
    {
        self.events.subscribe(listener)
    }

    /// Read the cart for `scope`.
    ///
    /// Missing, unreadable or corrupt data reads as an empty cart. Stored
    /// duplicates are folded together and totals recomputed.
    pub fn load(&self, scope: &ScopeKey) -> Vec<LineItem> {
        self.try_load(scope).unwrap_or_else(|e| {
            tracing::warn!(%scope, error = %e, "cart unreadable; showing it empty");
            Vec::new()
        })
    }

    /// Read the cart for a mutation. Only missing or corrupt data reads as
    /// empty; a failing store is an error so the cart is never overwritten
    /// from a bad read.
    fn try_load(&self, scope: &ScopeKey) -> Result<Vec<LineItem>, CartError> {
        let key = scope.storage_key();
        let stored: Vec<LineItem> = match self.cache.get(&key) {
            Ok(Some(items)) => items,
            Ok(None) => return Ok(Vec::new()),
            Err(CacheError::SerializeError(e)) => {
                tracing::warn!(%scope, error = %e, "discarding corrupt cart");
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(CartError::LoadFailed {
                    scope: scope.clone(),
                    source,
                })
            }
        };

        let mut items = Vec::with_capacity(stored.len());
        for item in stored {
            if item.item_code.is_empty() {
                tracing::warn!(%scope, "dropping stored line without item code");
                continue;
            }
            merge_line(&mut items, item);
        }
        Ok(items)
    }

    /// Add a line, merging into an existing line with the same identity.
    ///
    /// On merge the existing line keeps its price; only the quantity grows.
    pub fn add(&self, scope: &ScopeKey, incoming: LineItem) -> Result<CartMutation, CartError> {
        let mut items = self.try_load(scope)?;
        let identity = incoming.identity_key();
        let outcome = merge_line(&mut items, incoming);
        tracing::debug!(%scope, %identity, ?outcome, "add to cart");
        let items = self.persist(scope, items)?;
        Ok(CartMutation { items, outcome })
    }

    /// Remove the line with `identity`. Unknown identities are a no-op.
    pub fn remove(
        &self,
        scope: &ScopeKey,
        identity: &IdentityKey,
    ) -> Result<Vec<LineItem>, CartError> {
        let mut items = self.try_load(scope)?;
        items.retain(|i| &i.identity_key() != identity);
        tracing::debug!(%scope, %identity, "remove from cart");
        self.persist(scope, items)
    }

    /// Remove every line whose identity is in `identities`, in one write.
    pub fn remove_many(
        &self,
        scope: &ScopeKey,
        identities: &HashSet<IdentityKey>,
    ) -> Result<Vec<LineItem>, CartError> {
        let mut items = self.try_load(scope)?;
        items.retain(|i| !identities.contains(&i.identity_key()));
        tracing::debug!(%scope, count = identities.len(), "remove many from cart");
        self.persist(scope, items)
    }

    /// Set a line's quantity, clamped to at least 1.
    pub fn update_quantity(
        &self,
        scope: &ScopeKey,
        identity: &IdentityKey,
        quantity: i64,
    ) -> Result<Vec<LineItem>, CartError> {
        self.modify_line(scope, identity, |item| item.set_quantity(quantity))
    }

    /// Shift a line's quantity by `delta`, clamped to at least 1.
    pub fn update_quantity_delta(
        &self,
        scope: &ScopeKey,
        identity: &IdentityKey,
        delta: i64,
    ) -> Result<Vec<LineItem>, CartError> {
        self.modify_line(scope, identity, |item| item.adjust_quantity(delta))
    }

    /// Delete the persisted cart entirely.
    pub fn clear(&self, scope: &ScopeKey) -> Result<(), CartError> {
        self.cache
            .delete(&scope.storage_key())
            .map_err(|source| {
                tracing::warn!(%scope, error = %source, "failed to clear cart");
                CartError::ClearFailed {
                    scope: scope.clone(),
                    source,
                }
            })?;
        tracing::debug!(%scope, "cleared cart");
        self.events.emit(scope);
        Ok(())
    }

    /// Move every line of `from` into `into` (guest cart on sign-in).
    ///
    /// Lines merge by identity with the target's prices kept. The source cart
    /// is deleted after the target is saved. Both scopes are notified.
    ///
    /// If the target saves but deleting the source fails, the error is
    /// returned and the source lines stay; retrying merges them again.
    pub fn adopt(&self, from: &ScopeKey, into: &ScopeKey) -> Result<Vec<LineItem>, CartError> {
        if from == into {
            return self.try_load(into);
        }

        let incoming = self.try_load(from)?;
        if incoming.is_empty() {
            return self.try_load(into);
        }

        let mut items = self.try_load(into)?;
        let moved = incoming.len();
        for item in incoming {
            merge_line(&mut items, item);
        }
        tracing::debug!(%from, %into, moved, "adopting cart");

        let items = self.persist(into, items)?;
        self.clear(from)?;
        Ok(items)
    }

    /// Turn the selected lines into a quote draft and remove them from the cart.
    pub fn take_for_quote(
        &self,
        scope: &ScopeKey,
        selected: &HashSet<IdentityKey>,
        memo: Option<String>,
    ) -> Result<QuoteDraft, CartError> {
        let items = self.try_load(scope)?;
        let mut draft = QuoteDraft::from_selection(scope.clone(), &items, selected)?;
        draft.memo = memo.filter(|m| !m.trim().is_empty());

        let taken: HashSet<IdentityKey> = draft.line_keys().collect();
        self.remove_many(scope, &taken)?;
        tracing::debug!(%scope, lines = draft.lines.len(), "quote drafted");
        Ok(draft)
    }

    fn modify_line<F>(
        &self,
        scope: &ScopeKey,
        identity: &IdentityKey,
        change: F,
    ) -> Result<Vec<LineItem>, CartError>
    where
        F: FnOnce(&mut LineItem),
    {
        let mut items = self.try_load(scope)?;
        if let Some(item) = items.iter_mut().find(|i| &i.identity_key() == identity) {
            change(item);
            tracing::debug!(%scope, %identity, quantity = item.quantity(), "quantity changed");
        }
        self.persist(scope, items)
    }

    fn persist(&self, scope: &ScopeKey, items: Vec<LineItem>) -> Result<Vec<LineItem>, CartError> {
        if let Err(source) = self.cache.set(&scope.storage_key(), &items) {
            tracing::warn!(%scope, error = %source, "failed to save cart");
            return Err(CartError::PersistFailed {
                scope: scope.clone(),
                items,
                source,
            });
        }
        self.events.emit(scope);
        Ok(items)
    }
}

/// Merge `incoming` into `items` by identity.
///
/// An existing line keeps its price and gains the incoming quantity;
/// otherwise the line is appended.
pub fn merge_line(items: &mut Vec<LineItem>, incoming: LineItem) -> AddOutcome {
    let identity = incoming.identity_key();
    match items.iter_mut().find(|i| i.identity_key() == identity) {
        Some(existing) => {
            existing.adjust_quantity(incoming.quantity());
            AddOutcome::Merged
        }
        None => {
            items.push(incoming);
            AddOutcome::Added
        }
    }
}
