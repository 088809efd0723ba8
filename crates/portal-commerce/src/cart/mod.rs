//! Shopping cart module.
//!
//! Contains line items, the identity resolver, scopes, change notifications,
//! totals and the persisted cart store.

mod events;
mod identity;
mod line_item;
mod scope;
mod store;
mod summary;

pub use events::{CartEvents, Subscription};
pub use identity::{identity_key_of, same_identity, IdentityKey};
pub use line_item::{LineItem, MIN_QUANTITY};
pub use scope::{ScopeKey, CART_KEY_PREFIX, GUEST_SCOPE};
pub use store::{merge_line, AddOutcome, CartMutation, CartStore};
pub use summary::CartSummary;
