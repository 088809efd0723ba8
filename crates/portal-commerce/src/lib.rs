//! Cart, listing and quote logic for the ordering portal.
//!
//! This crate holds the parts of the portal that carry real invariants:
//!
//! - **Cart**: line items merged by `(item, option, option value)` identity,
//!   persisted per customer or guest through a [`portal_cache::KvStore`],
//!   with change notifications
//! - **Listing**: field-type-aware sorting, filtering and pagination of
//!   in-memory collections
//! - **Quote**: quote-request drafts built from selected cart lines
//!
//! # Example
//!
//! ```rust
//! use portal_cache::MemoryStore;
//! use portal_commerce::prelude::*;
//!
//! let store = CartStore::new(MemoryStore::new());
//! let scope = ScopeKey::guest();
//!
//! store.add(&scope, LineItem::new("A1", 1000, 2)).unwrap();
//! let merged = store.add(&scope, LineItem::new("A1", 1000, 3)).unwrap();
//!
//! assert_eq!(merged.outcome, AddOutcome::Merged);
//! assert_eq!(merged.items[0].total_amount(), 5000);
//!
//! let page = paginate(&store.load(&scope), 1, 10);
//! assert_eq!((page.start_ordinal(), page.end_ordinal()), (1, 1));
//! ```

pub mod error;

pub mod cart;
pub mod listing;
pub mod quote;

pub use error::CartError;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CartError;

    // Cart
    pub use crate::cart::{
        identity_key_of, same_identity, AddOutcome, CartEvents, CartMutation, CartStore,
        CartSummary, IdentityKey, LineItem, ScopeKey, Subscription,
    };

    // Listing
    pub use crate::listing::{
        apply_filters, paginate, sort_by, FieldAccess, FieldKind, FieldValue, Filter, ListView,
        PageView, Pagination, SortColumns, SortDirection, SortSpec, SortState,
    };

    // Quote
    pub use crate::quote::QuoteDraft;
}
