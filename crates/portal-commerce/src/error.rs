//! Commerce error types.

use portal_cache::CacheError;
use thiserror::Error;

use crate::cart::{LineItem, ScopeKey};

/// Errors that can occur in cart and quote operations.
///
/// Invalid quantities, duplicate inserts, unknown lines and corrupt stored
/// data are not errors: they are clamped, merged, ignored or read as empty.
#[derive(Error, Debug)]
pub enum CartError {
    /// The new cart state was computed but could not be written.
    ///
    /// `items` holds the state the caller intended, so it can be shown or
    /// retried. The previously persisted value is unchanged.
    #[error("Failed to save cart {scope}: {source}")]
    PersistFailed {
        scope: ScopeKey,
        items: Vec<LineItem>,
        #[source]
        source: CacheError,
    },

    /// The stored cart could not be read, so nothing was written.
    ///
    /// Corrupt data is not this error; it reads as an empty cart.
    #[error("Failed to read cart {scope}: {source}")]
    LoadFailed {
        scope: ScopeKey,
        #[source]
        source: CacheError,
    },

    /// The stored cart could not be deleted. It is unchanged.
    #[error("Failed to clear cart {scope}: {source}")]
    ClearFailed {
        scope: ScopeKey,
        #[source]
        source: CacheError,
    },

    /// A quote was requested with no matching cart lines.
    #[error("No cart lines selected")]
    EmptySelection,
}

impl CartError {
    /// The computed-but-unsaved cart, if this is a persistence failure.
    pub fn unsaved_items(&self) -> Option<&[LineItem]> {
        match self {
            CartError::PersistFailed { items, .. } => Some(items),
            CartError::LoadFailed { .. }
            | CartError::ClearFailed { .. }
            | CartError::EmptySelection => None,
        }
    }
}
