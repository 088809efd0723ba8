//! Price-quote request drafts.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cart::{CartSummary, IdentityKey, LineItem, ScopeKey};
use crate::error::CartError;

/// A quote request assembled from selected cart lines, ready to submit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuoteDraft {
    /// Whose cart the lines came from.
    pub requester: ScopeKey,
    /// Selected lines, in cart order.
    pub lines: Vec<LineItem>,
    /// Totals over `lines`.
    pub summary: CartSummary,
    /// Note for the sales team.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    /// When the draft was built.
    pub created_at: DateTime<Utc>,
}

impl QuoteDraft {
    /// Build a draft from the lines of `items` whose identity is in `selected`.
    ///
    /// Selected identities not present in the cart are ignored. Fails with
    /// [`CartError::EmptySelection`] when nothing matches.
    pub fn from_selection(
        requester: ScopeKey,
        items: &[LineItem],
        selected: &HashSet<IdentityKey>,
    ) -> Result<Self, CartError> {
        let lines: Vec<LineItem> = items
            .iter()
            .filter(|i| selected.contains(&i.identity_key()))
            .cloned()
            .collect();
        if lines.is_empty() {
            return Err(CartError::EmptySelection);
        }

        Ok(Self {
            requester,
            summary: CartSummary::of(&lines),
            lines,
            memo: None,
            created_at: Utc::now(),
        })
    }

    /// Identities of the lines in this draft.
    pub fn line_keys(&self) -> impl Iterator<Item = IdentityKey> + '_ {
        self.lines.iter().map(LineItem::identity_key)
    }
}
