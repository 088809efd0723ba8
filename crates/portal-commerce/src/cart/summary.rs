//! Cart totals.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::cart::{IdentityKey, LineItem};

/// Totals over a set of cart lines.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    /// Number of distinct lines.
    pub line_count: usize,
    /// Sum of quantities.
    pub total_quantity: i64,
    /// Sum of line totals, in won.
    pub total_amount: i64,
}

impl CartSummary {
    /// Summarize every line.
    pub fn of(items: &[LineItem]) -> Self {
        items.iter().fold(Self::default(), Self::accumulate)
    }

    /// Summarize only the lines whose identity is in `selected`.
    pub fn of_selected(items: &[LineItem], selected: &HashSet<IdentityKey>) -> Self {
        items
            .iter()
            .filter(|i| selected.contains(&i.identity_key()))
            .fold(Self::default(), Self::accumulate)
    }

    /// Check if no lines were counted.
    pub fn is_empty(&self) -> bool {
        self.line_count == 0
    }

    fn accumulate(mut self, item: &LineItem) -> Self {
        self.line_count += 1;
        self.total_quantity = self.total_quantity.saturating_add(item.quantity());
        self.total_amount = self.total_amount.saturating_add(item.total_amount());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary() {
        let items = vec![LineItem::new("A1", 1000, 2), LineItem::new("B2", 2000, 1)];
        let s = CartSummary::of(&items);
        assert_eq!(s.line_count, 2);
        assert_eq!(s.total_quantity, 3);
        assert_eq!(s.total_amount, 4000); // 2*1000 + 1*2000
    }

    #[test]
    fn test_selected_summary() {
        let items = vec![LineItem::new("A1", 1000, 2), LineItem::new("B2", 2000, 1)];
        let selected: HashSet<_> = [IdentityKey::plain("B2")].into_iter().collect();
        let s = CartSummary::of_selected(&items, &selected);
        assert_eq!(s.line_count, 1);
        assert_eq!(s.total_amount, 2000);
    }

    #[test]
    fn test_empty() {
        assert!(CartSummary::of(&[]).is_empty());
    }
}
