//! Line-item identity.
//!
//! Two line items are the same cart entry iff their
//! `(item code, option code, option value code)` triples are equal, with
//! missing option fields treated as the empty string. The triple is the
//! merge key for every cart operation.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::cart::LineItem;

/// The merge key of a line item.
///
/// Components are kept apart rather than joined into one string, so any two
/// distinct triples compare unequal whatever characters the codes contain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IdentityKey {
    #[serde(rename = "itemCd")]
    item_code: String,
    #[serde(rename = "optCd", default)]
    option_code: String,
    #[serde(rename = "optValCd", default)]
    option_value_code: String,
}

impl IdentityKey {
    /// Build a key from its components.
    pub fn from_parts(item_code: &str, option_code: &str, option_value_code: &str) -> Self {
        Self {
            item_code: item_code.to_string(),
            option_code: option_code.to_string(),
            option_value_code: option_value_code.to_string(),
        }
    }

    /// Key for an item with no option selected.
    pub fn plain(item_code: &str) -> Self {
        Self::from_parts(item_code, "", "")
    }

    /// The `(item, option, option value)` components.
    pub fn parts(&self) -> (&str, &str, &str) {
        (&self.item_code, &self.option_code, &self.option_value_code)
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (item, option, value) = self.parts();
        if option.is_empty() && value.is_empty() {
            write!(f, "{}", item)
        } else {
            write!(f, "{}[{}={}]", item, option, value)
        }
    }
}

/// Compute the merge key of an item.
pub fn identity_key_of(item: &LineItem) -> IdentityKey {
    IdentityKey::from_parts(
        &item.item_code,
        &item.option_code,
        &item.option_value_code,
    )
}

/// Whether two items are the same cart entry.
pub fn same_identity(a: &LineItem, b: &LineItem) -> bool {
    identity_key_of(a) == identity_key_of(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_triples_share_identity() {
        let a = LineItem::new("A1", 1000, 1).with_option("COLOR", "RED");
        let b = LineItem::new("A1", 2000, 5).with_option("COLOR", "RED");
        assert!(same_identity(&a, &b));
    }

    #[test]
    fn test_option_value_distinguishes() {
        let a = LineItem::new("A1", 1000, 1).with_option("COLOR", "RED");
        let b = LineItem::new("A1", 1000, 1).with_option("COLOR", "BLUE");
        assert!(!same_identity(&a, &b));
    }

    #[test]
    fn test_option_code_distinguishes() {
        let a = LineItem::new("A1", 1000, 1).with_option("SIZE", "L");
        let b = LineItem::new("A1", 1000, 1).with_option("FIT", "L");
        assert_ne!(identity_key_of(&a), identity_key_of(&b));
    }

    #[test]
    fn test_missing_options_equal_empty() {
        let a = LineItem::new("A1", 1000, 1);
        assert_eq!(identity_key_of(&a), IdentityKey::plain("A1"));
        assert_eq!(identity_key_of(&a), IdentityKey::from_parts("A1", "", ""));
    }

    #[test]
    fn test_components_cannot_bleed() {
        let shifted = IdentityKey::from_parts("A", "1\u{1f}X", "");
        let honest = IdentityKey::from_parts("A", "1", "X");
        assert_ne!(shifted, honest);
    }

    #[test]
    fn test_control_characters_stay_significant() {
        let a = LineItem::new("A\u{1f}1", 1000, 1);
        let b = LineItem::new("A1", 1000, 1);
        assert!(!same_identity(&a, &b));
        assert_ne!(
            IdentityKey::from_parts("A\u{1f}1", "", ""),
            IdentityKey::plain("A1")
        );
    }

    #[test]
    fn test_parts_and_display() {
        let key = IdentityKey::from_parts("A1", "COLOR", "RED");
        assert_eq!(key.parts(), ("A1", "COLOR", "RED"));
        assert_eq!(key.to_string(), "A1[COLOR=RED]");
        assert_eq!(IdentityKey::plain("B2").to_string(), "B2");
    }
}
