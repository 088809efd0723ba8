//! Cart persistence scopes.

use portal_cache::cache_key;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix of every persisted cart key.
pub const CART_KEY_PREFIX: &str = "cart";

/// Scope identifier used when nobody is signed in.
pub const GUEST_SCOPE: &str = "guest";

/// The namespace a cart belongs to: one customer, or the guest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScopeKey(String);

impl ScopeKey {
    /// Scope for a signed-in customer code.
    pub fn customer(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// The guest scope.
    pub fn guest() -> Self {
        Self(GUEST_SCOPE.to_string())
    }

    /// Customer scope when a non-blank code is present, guest otherwise.
    pub fn for_session(customer_code: Option<&str>) -> Self {
        match customer_code.map(str::trim) {
            Some(code) if !code.is_empty() => Self::customer(code),
            _ => Self::guest(),
        }
    }

    /// Whether this is the guest scope.
    pub fn is_guest(&self) -> bool {
        self.0 == GUEST_SCOPE
    }

    /// The scope identifier (customer code or `guest`).
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The key the cart is persisted under, e.g. `cart_C001`.
    pub fn storage_key(&self) -> String {
        cache_key!(CART_KEY_PREFIX, self.0)
    }
}

impl fmt::Display for ScopeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_keys() {
        assert_eq!(ScopeKey::guest().storage_key(), "cart_guest");
        assert_eq!(ScopeKey::customer("C001").storage_key(), "cart_C001");
    }

    #[test]
    fn test_for_session() {
        assert!(ScopeKey::for_session(None).is_guest());
        assert!(ScopeKey::for_session(Some("  ")).is_guest());
        assert_eq!(ScopeKey::for_session(Some("C001")).as_str(), "C001");
    }
}
