//! Field-type-aware sorting of in-memory collections.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::listing::FieldAccess;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Asc,
    /// Largest first.
    Desc,
}

impl SortDirection {
    /// The other direction.
    pub fn toggle(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// How a field's values compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Numbers; missing or non-numeric values count as 0.
    Numeric,
    /// Case-insensitive strings; missing values count as "".
    #[default]
    Text,
}

/// Which field to sort on, and which way.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortSpec {
    /// Field name.
    pub key: String,
    /// Direction.
    pub direction: SortDirection,
}

impl SortSpec {
    /// Ascending on `key`.
    pub fn asc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Asc,
        }
    }

    /// Descending on `key`.
    pub fn desc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Desc,
        }
    }
}

enum SortKey {
    Number(f64),
    Text(String),
}

impl SortKey {
    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            // Every key in one sort has the same kind.
            (SortKey::Number(_), SortKey::Text(_)) => Ordering::Less,
            (SortKey::Text(_), SortKey::Number(_)) => Ordering::Greater,
        }
    }
}

/// Return a sorted copy of `collection`. The input is not touched.
///
/// The sort is unstable: records with equal keys may come out in any order.
pub fn sort_by<T>(collection: &[T], spec: &SortSpec, kind: FieldKind) -> Vec<T>
where
    T: FieldAccess + Clone,
{
    let mut keyed: Vec<(SortKey, &T)> = collection
        .iter()
        .map(|item| {
            let value = item.field(&spec.key);
            let key = match kind {
                // -0.0 and 0.0 must tie.
                FieldKind::Numeric => SortKey::Number(value.as_number() + 0.0),
                FieldKind::Text => SortKey::Text(value.as_text().to_lowercase()),
            };
            (key, item)
        })
        .collect();

    keyed.sort_unstable_by(|(a, _), (b, _)| spec.direction.apply(a.compare(b)));
    keyed.into_iter().map(|(_, item)| item.clone()).collect()
}

/// Per-column field kinds. Unregistered columns sort as text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortColumns {
    kinds: HashMap<String, FieldKind>,
}

impl SortColumns {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `keys` as numeric columns.
    pub fn numeric<I, K>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        for key in keys {
            self.kinds.insert(key.into(), FieldKind::Numeric);
        }
        self
    }

    /// Register one column.
    pub fn with(mut self, key: impl Into<String>, kind: FieldKind) -> Self {
        self.kinds.insert(key.into(), kind);
        self
    }

    /// Kind of `key`.
    pub fn kind_of(&self, key: &str) -> FieldKind {
        self.kinds.get(key).copied().unwrap_or_default()
    }
}

/// Column-header sort selection.
///
/// Selecting a new key always starts ascending; selecting the current key
/// again flips the direction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    current: Option<SortSpec>,
}

impl SortState {
    /// No sort selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `key` and return the resulting spec.
    pub fn select(&mut self, key: &str) -> &SortSpec {
        let next = match self.current.take() {
            Some(spec) if spec.key == key => SortSpec {
                direction: spec.direction.toggle(),
                ..spec
            },
            _ => SortSpec::asc(key),
        };
        self.current.insert(next)
    }

    /// Set the spec directly.
    pub fn set(&mut self, spec: SortSpec) {
        self.current = Some(spec);
    }

    /// The active spec, if any.
    pub fn spec(&self) -> Option<&SortSpec> {
        self.current.as_ref()
    }

    /// Drop the active sort.
    pub fn clear(&mut self) {
        self.current = None;
    }
}
