//! In-memory list filters.

use serde::{Deserialize, Serialize};

use crate::listing::FieldAccess;

/// A filter over flat records.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Filter {
    /// Case-insensitive substring match on one field.
    Contains { key: String, needle: String },
    /// Case-insensitive substring match on any of several fields.
    AnyContains { keys: Vec<String>, needle: String },
    /// Exact match on a field's text form.
    Equals { key: String, value: String },
    /// Inclusive numeric range; missing values count as 0.
    Range {
        key: String,
        min: Option<f64>,
        max: Option<f64>,
    },
    /// Every inner filter must match.
    All(Vec<Filter>),
}

impl Filter {
    /// Create a substring filter on one field.
    pub fn contains(key: impl Into<String>, needle: impl Into<String>) -> Self {
        Filter::Contains {
            key: key.into(),
            needle: needle.into(),
        }
    }

    /// Create a substring filter across fields (the search box).
    pub fn any_contains<I, K>(keys: I, needle: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Filter::AnyContains {
            keys: keys.into_iter().map(Into::into).collect(),
            needle: needle.into(),
        }
    }

    /// Create an exact-match filter.
    pub fn equals(key: impl Into<String>, value: impl Into<String>) -> Self {
        Filter::Equals {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Create a numeric range filter.
    pub fn range(key: impl Into<String>, min: Option<f64>, max: Option<f64>) -> Self {
        Filter::Range {
            key: key.into(),
            min,
            max,
        }
    }

    /// Whether `item` passes. Blank search text matches everything.
    pub fn matches<T: FieldAccess + ?Sized>(&self, item: &T) -> bool {
        match self {
            Filter::Contains { key, needle } => {
                let needle = needle.trim().to_lowercase();
                needle.is_empty() || contains_ci(item, key, &needle)
            }
            Filter::AnyContains { keys, needle } => {
                let needle = needle.trim().to_lowercase();
                needle.is_empty() || keys.iter().any(|k| contains_ci(item, k, &needle))
            }
            Filter::Equals { key, value } => item.field(key).as_text() == *value,
            Filter::Range { key, min, max } => {
                let n = item.field(key).as_number();
                min.map_or(true, |m| n >= m) && max.map_or(true, |m| n <= m)
            }
            Filter::All(filters) => filters.iter().all(|f| f.matches(item)),
        }
    }
}

fn contains_ci<T: FieldAccess + ?Sized>(item: &T, key: &str, needle_lower: &str) -> bool {
    item.field(key).as_text().to_lowercase().contains(needle_lower)
}

/// Keep the records matching every filter, in their original order.
pub fn apply_filters<T>(collection: &[T], filters: &[Filter]) -> Vec<T>
where
    T: FieldAccess + Clone,
{
    collection
        .iter()
        .filter(|item| filters.iter().all(|f| f.matches(*item)))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn rows() -> Vec<Value> {
        vec![
            json!({"itemCd": "A1", "itemNm": "Steel Bolt", "lotNo": "L-01", "closingQty": 40}),
            json!({"itemCd": "B2", "itemNm": "Copper Wire", "lotNo": "L-02", "closingQty": 0}),
            json!({"itemCd": "C3", "itemNm": "steel nut", "lotNo": null, "closingQty": 12}),
        ]
    }

    fn codes(rows: &[Value]) -> Vec<&str> {
        rows.iter().map(|r| r["itemCd"].as_str().unwrap()).collect()
    }

    #[test]
    fn test_contains_is_case_insensitive() {
        let out = apply_filters(&rows(), &[Filter::contains("itemNm", "STEEL")]);
        assert_eq!(codes(&out), vec!["A1", "C3"]);
    }

    #[test]
    fn test_blank_needle_matches_all() {
        let out = apply_filters(&rows(), &[Filter::contains("itemNm", "  ")]);
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn test_any_contains() {
        let f = Filter::any_contains(["itemNm", "lotNo"], "l-02");
        let out = apply_filters(&rows(), &[f]);
        assert_eq!(codes(&out), vec!["B2"]);
    }

    #[test]
    fn test_range_and_equals() {
        let out = apply_filters(
            &rows(),
            &[Filter::All(vec![
                Filter::range("closingQty", Some(1.0), None),
                Filter::contains("itemNm", "steel"),
            ])],
        );
        assert_eq!(codes(&out), vec!["A1", "C3"]);

        let out = apply_filters(&rows(), &[Filter::equals("closingQty", "12")]);
        assert_eq!(codes(&out), vec!["C3"]);
    }

    #[test]
    fn test_no_filters_keeps_order() {
        let out = apply_filters(&rows(), &[]);
        assert_eq!(codes(&out), vec!["A1", "B2", "C3"]);
    }
}
