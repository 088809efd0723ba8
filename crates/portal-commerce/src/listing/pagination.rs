//! Client-side pagination.

use serde::{Deserialize, Serialize};

/// Pagination info.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    /// Current page (1-indexed).
    pub page: usize,
    /// Items per page.
    pub per_page: usize,
    /// Total number of items.
    pub total: usize,
    /// Total number of pages. 0 when there are no items.
    pub total_pages: usize,
    /// Whether there's a next page.
    pub has_next: bool,
    /// Whether there's a previous page.
    pub has_prev: bool,
}

impl Pagination {
    /// Create pagination info. A `per_page` of 0 is treated as 1.
    pub fn new(page: usize, per_page: usize, total: usize) -> Self {
        let per_page = per_page.max(1);
        let total_pages = total.div_ceil(per_page);

        Self {
            page,
            per_page,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }

    /// Index of the first item on this page.
    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.per_page)
    }

    /// Get page numbers for display (e.g., [3, 4, 5, 6, 7]).
    pub fn page_numbers(&self, max_visible: usize) -> Vec<usize> {
        if self.total_pages <= max_visible {
            return (1..=self.total_pages).collect();
        }
        if max_visible == 0 {
            return Vec::new();
        }

        let half = max_visible / 2;
        let start = self.page.saturating_sub(half).max(1);
        let end = (start + max_visible - 1).min(self.total_pages);
        let start = (end + 1).saturating_sub(max_visible).max(1);

        (start..=end).collect()
    }

    /// Check if on first page.
    pub fn is_first(&self) -> bool {
        self.page <= 1
    }

    /// Check if on last page.
    pub fn is_last(&self) -> bool {
        self.page >= self.total_pages
    }

    /// Whether `page` has no items: 0, or past the last page.
    pub fn is_out_of_range(&self) -> bool {
        self.page == 0 || self.page > self.total_pages
    }

    /// 1-based ordinal of the first item shown, or 0 for an empty page.
    pub fn start_item(&self) -> usize {
        if self.is_out_of_range() {
            0
        } else {
            self.offset() + 1
        }
    }

    /// 1-based ordinal of the last item shown, or 0 for an empty page.
    pub fn end_item(&self) -> usize {
        if self.is_out_of_range() {
            0
        } else {
            self.page.saturating_mul(self.per_page).min(self.total)
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE, 0)
    }
}

/// Page size used when none is configured.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// One page of a collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PageView<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Pagination info.
    pub pagination: Pagination,
}

impl<T> PageView<T> {
    /// Requested page (1-based).
    pub fn page_index(&self) -> usize {
        self.pagination.page
    }

    /// Items per page.
    pub fn page_size(&self) -> usize {
        self.pagination.per_page
    }

    /// Size of the whole collection.
    pub fn total_items(&self) -> usize {
        self.pagination.total
    }

    /// Number of pages.
    pub fn total_pages(&self) -> usize {
        self.pagination.total_pages
    }

    /// Display ordinal of the first item (0 for an empty page).
    pub fn start_ordinal(&self) -> usize {
        self.pagination.start_item()
    }

    /// Display ordinal of the last item (0 for an empty page).
    pub fn end_ordinal(&self) -> usize {
        self.pagination.end_item()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get number of items in this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// Slice `collection` into page `page_index` (1-based) of `page_size` items.
///
/// Page 0 and pages past the end come back empty rather than being corrected;
/// the caller decides whether to jump back to page 1.
pub fn paginate<T: Clone>(collection: &[T], page_index: usize, page_size: usize) -> PageView<T> {
    let pagination = Pagination::new(page_index, page_size, collection.len());
    let items = if pagination.is_out_of_range() {
        Vec::new()
    } else {
        let start = pagination.offset();
        let end = start.saturating_add(pagination.per_page).min(collection.len());
        collection.get(start..end).map(<[T]>::to_vec).unwrap_or_default()
    };
    PageView { items, pagination }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_basics() {
        let p = Pagination::new(2, 10, 45);
        assert_eq!(p.total_pages, 5);
        assert!(p.has_next);
        assert!(p.has_prev);
        assert_eq!(p.offset(), 10);
    }

    #[test]
    fn test_pagination_first_page() {
        let p = Pagination::new(1, 10, 45);
        assert!(!p.has_prev);
        assert!(p.has_next);
        assert!(p.is_first());
        assert!(!p.is_last());
    }

    #[test]
    fn test_pagination_last_page() {
        let p = Pagination::new(5, 10, 45);
        assert!(p.has_prev);
        assert!(!p.has_next);
        assert!(!p.is_first());
        assert!(p.is_last());
    }

    #[test]
    fn test_no_items_no_pages() {
        let p = Pagination::new(1, 10, 0);
        assert_eq!(p.total_pages, 0);
        assert!(!p.has_next);
        assert_eq!(p.start_item(), 0);
        assert_eq!(p.end_item(), 0);
    }

    #[test]
    fn test_zero_page_size() {
        let p = Pagination::new(1, 0, 3);
        assert_eq!(p.per_page, 1);
        assert_eq!(p.total_pages, 3);
    }

    #[test]
    fn test_pagination_page_numbers() {
        let p = Pagination::new(5, 10, 100);
        assert_eq!(p.page_numbers(5), vec![3, 4, 5, 6, 7]);

        let p = Pagination::new(10, 10, 100);
        assert_eq!(p.page_numbers(5), vec![6, 7, 8, 9, 10]);

        let p = Pagination::new(1, 10, 30);
        assert_eq!(p.page_numbers(5), vec![1, 2, 3]);
    }

    #[test]
    fn test_paginate_boundary() {
        let items: Vec<u32> = (1..=25).collect();

        let page = paginate(&items, 1, 10);
        assert_eq!(page.len(), 10);
        assert_eq!((page.start_ordinal(), page.end_ordinal()), (1, 10));

        let page = paginate(&items, 3, 10);
        assert_eq!(page.items, vec![21, 22, 23, 24, 25]);
        assert_eq!((page.start_ordinal(), page.end_ordinal()), (21, 25));

        let page = paginate(&items, 4, 10);
        assert!(page.is_empty());
        assert_eq!(page.total_pages(), 3);
        assert_eq!((page.start_ordinal(), page.end_ordinal()), (0, 0));
    }

    #[test]
    fn test_page_zero_is_empty() {
        let items = vec!['a', 'b'];
        let page = paginate(&items, 0, 10);
        assert!(page.is_empty());
        assert_eq!(page.total_items(), 2);
    }
}
