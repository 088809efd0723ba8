//! List view state: filter, then sort, then paginate.

use crate::listing::{
    apply_filters, paginate, sort_by, FieldAccess, Filter, PageView, SortColumns, SortSpec,
    SortState, DEFAULT_PAGE_SIZE,
};

/// State behind one table or image grid.
///
/// Changing the page size or the filters returns to page 1. Replacing the
/// source keeps the current page, which may then be empty; see
/// [`ListView::reset_if_out_of_range`].
#[derive(Debug, Clone)]
pub struct ListView<T> {
    source: Vec<T>,
    filters: Vec<Filter>,
    sort: SortState,
    columns: SortColumns,
    page_index: usize,
    page_size: usize,
}

impl<T: FieldAccess + Clone> ListView<T> {
    /// A view over `source` on page 1 with the default page size.
    pub fn new(source: Vec<T>) -> Self {
        Self {
            source,
            filters: Vec::new(),
            sort: SortState::new(),
            columns: SortColumns::new(),
            page_index: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Set the column kinds used when sorting.
    pub fn with_columns(mut self, columns: SortColumns) -> Self {
        self.columns = columns;
        self
    }

    /// Set the initial page size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Replace the source collection (e.g. after a refetch).
    pub fn set_source(&mut self, source: Vec<T>) {
        self.source = source;
    }

    /// Change the page size and go back to page 1.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page_index = 1;
    }

    /// Replace the filters and go back to page 1.
    pub fn set_filters(&mut self, filters: Vec<Filter>) {
        self.filters = filters;
        self.page_index = 1;
    }

    /// Column-header click: new key sorts ascending, same key toggles.
    pub fn select_sort(&mut self, key: &str) -> SortSpec {
        self.sort.select(key).clone()
    }

    /// Set the sort directly.
    pub fn set_sort(&mut self, spec: SortSpec) {
        self.sort.set(spec);
    }

    /// Active sort.
    pub fn sort(&self) -> Option<&SortSpec> {
        self.sort.spec()
    }

    /// Jump to a page. Not corrected if out of range.
    pub fn go_to(&mut self, page_index: usize) {
        self.page_index = page_index;
    }

    /// Advance one page if there is one.
    pub fn next(&mut self) {
        if self.page_index < self.total_pages() {
            self.page_index += 1;
        }
    }

    /// Go back one page if there is one.
    pub fn prev(&mut self) {
        if self.page_index > 1 {
            self.page_index -= 1;
        }
    }

    /// Return to page 1 if the current page has no items but the list does.
    pub fn reset_if_out_of_range(&mut self) -> bool {
        let total_pages = self.total_pages();
        if total_pages > 0 && (self.page_index == 0 || self.page_index > total_pages) {
            self.page_index = 1;
            return true;
        }
        false
    }

    /// Current page number.
    pub fn page_index(&self) -> usize {
        self.page_index
    }

    /// Current page size.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of pages after filtering.
    pub fn total_pages(&self) -> usize {
        self.visible().len().div_ceil(self.page_size)
    }

    /// The filtered and sorted collection.
    pub fn visible(&self) -> Vec<T> {
        let filtered = apply_filters(&self.source, &self.filters);
        match self.sort.spec() {
            Some(spec) => sort_by(&filtered, spec, self.columns.kind_of(&spec.key)),
            None => filtered,
        }
    }

    /// The current page.
    pub fn page(&self) -> PageView<T> {
        paginate(&self.visible(), self.page_index, self.page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::SortDirection;
    use serde_json::{json, Value};

    fn stock(n: usize) -> Vec<Value> {
        (1..=n)
            .map(|i| json!({"itemCd": format!("I{:03}", i), "closingQty": i}))
            .collect()
    }

    #[test]
    fn test_page_size_change_resets_page() {
        let mut view = ListView::new(stock(25));
        view.go_to(3);
        assert_eq!(view.page().len(), 5);

        view.set_page_size(20);
        assert_eq!(view.page_index(), 1);
        assert_eq!(view.page().len(), 20);
    }

    #[test]
    fn test_filter_change_resets_page() {
        let mut view = ListView::new(stock(25));
        view.go_to(2);
        view.set_filters(vec![Filter::contains("itemCd", "I00")]);
        assert_eq!(view.page_index(), 1);
        assert_eq!(view.page().total_items(), 9);
    }

    #[test]
    fn test_sort_uses_column_kind() {
        let mut view = ListView::new(stock(12))
            .with_columns(SortColumns::new().numeric(["closingQty"]))
            .with_page_size(5);

        let spec = view.select_sort("closingQty");
        assert_eq!(spec.direction, SortDirection::Asc);
        let spec = view.select_sort("closingQty");
        assert_eq!(spec.direction, SortDirection::Desc);

        let page = view.page();
        assert_eq!(page.items[0]["closingQty"], 12);
        assert_eq!(page.items[4]["closingQty"], 8);
    }

    #[test]
    fn test_next_prev_stay_in_range() {
        let mut view = ListView::new(stock(15));
        view.prev();
        assert_eq!(view.page_index(), 1);
        view.next();
        view.next();
        assert_eq!(view.page_index(), 2);
    }

    #[test]
    fn test_shrinking_source_leaves_empty_page() {
        let mut view = ListView::new(stock(30));
        view.go_to(3);
        view.set_source(stock(5));
        assert!(view.page().is_empty());

        assert!(view.reset_if_out_of_range());
        assert_eq!(view.page().len(), 5);
    }
}
