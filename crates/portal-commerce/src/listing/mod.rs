//! Client-side listing: filtering, sorting and pagination over
//! collections fetched from the portal API.

mod field;
mod filter;
mod pagination;
mod sort;
mod view;

pub use field::{FieldAccess, FieldValue};
pub use filter::{apply_filters, Filter};
pub use pagination::{paginate, PageView, Pagination, DEFAULT_PAGE_SIZE};
pub use sort::{sort_by, FieldKind, SortColumns, SortDirection, SortSpec, SortState};
pub use view::ListView;
