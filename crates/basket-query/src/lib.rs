//! List query engine for the shopping list.
//!
//! - [`run_query`]: pure filter → stable sort → prefix evaluation.
//! - [`ListView`]: the query context a list screen drives, with memoized
//!   rendering and generation-stamped growth requests.

#![deny(unsafe_code)]

pub mod engine;
pub mod filter;
pub mod sort;
pub mod view;

pub use engine::{DEFAULT_PAGE_SIZE, ListPage, ListQuery, ListRow, run_query, select};
pub use filter::{FilterMatcher, ListFilter};
pub use sort::{ParseSortKeyError, SortDirection, SortKey, SortSpec};
pub use view::{GrowthOutcome, GrowthTicket, ListView};
