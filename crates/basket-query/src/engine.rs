//! The pure list query: filter, stable sort, then take a page-aligned prefix.
//!
//! Given the same inputs, [`run_query`] always returns the same page, so
//! callers may cache on the input tuple (see [`ListView`](crate::ListView)).

use basket_model::Item;
use serde::Serialize;
use tracing::trace;

use crate::filter::ListFilter;
use crate::sort::SortSpec;

/// Rows added to the visible prefix per growth step.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Inputs of one query evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListQuery {
    pub filter: ListFilter,
    pub sort: SortSpec,
    /// Number of pages to materialize; values below 1 count as 1.
    pub page_count: usize,
    pub page_size: usize,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            filter: ListFilter::default(),
            sort: SortSpec::default(),
            page_count: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ListQuery {
    /// Length of the prefix to materialize, before clamping to the result size.
    pub fn prefix_limit(&self) -> usize {
        self.page_count.max(1).saturating_mul(self.page_size.max(1))
    }
}

/// A visible row and its position in the source collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListRow {
    /// Index into the collection the query ran over, usable with
    /// `ItemStore::remove` / `ItemStore::update`.
    pub index: usize,
    pub item: Item,
}

/// Result of a query evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListPage {
    /// The materialized prefix of the filtered, sorted list.
    pub rows: Vec<ListRow>,
    /// Number of items passing the filter.
    pub filtered_len: usize,
    /// True while the prefix is shorter than the filtered list.
    pub has_more: bool,
    pub sort: SortSpec,
    pub page_count: usize,
}

impl ListPage {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.rows.iter().map(|row| &row.item)
    }
}

/// Filter then stable-sort `items`, keeping source indices.
///
/// Items that compare equal under `sort` keep their source order.
pub fn select<'a>(items: &'a [Item], filter: &ListFilter, sort: &SortSpec) -> Vec<(usize, &'a Item)> {
    let matcher = filter.matcher();
    let mut selected: Vec<(usize, &Item)> = items
        .iter()
        .enumerate()
        .filter(|(_, item)| matcher.matches(item))
        .collect();
    selected.sort_by(|(_, a), (_, b)| sort.compare(a, b));
    selected
}

/// Evaluate `query` over `items`.
pub fn run_query(items: &[Item], query: &ListQuery) -> ListPage {
    let selected = select(items, &query.filter, &query.sort);
    let filtered_len = selected.len();
    let limit = query.prefix_limit().min(filtered_len);
    let rows: Vec<ListRow> = selected
        .into_iter()
        .take(limit)
        .map(|(index, item)| ListRow {
            index,
            item: item.clone(),
        })
        .collect();
    trace!(
        source = items.len(),
        filtered = filtered_len,
        visible = rows.len(),
        sort = %query.sort,
        "evaluated list query"
    );
    ListPage {
        has_more: rows.len() < filtered_len,
        rows,
        filtered_len,
        sort: query.sort,
        page_count: query.page_count.max(1),
    }
}
