//! Stateful query context for a presentation layer.
//!
//! A [`ListView`] holds the filter, sort, and page count a list screen is
//! showing, and re-derives the visible page from whatever snapshot it is
//! handed. Growth ("load more") is split into request and completion so
//! the caller may put latency between them:
//!
//! ```text
//! let ticket = view.request_growth(&snapshot)?;   // stamped with the generation
//! // ... caller-side delay ...
//! view.complete_growth(ticket, &snapshot);        // Stale if criteria changed
//! ```
//!
//! The generation advances whenever the filter, the sort, or the observed
//! collection version changes. Each of those also resets the page count
//! to 1 and forgets any pending growth.

use basket_model::Snapshot;
use tracing::debug;

use crate::engine::{DEFAULT_PAGE_SIZE, ListPage, ListQuery, run_query};
use crate::filter::ListFilter;
use crate::sort::SortSpec;

/// A growth request stamped with the query generation it was issued under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrowthTicket {
    generation: u64,
    page_count: usize,
}

impl GrowthTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Page count the view will have once the ticket is applied.
    pub fn target_page_count(&self) -> usize {
        self.page_count
    }
}

/// What happened to a growth request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrowthOutcome {
    /// The prefix grew by one page.
    Applied,
    /// The query changed after the request was issued; the result was dropped.
    Stale,
    /// Everything is already visible; nothing changed.
    Exhausted,
    /// Another growth request is still outstanding.
    Pending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CacheKey {
    version: u64,
    query: ListQuery,
}

#[derive(Debug, Clone)]
pub struct ListView {
    filter: ListFilter,
    sort: SortSpec,
    page_size: usize,
    page_count: usize,
    generation: u64,
    seen_version: Option<u64>,
    pending: Option<GrowthTicket>,
    cache: Option<(CacheKey, ListPage)>,
}

impl Default for ListView {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl ListView {
    /// A view with default filter and sort. A zero page size is treated as 1.
    pub fn new(page_size: usize) -> Self {
        Self {
            filter: ListFilter::default(),
            sort: SortSpec::default(),
            page_size: page_size.max(1),
            page_count: 1,
            generation: 0,
            seen_version: None,
            pending: None,
            cache: None,
        }
    }

    pub fn filter(&self) -> &ListFilter {
        &self.filter
    }

    pub fn sort(&self) -> SortSpec {
        self.sort
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// The query the next render evaluates.
    pub fn query(&self) -> ListQuery {
        ListQuery {
            filter: self.filter.clone(),
            sort: self.sort,
            page_count: self.page_count,
            page_size: self.page_size,
        }
    }

    /// Replace the filter. A different filter starts a new generation.
    pub fn set_filter(&mut self, filter: ListFilter) {
        if filter != self.filter {
            self.filter = filter;
            self.restart("filter changed");
        }
    }

    /// Replace the sort. A different sort starts a new generation.
    pub fn set_sort(&mut self, sort: SortSpec) {
        if sort != self.sort {
            self.sort = sort;
            self.restart("sort changed");
        }
    }

    /// The visible page for `snapshot`, recomputed only when an input changed.
    pub fn render(&mut self, snapshot: &Snapshot) -> &ListPage {
        self.observe(snapshot);
        let key = CacheKey {
            version: snapshot.version(),
            query: self.query(),
        };
        if self.cache.as_ref().is_some_and(|(cached, _)| *cached != key) {
            self.cache = None;
        }
        let (_, page) = self.cache.get_or_insert_with(|| {
            debug!(
                version = key.version,
                page_count = key.query.page_count,
                sort = %key.query.sort,
                "recomputing list page"
            );
            let page = run_query(snapshot, &key.query);
            (key, page)
        });
        page
    }

    /// Ask for one more page.
    ///
    /// Returns `None` while another request is pending or when the whole
    /// filtered list is already visible.
    pub fn request_growth(&mut self, snapshot: &Snapshot) -> Option<GrowthTicket> {
        if self.pending.is_some() {
            return None;
        }
        if !self.render(snapshot).has_more {
            return None;
        }
        let ticket = GrowthTicket {
            generation: self.generation,
            page_count: self.page_count + 1,
        };
        self.pending = Some(ticket);
        Some(ticket)
    }

    /// Apply a ticket from [`ListView::request_growth`].
    ///
    /// Tickets from an older generation are dropped as [`GrowthOutcome::Stale`].
    pub fn complete_growth(&mut self, ticket: GrowthTicket, snapshot: &Snapshot) -> GrowthOutcome {
        self.observe(snapshot);
        if ticket.generation != self.generation {
            debug!(
                ticket = ticket.generation,
                current = self.generation,
                "dropping stale growth result"
            );
            return GrowthOutcome::Stale;
        }
        self.pending = None;
        if !self.render(snapshot).has_more {
            return GrowthOutcome::Exhausted;
        }
        self.page_count = ticket.page_count;
        GrowthOutcome::Applied
    }

    /// Request and complete one growth step with no delay in between.
    pub fn grow(&mut self, snapshot: &Snapshot) -> GrowthOutcome {
        if self.pending.is_some() {
            return GrowthOutcome::Pending;
        }
        match self.request_growth(snapshot) {
            Some(ticket) => self.complete_growth(ticket, snapshot),
            None => GrowthOutcome::Exhausted,
        }
    }

    fn observe(&mut self, snapshot: &Snapshot) {
        let version = snapshot.version();
        match self.seen_version {
            Some(seen) if seen == version => {}
            Some(_) => {
                self.seen_version = Some(version);
                self.restart("collection changed");
            }
            None => self.seen_version = Some(version),
        }
    }

    fn restart(&mut self, reason: &'static str) {
        self.generation += 1;
        self.page_count = 1;
        self.pending = None;
        debug!(generation = self.generation, reason, "list query restarted");
    }
}
