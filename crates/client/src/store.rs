use chrono::NaiveDate;
use shared_types::{last_n_days_range, AppError, PlateRecord, SearchQuery};

use crate::pager::Pager;
use crate::plates::PlateApi;

/// Ticket handed out by [`PlateStore::begin`], identifying one fetch. The
/// store only accepts results presented with a ticket newer than anything it
/// has already applied, so a slow early response can never overwrite a
/// faster later one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

/// Holds the current result list, its pagination, and the loading/error
/// flags, with sequence fencing across overlapping fetches. The UI layer
/// wraps this in a signal; the store itself is synchronous and testable.
#[derive(Debug, Clone)]
pub struct PlateStore {
    items: Vec<PlateRecord>,
    pager: Pager,
    loading: bool,
    error: Option<String>,
    last_query: SearchQuery,
    next_seq: u64,
    applied_seq: u64,
}

impl Default for PlateStore {
    fn default() -> Self {
        Self::new(25)
    }
}

impl PlateStore {
    pub fn new(per_page: usize) -> Self {
        Self {
            items: Vec::new(),
            pager: Pager::new(per_page),
            loading: false,
            error: None,
            last_query: SearchQuery::default(),
            next_seq: 0,
            applied_seq: 0,
        }
    }

    pub fn items(&self) -> &[PlateRecord] {
        &self.items
    }

    /// The slice of items belonging to the current page.
    pub fn page(&self) -> &[PlateRecord] {
        self.pager.slice(&self.items)
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    pub fn pager_mut(&mut self) -> &mut Pager {
        &mut self.pager
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The query whose results are currently displayed, echoed in the UI.
    pub fn last_query(&self) -> &SearchQuery {
        &self.last_query
    }

    /// Start a fetch: raises the loading flag, clears any stale error and
    /// returns the ticket the eventual result must present.
    pub fn begin(&mut self) -> FetchTicket {
        self.next_seq += 1;
        self.loading = true;
        self.error = None;
        FetchTicket(self.next_seq)
    }

    /// Apply a finished fetch. Returns `false` when the ticket lost the race
    /// and the result was discarded. The loading flag only drops when the
    /// newest outstanding fetch settles.
    pub fn apply(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<PlateRecord>, AppError>,
        query: SearchQuery,
    ) -> bool {
        if ticket.0 <= self.applied_seq {
            tracing::debug!(ticket = ticket.0, applied = self.applied_seq, "stale fetch discarded");
            return false;
        }
        self.applied_seq = ticket.0;
        if ticket.0 == self.next_seq {
            self.loading = false;
        }
        match result {
            Ok(items) => {
                self.pager.reset(items.len());
                self.items = items;
                self.error = None;
                self.last_query = query;
            }
            Err(err) => {
                self.items.clear();
                self.pager.reset(0);
                self.error = Some(err.user_message());
                self.last_query = query;
            }
        }
        true
    }
}

/// Query for the "last N days" quick-range buttons, today inclusive.
pub fn last_n_days_query(today: NaiveDate, days: u32) -> SearchQuery {
    let (start, end) = last_n_days_range(today, days);
    SearchQuery::date_range(start, end)
}

/// One fetch, routed by query shape: an empty query means "show the latest
/// records", anything else goes through search. A search without an explicit
/// limit inherits the configured default.
pub async fn fetch_plates(
    api: &PlateApi,
    query: &SearchQuery,
    default_limit: usize,
) -> Result<Vec<PlateRecord>, AppError> {
    if query.is_empty() {
        api.latest(query.limit.unwrap_or(default_limit)).await
    } else {
        let mut query = query.clone();
        query.limit = Some(query.limit.unwrap_or(default_limit));
        api.search(&query).await
    }
}
