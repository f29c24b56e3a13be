//! Search session state machine
//!
//! Owns the (query, page, selected movie) triple. Every request the session
//! asks for is tagged with a [`RequestKey`]; a settlement is applied only if
//! its key is still the latest one issued, so a slow response for a
//! superseded query or page can never overwrite newer state.

use super::tmdb_client::{SearchError, SearchErrorKind};
use super::types::{MovieSummary, ResultPage, SessionSnapshot, SessionStatus};

/// Identity of one issued request
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestKey {
    pub generation: u64,
    pub query: String,
    pub page: u32,
}

/// Something the user should be told about after a settlement
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    NoResults { query: String },
    RequestFailed { kind: SearchErrorKind },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Settlement {
    /// The request was superseded; nothing changed
    Stale,
    Applied(Option<Notice>),
}

#[derive(Clone, Debug)]
enum Outcome {
    Loaded(ResultPage),
    Failed(SearchErrorKind),
}

#[derive(Debug)]
pub struct SearchSession {
    query: String,
    page: u32,
    selected: Option<MovieSummary>,
    generation: u64,
    in_flight: Option<RequestKey>,
    outcome: Option<Outcome>,
    /// Total pages reported for the current query, kept while paging
    total_pages: u32,
    /// Query for which the no-results notice already fired
    empty_notified_for: Option<String>,
}

impl SearchSession {
    pub fn new() -> Self {
        Self {
            query: String::new(),
            page: 1,
            selected: None,
            generation: 0,
            in_flight: None,
            outcome: None,
            total_pages: 0,
            empty_notified_for: None,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn selected(&self) -> Option<&MovieSummary> {
        self.selected.as_ref()
    }

    pub fn status(&self) -> SessionStatus {
        if self.query.is_empty() {
            return SessionStatus::Idle;
        }
        if self.in_flight.is_some() {
            return SessionStatus::Loading;
        }
        if self.last_error().is_some() {
            return SessionStatus::Error;
        }
        match self.outcome {
            Some(Outcome::Loaded(_)) => SessionStatus::Success,
            _ => SessionStatus::Idle,
        }
    }

    /// Kind of the failure behind an Error status
    pub fn last_error(&self) -> Option<SearchErrorKind> {
        match self.outcome {
            Some(Outcome::Failed(kind)) if self.in_flight.is_none() => Some(kind),
            _ => None,
        }
    }

    /// Items of the current page; empty unless the status is Success
    pub fn items(&self) -> &[MovieSummary] {
        match &self.outcome {
            Some(Outcome::Loaded(page)) if self.in_flight.is_none() => &page.items,
            _ => &[],
        }
    }

    fn issue(&mut self) -> RequestKey {
        self.generation += 1;
        self.outcome = None;
        let key = RequestKey {
            generation: self.generation,
            query: self.query.clone(),
            page: self.page,
        };
        self.in_flight = Some(key.clone());
        key
    }

    /// Submit a query from the search bar.
    ///
    /// Returns the request to run, or `None` when the submission is empty or
    /// repeats the current query.
    pub fn submit_query(&mut self, raw: &str) -> Option<RequestKey> {
        let query = raw.trim();
        if query.is_empty() || query == self.query {
            return None;
        }

        self.query = query.to_string();
        self.page = 1;
        self.selected = None;
        self.total_pages = 0;
        self.empty_notified_for = None;
        Some(self.issue())
    }

    /// Move to another page of the current query. Selection is kept.
    pub fn change_page(&mut self, page: u32) -> Option<RequestKey> {
        if self.query.is_empty() || page == 0 || page == self.page {
            return None;
        }
        // Only a settled multi-page result offers other pages
        if self.total_pages <= 1 || page > self.total_pages {
            return None;
        }

        self.page = page;
        Some(self.issue())
    }

    /// Apply the result of a request, unless it has been superseded.
    pub fn settle(
        &mut self,
        key: &RequestKey,
        result: Result<ResultPage, SearchError>,
    ) -> Settlement {
        let is_current = self.in_flight.as_ref() == Some(key)
            && key.query == self.query
            && key.page == self.page;
        if !is_current {
            return Settlement::Stale;
        }
        self.in_flight = None;

        match result {
            Ok(page) => {
                self.total_pages = page.total_pages;
                let already_notified =
                    self.empty_notified_for.as_deref() == Some(self.query.as_str());
                let notice = if page.is_empty() && !already_notified {
                    self.empty_notified_for = Some(self.query.clone());
                    Some(Notice::NoResults {
                        query: self.query.clone(),
                    })
                } else {
                    None
                };
                self.outcome = Some(Outcome::Loaded(page));
                Settlement::Applied(notice)
            }
            Err(e) => {
                let kind = e.kind();
                self.outcome = Some(Outcome::Failed(kind));
                Settlement::Applied(Some(Notice::RequestFailed { kind }))
            }
        }
    }

    /// Select an item of the current page by position.
    pub fn select_movie(&mut self, index: usize) -> Option<&MovieSummary> {
        let movie = self.items().get(index).cloned()?;
        self.selected = Some(movie);
        self.selected.as_ref()
    }

    pub fn close_modal(&mut self) {
        self.selected = None;
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            query: self.query().to_string(),
            page: self.page(),
            total_pages: self.total_pages(),
            status: self.status(),
            items: self.items().to_vec(),
            selected: self.selected.clone(),
        }
    }
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new()
    }
}
