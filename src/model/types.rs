//! Core type definitions for the application

use serde::Deserialize;

/// A movie as returned by the TMDB search endpoint
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct MovieSummary {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub vote_average: f64,
}

/// One page of search results
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResultPage {
    pub items: Vec<MovieSummary>,
    pub total_pages: u32,
}

impl ResultPage {
    /// The uniform "no search" page: no items, no pages
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Status of the current (query, page) request, derived by the session
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    Idle,
    Loading,
    Success,
    Error,
}

impl SessionStatus {
    pub fn label(self) -> &'static str {
        match self {
            SessionStatus::Idle => "Idle",
            SessionStatus::Loading => "Loading",
            SessionStatus::Success => "Ready",
            SessionStatus::Error => "Error",
        }
    }
}

/// Read-only copy of the session handed to the view each frame
#[derive(Clone, Debug)]
pub struct SessionSnapshot {
    pub query: String,
    pub page: u32,
    pub total_pages: u32,
    pub status: SessionStatus,
    pub items: Vec<MovieSummary>,
    pub selected: Option<MovieSummary>,
}

impl SessionSnapshot {
    /// The pager is only shown when there is more than one page to move to
    pub fn shows_pager(&self) -> bool {
        !self.query.is_empty() && self.total_pages > 1
    }
}

/// Which section of the UI has keyboard focus
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActiveSection {
    Search,
    Results,
}

impl ActiveSection {
    pub fn next(self) -> Self {
        match self {
            ActiveSection::Search => ActiveSection::Results,
            ActiveSection::Results => ActiveSection::Search,
        }
    }
}

/// UI state that is not part of the search session
#[derive(Clone, Debug)]
pub struct UiState {
    pub active_section: ActiveSection,
    /// Text typed into the search bar, submitted on Enter
    pub input: String,
    pub grid_selected: usize,
    /// Last known terminal size (width, height), used for mouse hit-testing
    pub viewport: (u16, u16),
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            active_section: ActiveSection::Search,
            input: String::new(),
            grid_selected: 0,
            viewport: (0, 0),
        }
    }
}
