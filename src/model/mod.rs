//! Model module - Application state and data types
//!
//! - `types`: Core type definitions (movies, result pages, UI state)
//! - `tmdb_client`: TMDB search API client
//! - `session`: Search session state machine (query, page, selection)
//! - `notifications`: Toast notifications
//! - `overlay`: The single modal overlay slot
//! - `app_model`: Main application model with state management methods

mod types;
mod tmdb_client;
mod session;
mod notifications;
mod overlay;
mod app_model;

pub use types::{
    ActiveSection, MovieSummary, ResultPage, SessionSnapshot, SessionStatus, UiState,
};

pub use tmdb_client::{MovieSearch, SearchError, TmdbClient};

pub use session::{RequestKey, Settlement};

pub use notifications::{Notification, NotificationKind};

pub use app_model::AppModel;
