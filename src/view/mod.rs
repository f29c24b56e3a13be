//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! It is organized into submodules by component type:
//!
//! - `utils`: Shared formatting helpers
//! - `layout`: Search bar and status line
//! - `content`: Results grid, loader, error banner
//! - `pager`: Page selector
//! - `overlays`: Movie modal and toasts

mod utils;
mod layout;
mod content;
mod pager;
mod overlays;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::model::{Notification, SessionSnapshot, UiState};

pub use overlays::modal_area;

pub struct AppView {
    image_base_url: String,
}

impl AppView {
    pub fn new(image_base_url: impl Into<String>) -> Self {
        Self {
            image_base_url: image_base_url.into(),
        }
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        session: &SessionSnapshot,
        ui_state: &UiState,
        toasts: &[Notification],
        scroll_locked: bool,
    ) {
        let pager_height = if session.shows_pager() { 3 } else { 0 };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),            // Search bar
                Constraint::Min(0),               // Results grid
                Constraint::Length(pager_height), // Pager
                Constraint::Length(1),            // Status line
            ])
            .split(frame.area());

        layout::render_search_bar(frame, chunks[0], ui_state);
        content::render_main_content(frame, chunks[1], session, ui_state);

        if session.shows_pager() {
            pager::render_pager(frame, chunks[2], session);
        }

        layout::render_status_line(frame, chunks[3], session, scroll_locked);

        if let Some(movie) = &session.selected {
            overlays::render_movie_modal(frame, movie, &self.image_base_url);
        }

        if !toasts.is_empty() {
            overlays::render_toasts(frame, toasts);
        }
    }
}
