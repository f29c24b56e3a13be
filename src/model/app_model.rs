//! Main application model with state management

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use super::notifications::{
    Notification, NotificationCenter, NotificationKind, NO_RESULTS_MESSAGE, REQUEST_FAILED_MESSAGE,
};
use super::overlay::{OverlayGuard, OverlaySlot};
use super::session::{Notice, RequestKey, SearchSession, Settlement};
use super::tmdb_client::SearchError;
use super::types::{ActiveSection, ResultPage, SessionSnapshot, UiState};

/// Main application model containing all state
pub struct AppModel {
    session: Arc<Mutex<SearchSession>>,
    pub ui_state: Arc<Mutex<UiState>>,
    notifications: Arc<Mutex<NotificationCenter>>,
    overlay: OverlaySlot,
    modal_guard: Arc<Mutex<Option<OverlayGuard>>>,
    pub should_quit: Arc<Mutex<bool>>,
}

impl AppModel {
    pub fn new(toast_ttl: Duration) -> Self {
        Self {
            session: Arc::new(Mutex::new(SearchSession::new())),
            ui_state: Arc::new(Mutex::new(UiState::default())),
            notifications: Arc::new(Mutex::new(NotificationCenter::new(toast_ttl))),
            overlay: OverlaySlot::new(),
            modal_guard: Arc::new(Mutex::new(None)),
            should_quit: Arc::new(Mutex::new(false)),
        }
    }

    // ========================================================================
    // Search session
    // ========================================================================

    pub async fn get_session_snapshot(&self) -> SessionSnapshot {
        self.session.lock().await.snapshot()
    }

    pub async fn submit_query(&self, raw: &str) -> Option<RequestKey> {
        let mut session = self.session.lock().await;
        let key = session.submit_query(raw)?;
        self.ui_state.lock().await.grid_selected = 0;
        self.sync_overlay(&session).await;
        Some(key)
    }

    pub async fn change_page(&self, page: u32) -> Option<RequestKey> {
        let mut session = self.session.lock().await;
        let key = session.change_page(page)?;
        self.ui_state.lock().await.grid_selected = 0;
        Some(key)
    }

    /// Page change relative to the current page (`+1` / `-1` from the pager)
    pub async fn step_page(&self, forward: bool) -> Option<RequestKey> {
        let mut session = self.session.lock().await;
        let current = session.page();
        let target = if forward { current.checked_add(1)? } else { current.checked_sub(1)? };
        let key = session.change_page(target)?;
        self.ui_state.lock().await.grid_selected = 0;
        Some(key)
    }

    pub async fn settle(
        &self,
        key: &RequestKey,
        result: Result<ResultPage, SearchError>,
    ) -> Settlement {
        let mut session = self.session.lock().await;
        let settlement = session.settle(key, result);

        if let Settlement::Applied(Some(ref notice)) = settlement {
            let mut notifications = self.notifications.lock().await;
            match notice {
                Notice::NoResults { query } => {
                    notifications.push(
                        NotificationKind::NoResults,
                        format!("no-results:{}", query),
                        NO_RESULTS_MESSAGE,
                    );
                }
                Notice::RequestFailed { kind } => {
                    tracing::debug!(query = %session.query(), kind = ?kind, "Request failed toast");
                    notifications.push(
                        NotificationKind::RequestFailed,
                        "request-failed",
                        REQUEST_FAILED_MESSAGE,
                    );
                }
            }
        }
        settlement
    }

    // ========================================================================
    // Movie modal
    // ========================================================================

    /// Open the modal for the highlighted grid row
    pub async fn select_highlighted_movie(&self) -> bool {
        let mut session = self.session.lock().await;
        let index = self.ui_state.lock().await.grid_selected;
        let selected = session.select_movie(index).is_some();
        self.sync_overlay(&session).await;
        selected
    }

    pub async fn close_modal(&self) {
        let mut session = self.session.lock().await;
        session.close_modal();
        self.sync_overlay(&session).await;
    }

    pub async fn is_modal_open(&self) -> bool {
        self.session.lock().await.selected().is_some()
    }

    /// Hold the overlay exactly while the session has a selection.
    async fn sync_overlay(&self, session: &SearchSession) {
        let mut guard = self.modal_guard.lock().await;
        match (session.selected().is_some(), guard.is_some()) {
            (true, false) => {
                *guard = self.overlay.acquire();
                if guard.is_none() {
                    tracing::warn!("Overlay already held by another modal");
                }
            }
            (false, true) => {
                *guard = None;
            }
            _ => {}
        }
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.overlay.is_held()
    }

    // ========================================================================
    // UI state
    // ========================================================================

    pub async fn get_ui_state(&self) -> UiState {
        self.ui_state.lock().await.clone()
    }

    pub async fn set_active_section(&self, section: ActiveSection) {
        self.ui_state.lock().await.active_section = section;
    }

    pub async fn cycle_section(&self) {
        let mut state = self.ui_state.lock().await;
        state.active_section = state.active_section.next();
    }

    pub async fn append_to_input(&self, c: char) {
        self.ui_state.lock().await.input.push(c);
    }

    pub async fn backspace_input(&self) {
        self.ui_state.lock().await.input.pop();
    }

    pub async fn clear_input(&self) {
        self.ui_state.lock().await.input.clear();
    }

    pub async fn set_viewport(&self, width: u16, height: u16) {
        self.ui_state.lock().await.viewport = (width, height);
    }

    pub async fn grid_move_up(&self) {
        if self.is_scroll_locked() {
            return;
        }
        let mut state = self.ui_state.lock().await;
        state.grid_selected = state.grid_selected.saturating_sub(1);
    }

    pub async fn grid_move_down(&self) {
        if self.is_scroll_locked() {
            return;
        }
        let len = self.session.lock().await.items().len();
        let mut state = self.ui_state.lock().await;
        if state.grid_selected < len.saturating_sub(1) {
            state.grid_selected += 1;
        }
    }

    // ========================================================================
    // Notifications
    // ========================================================================

    pub async fn get_notifications(&self) -> Vec<Notification> {
        self.notifications.lock().await.active().to_vec()
    }

    pub async fn prune_notifications(&self) {
        self.notifications.lock().await.prune(Instant::now());
    }

    pub async fn should_quit(&self) -> bool {
        *self.should_quit.lock().await
    }

    pub async fn set_should_quit(&self, quit: bool) {
        *self.should_quit.lock().await = quit;
    }
}

impl Default for AppModel {
    fn default() -> Self {
        Self::new(Duration::from_secs(4))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::types::{MovieSummary, SessionStatus};

    fn movie(id: u64) -> MovieSummary {
        MovieSummary {
            id,
            title: format!("Movie {id}"),
            overview: String::new(),
            poster_path: None,
            backdrop_path: None,
            release_date: String::new(),
            vote_average: 5.0,
        }
    }

    fn page(ids: &[u64], total_pages: u32) -> ResultPage {
        ResultPage {
            items: ids.iter().copied().map(movie).collect(),
            total_pages,
        }
    }

    #[tokio::test]
    async fn modal_holds_overlay_and_locks_scroll() {
        let model = AppModel::default();
        let key = model.submit_query("Matrix").await.unwrap();
        model.settle(&key, Ok(page(&[1, 2, 3], 1))).await;

        model.grid_move_down().await;
        assert!(model.select_highlighted_movie().await);
        assert!(model.is_scroll_locked());

        model.grid_move_down().await;
        assert_eq!(model.get_ui_state().await.grid_selected, 1);

        model.close_modal().await;
        assert!(!model.is_scroll_locked());
        model.grid_move_down().await;
        assert_eq!(model.get_ui_state().await.grid_selected, 2);
    }

    #[tokio::test]
    async fn query_change_closes_modal_and_releases_overlay() {
        let model = AppModel::default();
        let key = model.submit_query("Matrix").await.unwrap();
        model.settle(&key, Ok(page(&[1], 1))).await;
        model.select_highlighted_movie().await;
        assert!(model.is_modal_open().await);

        model.submit_query("Alien").await.unwrap();
        assert!(!model.is_modal_open().await);
        assert!(!model.is_scroll_locked());
    }

    #[tokio::test]
    async fn empty_result_shows_single_toast() {
        let model = AppModel::default();
        let key = model.submit_query("zzzzqqqq").await.unwrap();
        model.settle(&key, Ok(ResultPage::empty())).await;
        model.settle(&key, Ok(ResultPage::empty())).await;

        let toasts = model.get_notifications().await;
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].kind, NotificationKind::NoResults);
        assert_eq!(toasts[0].message, NO_RESULTS_MESSAGE);

        let snapshot = model.get_session_snapshot().await;
        assert_eq!(snapshot.status, SessionStatus::Success);
        assert!(!snapshot.shows_pager());
    }

    #[tokio::test]
    async fn failure_shows_retry_toast() {
        let model = AppModel::default();
        let key = model.submit_query("Matrix").await.unwrap();
        model
            .settle(&key, Err(SearchError::Network("connection reset".into())))
            .await;

        let toasts = model.get_notifications().await;
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].message, REQUEST_FAILED_MESSAGE);
        assert_eq!(model.get_session_snapshot().await.status, SessionStatus::Error);
    }

    #[tokio::test]
    async fn step_page_stays_in_range() {
        let model = AppModel::default();
        let key = model.submit_query("Matrix").await.unwrap();
        model.settle(&key, Ok(page(&[1], 2))).await;

        assert!(model.step_page(false).await.is_none());
        let key = model.step_page(true).await.expect("page 2");
        assert_eq!(key.page, 2);
        model.settle(&key, Ok(page(&[2], 2))).await;
        assert!(model.step_page(true).await.is_none());
    }
}
