//! Key and mouse event handling

use anyhow::Result;
use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::{Position, Rect};

use crate::model::ActiveSection;
use crate::view::modal_area;
use super::AppController;

impl AppController {
    pub async fn handle_key_event(&self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        let model = self.model.lock().await;

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            model.set_should_quit(true).await;
            return Ok(());
        }

        // The modal captures the keyboard while it is open
        if model.is_modal_open().await {
            if key.code == KeyCode::Esc {
                model.close_modal().await;
            }
            return Ok(());
        }

        let ui_state = model.get_ui_state().await;

        if ui_state.active_section == ActiveSection::Search {
            match key.code {
                KeyCode::Tab | KeyCode::BackTab | KeyCode::Down => {
                    model.set_active_section(ActiveSection::Results).await;
                }
                KeyCode::Enter => {
                    let query = ui_state.input.clone();
                    drop(model);
                    self.submit_search(&query).await;
                }
                KeyCode::Esc => {
                    model.clear_input().await;
                }
                KeyCode::Backspace => {
                    model.backspace_input().await;
                }
                KeyCode::Char(c) => {
                    model.append_to_input(c).await;
                }
                KeyCode::PageDown => {
                    drop(model);
                    self.step_page(true).await;
                }
                KeyCode::PageUp => {
                    drop(model);
                    self.step_page(false).await;
                }
                _ => {}
            }
            return Ok(());
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                model.set_should_quit(true).await;
            }
            KeyCode::Tab | KeyCode::BackTab => {
                model.cycle_section().await;
            }
            KeyCode::Esc | KeyCode::Char('/') | KeyCode::Char('g') | KeyCode::Char('G') => {
                model.set_active_section(ActiveSection::Search).await;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                model.grid_move_up().await;
            }
            KeyCode::Down | KeyCode::Char('j') => {
                model.grid_move_down().await;
            }
            KeyCode::Enter => {
                if !model.select_highlighted_movie().await {
                    tracing::debug!("Nothing to open at the highlighted row");
                }
            }
            KeyCode::Right | KeyCode::Char(']') | KeyCode::PageDown => {
                drop(model);
                self.step_page(true).await;
            }
            KeyCode::Left | KeyCode::Char('[') | KeyCode::PageUp => {
                drop(model);
                self.step_page(false).await;
            }
            KeyCode::Home => {
                drop(model);
                self.change_page(1).await;
            }
            KeyCode::End => {
                let last = model.get_session_snapshot().await.total_pages;
                drop(model);
                self.change_page(last).await;
            }
            KeyCode::Char(c) if c.is_ascii_digit() && c != '0' => {
                drop(model);
                self.change_page(c.to_digit(10).unwrap_or(1)).await;
            }
            _ => {}
        }
        Ok(())
    }

    pub async fn handle_mouse_event(&self, mouse: MouseEvent) {
        let model = self.model.lock().await;

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if !model.is_modal_open().await {
                    return;
                }
                let (width, height) = model.get_ui_state().await.viewport;
                let panel = modal_area(Rect::new(0, 0, width, height));
                // Only the backdrop closes; clicks on the panel itself are ignored
                if !panel.contains(Position::new(mouse.column, mouse.row)) {
                    model.close_modal().await;
                }
            }
            MouseEventKind::ScrollDown => model.grid_move_down().await,
            MouseEventKind::ScrollUp => model.grid_move_up().await,
            _ => {}
        }
    }
}
