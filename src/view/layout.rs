//! Layout rendering (search bar, status line)

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

use crate::model::{ActiveSection, SessionSnapshot, SessionStatus, UiState};

pub fn render_search_bar(frame: &mut Frame, area: Rect, ui_state: &UiState) {
    let focused = ui_state.active_section == ActiveSection::Search;

    let (text, style) = if ui_state.input.is_empty() {
        ("Search movies...", Style::default().fg(Color::DarkGray))
    } else if focused {
        (ui_state.input.as_str(), Style::default().fg(Color::Green))
    } else {
        (ui_state.input.as_str(), Style::default().fg(Color::White))
    };

    let search = Paragraph::new(text).style(style).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Search ")
            .padding(Padding::horizontal(1))
            .border_style(if focused {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            }),
    );
    frame.render_widget(search, area);

    if focused {
        // border (1) + padding (1) + typed text
        let cursor_x = area.x + 2 + ui_state.input.chars().count() as u16;
        if cursor_x < area.x + area.width.saturating_sub(1) {
            frame.set_cursor_position((cursor_x, area.y + 1));
        }
    }
}

pub fn render_status_line(
    frame: &mut Frame,
    area: Rect,
    session: &SessionSnapshot,
    scroll_locked: bool,
) {
    let status_style = match session.status {
        SessionStatus::Idle => Style::default().fg(Color::DarkGray),
        SessionStatus::Loading => Style::default().fg(Color::Yellow),
        SessionStatus::Success => Style::default().fg(Color::Green),
        SessionStatus::Error => Style::default().fg(Color::Red),
    };

    let mut spans = vec![Span::styled(
        format!(" {} ", session.status.label()),
        status_style.add_modifier(Modifier::BOLD),
    )];

    if !session.query.is_empty() {
        spans.push(Span::raw(format!("│ \"{}\" ", session.query)));
        if session.total_pages > 0 {
            spans.push(Span::raw(format!("│ page {}/{} ", session.page, session.total_pages)));
        }
    }

    let hints = if scroll_locked {
        "│ Esc close"
    } else {
        "│ Enter open · ←/→ page · Tab focus · q quit"
    };
    spans.push(Span::styled(hints, Style::default().fg(Color::DarkGray)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
