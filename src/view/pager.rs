//! Pager rendering

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::model::SessionSnapshot;

/// Pages shown on each side of the active page before collapsing into `…`
const PAGE_WINDOW: u32 = 2;

/// Page labels to draw, `None` marking a gap
pub fn page_labels(current: u32, total: u32) -> Vec<Option<u32>> {
    let mut labels = Vec::new();
    let mut last_shown = 0;
    for page in 1..=total {
        let near_current = page.abs_diff(current) <= PAGE_WINDOW;
        if page == 1 || page == total || near_current {
            if page > last_shown + 1 {
                labels.push(None);
            }
            labels.push(Some(page));
            last_shown = page;
        }
    }
    labels
}

pub fn render_pager(frame: &mut Frame, area: Rect, session: &SessionSnapshot) {
    let mut spans = vec![Span::styled("‹ ", Style::default().fg(Color::DarkGray))];

    for label in page_labels(session.page, session.total_pages) {
        match label {
            Some(page) if page == session.page => spans.push(Span::styled(
                format!(" {} ", page),
                Style::default().fg(Color::Black).bg(Color::Green).add_modifier(Modifier::BOLD),
            )),
            Some(page) => spans.push(Span::styled(
                format!(" {} ", page),
                Style::default().fg(Color::White),
            )),
            None => spans.push(Span::styled(" … ", Style::default().fg(Color::DarkGray))),
        }
    }
    spans.push(Span::styled(" ›", Style::default().fg(Color::DarkGray)));

    let pager = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(" Pages "));
    frame.render_widget(pager, area);
}
