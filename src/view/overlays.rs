//! Overlay rendering (movie detail modal, toast notifications)

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap},
    Frame,
};

use crate::model::{MovieSummary, Notification, NotificationKind};
use super::utils::{centered_rect, format_rating, format_release_date, image_url};

const TOAST_WIDTH: u16 = 44;

/// Area of the modal panel; everything else on screen is backdrop
pub fn modal_area(area: Rect) -> Rect {
    centered_rect(area, 70, 70, 40, 12)
}

pub fn render_movie_modal(frame: &mut Frame, movie: &MovieSummary, image_base_url: &str) {
    let popup_area = modal_area(frame.area());

    // Clear the area behind the popup first
    frame.render_widget(Clear, popup_area);

    let label = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let mut lines = vec![
        Line::from(Span::styled(
            movie.title.clone(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    if movie.overview.is_empty() {
        lines.push(Line::from(Span::styled(
            "No overview available.",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        lines.push(Line::from(movie.overview.clone()));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Release Date: ", label),
        Span::raw(format_release_date(&movie.release_date)),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Rating: ", label),
        Span::styled(format_rating(movie.vote_average), Style::default().fg(Color::Yellow)),
    ]));

    if let Some(url) = image_url(image_base_url, "original", movie.backdrop_path.as_deref()) {
        lines.push(Line::from(vec![Span::styled("Backdrop: ", label), Span::raw(url)]));
    }
    if let Some(url) = image_url(image_base_url, "w500", movie.poster_path.as_deref()) {
        lines.push(Line::from(vec![Span::styled("Poster: ", label), Span::raw(url)]));
    }

    let modal = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Movie (Esc or click outside to close) ")
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .padding(Padding::uniform(1))
                .style(Style::default().bg(Color::Black)),
        );

    frame.render_widget(modal, popup_area);
}

/// Stack of toasts in the top-right corner, oldest on top
pub fn render_toasts(frame: &mut Frame, toasts: &[Notification]) {
    let area = frame.area();
    let width = TOAST_WIDTH.min(area.width);
    let mut y = area.y;

    for toast in toasts {
        let inner_width = width.saturating_sub(2).max(1) as usize;
        let text_lines = toast.message.chars().count().div_ceil(inner_width).max(1) as u16;
        let height = text_lines + 2;
        if y + height > area.y + area.height {
            break;
        }

        let toast_area = Rect {
            x: area.x + area.width - width,
            y,
            width,
            height,
        };

        let color = match toast.kind {
            NotificationKind::NoResults => Color::Yellow,
            NotificationKind::RequestFailed => Color::Red,
        };

        frame.render_widget(Clear, toast_area);
        let widget = Paragraph::new(toast.message.as_str())
            .style(Style::default().fg(color))
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color))
                    .style(Style::default().bg(Color::Black)),
            );
        frame.render_widget(widget, toast_area);

        y += height;
    }
}
