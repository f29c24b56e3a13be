//! Main content area: results grid, loader, error banner

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph, Wrap},
    Frame,
};

use crate::model::{ActiveSection, MovieSummary, SessionSnapshot, SessionStatus, UiState};
use super::utils::{format_rating, release_year, truncate_string};

const IDLE_HINT: &str = "Type a title and press Enter to search\n\n\
    Tab switches between search and results\n\
    ↑/↓ select · Enter shows details";

pub fn render_main_content(
    frame: &mut Frame,
    area: Rect,
    session: &SessionSnapshot,
    ui_state: &UiState,
) {
    let is_focused = ui_state.active_section == ActiveSection::Results;
    let border_style = if is_focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };

    match session.status {
        SessionStatus::Loading => {
            let loading = Paragraph::new("Loading movies, please wait...")
                .style(Style::default().fg(Color::Yellow))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(" Results ")
                        .padding(Padding::horizontal(1))
                        .border_style(border_style),
                );
            frame.render_widget(loading, area);
        }
        SessionStatus::Error => {
            let banner = Paragraph::new("There was an error, please try again...")
                .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
                .wrap(Wrap { trim: false })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(" Error ")
                        .padding(Padding::horizontal(1))
                        .border_style(Style::default().fg(Color::Red)),
                );
            frame.render_widget(banner, area);
        }
        SessionStatus::Success if !session.items.is_empty() => {
            render_movie_grid(frame, area, &session.items, ui_state.grid_selected, is_focused);
        }
        // Idle, or a successful search with nothing in it: no grid
        _ => {
            let hint = Paragraph::new(IDLE_HINT)
                .style(Style::default().fg(Color::DarkGray))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .padding(Padding::horizontal(1))
                        .border_style(border_style),
                );
            frame.render_widget(hint, area);
        }
    }
}

fn render_movie_grid(
    frame: &mut Frame,
    area: Rect,
    movies: &[MovieSummary],
    selected_index: usize,
    is_focused: bool,
) {
    // borders (2) + padding (2) + " 1999 " (6) + " 8.2/10" (8) + index column
    let num_width = movies.len().to_string().len() + 1;
    let title_width = (area.width as usize).saturating_sub(2 + 2 + 6 + 8 + num_width + 1);

    let items: Vec<ListItem> = movies
        .iter()
        .enumerate()
        .map(|(i, movie)| {
            let is_selected = i == selected_index;
            let style = if is_selected && is_focused {
                Style::default().fg(Color::Black).bg(Color::Green).add_modifier(Modifier::BOLD)
            } else if is_selected {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            let line = Line::from(vec![
                Span::styled(
                    format!("{:>width$} ", i + 1, width = num_width),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(truncate_string(&movie.title, title_width)),
                Span::styled(
                    format!(" {} ", release_year(&movie.release_date)),
                    Style::default().fg(Color::Cyan),
                ),
                Span::styled(
                    format!("{:>7}", format_rating(movie.vote_average)),
                    Style::default().fg(Color::Yellow),
                ),
            ]);
            ListItem::new(line).style(style)
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Results ({}) ", movies.len()))
                .padding(Padding::horizontal(1))
                .border_style(if is_focused {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default()
                }),
        )
        .highlight_style(Style::default()); // Highlight handled by item styles

    let mut list_state = ListState::default();
    list_state.select(Some(selected_index));

    frame.render_stateful_widget(list, area, &mut list_state);
}
