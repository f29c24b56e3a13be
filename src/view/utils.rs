//! Utility functions for rendering UI components

use chrono::NaiveDate;
use ratatui::layout::Rect;

pub fn truncate_string(s: &str, max_width: usize) -> String {
    if s.chars().count() > max_width {
        let truncated: String = s.chars().take(max_width.saturating_sub(3)).collect();
        format!("{:<width$}", format!("{}...", truncated), width = max_width)
    } else {
        format!("{:<width$}", s, width = max_width)
    }
}

/// TMDB ratings are shown with one decimal, e.g. `8.2/10`
pub fn format_rating(vote_average: f64) -> String {
    format!("{:.1}/10", vote_average)
}

/// `1999-03-31` -> `Mar 31, 1999`; anything unparsable is shown as-is
pub fn format_release_date(raw: &str) -> String {
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => date.format("%b %d, %Y").to_string(),
        Err(_) if raw.is_empty() => "Unknown".to_string(),
        Err(_) => raw.to_string(),
    }
}

pub fn release_year(raw: &str) -> String {
    let year: String = raw.chars().take(4).collect();
    if year.len() == 4 { year } else { "----".to_string() }
}

pub fn image_url(base: &str, size: &str, path: Option<&str>) -> Option<String> {
    path.filter(|p| !p.is_empty())
        .map(|p| format!("{}/{}{}", base, size, p))
}

/// Centered rect of the given percentage size, clamped to minimum dimensions
pub fn centered_rect(
    area: Rect,
    percent_x: u16,
    percent_y: u16,
    min_width: u16,
    min_height: u16,
) -> Rect {
    let scaled = |len: u16, percent: u16| (u32::from(len) * u32::from(percent) / 100) as u16;
    let width = scaled(area.width, percent_x).max(min_width).min(area.width);
    let height = scaled(area.height, percent_y).max(min_height).min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
