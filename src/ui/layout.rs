//! Panel layout management
//!
//! Handles the arrangement of panels and terminal screen layout.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Areas of the main screen
pub struct AppLayout {
    pub search: Rect,
    pub results: Rect,
    pub layers: Rect,
    pub status_bar: Rect,
}

/// Calculate panel layout for the main screen
///
/// Search input on top, result tree and layers side by side below it,
/// one-line status bar at the bottom.
pub fn calculate_layout(area: Rect) -> AppLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(rows[1]);

    AppLayout {
        search: rows[0],
        results: body[0],
        layers: body[1],
        status_bar: rows[2],
    }
}

/// Rectangle of `percent_x` by `percent_y` of `area`, centered in it
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

/// Centered rectangle of a fixed size, clamped to `area`
pub fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
