//! Top-level render function
//!
//! Orchestrates rendering of all panels using the layout module.

use crate::app::{App, PanelFocus, StatusLevel};
use crate::ui::Component;
use crate::ui::layout::calculate_layout;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Render the entire application
pub fn render(frame: &mut Frame, app: &App) {
    let theme = &app.theme;
    let layout = calculate_layout(frame.area());

    app.search_input.render(
        frame,
        layout.search,
        app.focus == PanelFocus::SearchInput,
        theme,
    );
    app.results
        .render(frame, layout.results, app.focus == PanelFocus::Results, theme);
    app.layers
        .render(frame, layout.layers, app.focus == PanelFocus::Layers, theme);

    render_status_bar(frame, layout.status_bar, app, theme);

    // Modals draw over everything else; each is a no-op when hidden
    let area = frame.area();
    app.metadata
        .render(frame, area, app.focus == PanelFocus::Metadata, theme);
    app.preview
        .render(frame, area, app.focus == PanelFocus::Preview, theme);
    app.help
        .render(frame, area, app.focus == PanelFocus::Help, theme);
    app.message
        .render(frame, area, app.focus == PanelFocus::Message, theme);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let conn_info = match app.connection_name {
        Some(ref name) => format!("[{}]", name),
        None => "[déconnecté]".to_string(),
    };

    let (text, style) = match app.status_message {
        Some(ref status) => {
            let style = match status.level {
                StatusLevel::Info => theme.status_info,
                StatusLevel::Success => theme.status_success,
                StatusLevel::Warning => theme.status_warning,
                StatusLevel::Error => theme.status_error,
            };
            (format!("{} {}", conn_info, status.message), style)
        }
        None => (
            format!("{} | F1 aide, Ctrl+Q quitter", conn_info),
            theme.status_idle,
        ),
    };
    frame.render_widget(Paragraph::new(text).style(style), area);
}
