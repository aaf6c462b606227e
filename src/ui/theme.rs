//! UI theme and styling
//!
//! Defines colors, styles, and visual appearance for all UI components.

use ratatui::style::{Color, Modifier, Style};

/// Application theme
#[derive(Debug, Clone)]
pub struct Theme {
    // Panel borders
    pub border_focused: Style,
    pub border_unfocused: Style,

    // Search input
    pub input_text: Style,
    pub input_cursor: Style,
    pub input_placeholder: Style,

    // Result tree
    pub tree_schema: Style,
    pub tree_kind: Style,
    pub tree_relation: Style,
    pub tree_leaf: Style,
    pub tree_placeholder: Style,
    pub tree_selected: Style,

    // Layers panel
    pub layer_spatial: Style,
    pub layer_plain: Style,
    pub layer_selected: Style,

    // Preview grid and metadata table
    pub grid_header: Style,
    pub grid_header_selected: Style,
    pub grid_row_even: Style,
    pub grid_row_odd: Style,
    pub grid_selected: Style,
    pub grid_null: Style,
    pub grid_footer: Style,

    // Modal dialogs
    pub dialog_border: Style,
    pub dialog_info: Style,
    pub dialog_warning: Style,
    pub dialog_error: Style,
    pub dialog_text: Style,
    pub dialog_hint: Style,

    // Help overlay
    pub help_section: Style,
    pub help_key: Style,
    pub help_desc: Style,

    // Status messages
    pub status_success: Style,
    pub status_error: Style,
    pub status_info: Style,
    pub status_warning: Style,
    pub status_idle: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            // Borders
            border_focused: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            border_unfocused: Style::default().fg(Color::DarkGray),

            // Search input
            input_text: Style::default().fg(Color::White),
            input_cursor: Style::default().bg(Color::White).fg(Color::Black),
            input_placeholder: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),

            // Result tree
            tree_schema: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            tree_kind: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::ITALIC),
            tree_relation: Style::default().fg(Color::Green),
            tree_leaf: Style::default().fg(Color::Gray),
            tree_placeholder: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
            tree_selected: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),

            // Layers panel
            layer_spatial: Style::default().fg(Color::Green),
            layer_plain: Style::default().fg(Color::Gray),
            layer_selected: Style::default().fg(Color::Black).bg(Color::Cyan),

            // Grid
            grid_header: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            grid_header_selected: Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            grid_row_even: Style::default().fg(Color::White),
            grid_row_odd: Style::default().fg(Color::Gray),
            grid_selected: Style::default().fg(Color::Black).bg(Color::Yellow),
            grid_null: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
            grid_footer: Style::default().fg(Color::DarkGray),

            // Dialogs
            dialog_border: Style::default().fg(Color::Cyan),
            dialog_info: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            dialog_warning: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            dialog_error: Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
            dialog_text: Style::default().fg(Color::White),
            dialog_hint: Style::default().fg(Color::DarkGray),

            // Help
            help_section: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            help_key: Style::default().fg(Color::Yellow),
            help_desc: Style::default().fg(Color::White),

            // Status messages
            status_success: Style::default().fg(Color::Green),
            status_error: Style::default().fg(Color::Red),
            status_info: Style::default().fg(Color::Blue),
            status_warning: Style::default().fg(Color::Yellow),
            status_idle: Style::default().fg(Color::DarkGray),
        }
    }
}

impl Theme {
    /// Get border style based on focus
    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            self.border_focused
        } else {
            self.border_unfocused
        }
    }
}
