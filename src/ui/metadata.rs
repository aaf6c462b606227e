//! Relation metadata dialog
//!
//! Two-column Propriété / Valeur table shown as a centered modal.

use crate::ui::Component;
use crate::ui::layout::centered_rect;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Clear, Row, Table};
use unicode_width::UnicodeWidthChar;

pub struct MetadataDialog {
    title: String,
    rows: Vec<(String, String)>,
    visible: bool,
    scroll_offset: usize,
}

impl MetadataDialog {
    pub fn new() -> Self {
        Self {
            title: String::new(),
            rows: Vec::new(),
            visible: false,
            scroll_offset: 0,
        }
    }

    pub fn show(&mut self, title: String, rows: Vec<(String, String)>) {
        self.title = title;
        self.rows = rows;
        self.visible = true;
        self.scroll_offset = 0;
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.scroll_offset = 0;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn rows(&self) -> &[(String, String)] {
        &self.rows
    }

    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        if self.scroll_offset + 1 < self.rows.len() {
            self.scroll_offset += 1;
        }
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_offset = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = self.rows.len().saturating_sub(1);
    }

    #[cfg(test)]
    pub(crate) fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }
}

impl Default for MetadataDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for MetadataDialog {
    fn render(&self, frame: &mut Frame, area: Rect, focused: bool, theme: &Theme) {
        if !self.visible {
            return;
        }
        let popup = centered_rect(70, 50, area);
        frame.render_widget(Clear, popup);

        let key_width = self
            .rows
            .iter()
            .map(|(k, _)| k.chars().count())
            .max()
            .unwrap_or(0)
            .max("Propriété".len()) as u16
            + 2;

        // borders + column spacing
        let value_width = popup.width.saturating_sub(key_width + 3).max(10) as usize;

        let header = Row::new(vec![Cell::from("Propriété"), Cell::from("Valeur")])
            .style(theme.grid_header);
        let rows = self
            .rows
            .iter()
            .skip(self.scroll_offset)
            .enumerate()
            .map(|(i, (key, value))| {
                let style = if i % 2 == 0 {
                    theme.grid_row_even
                } else {
                    theme.grid_row_odd
                };
                let lines = wrap_value(value, value_width);
                let height = lines.len().max(1) as u16;
                let text = Text::from(lines.into_iter().map(Line::from).collect::<Vec<_>>());
                Row::new(vec![Cell::from(key.as_str()), Cell::from(text)])
                    .height(height)
                    .style(style)
            });

        let table = Table::new(rows, [Constraint::Length(key_width), Constraint::Min(10)])
            .header(header)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" {} ", self.title))
                    .title_bottom(Line::from(Span::styled(" Esc fermer ", theme.dialog_hint)))
                    .border_style(theme.border_style(focused)),
            );
        frame.render_widget(table, popup);
    }
}

/// Split `value` into lines no wider than `width` terminal columns,
/// keeping its own line breaks.
fn wrap_value(value: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    for source_line in value.lines() {
        let mut current = String::new();
        let mut current_width = 0;
        for ch in source_line.chars() {
            let w = ch.width().unwrap_or(0);
            if current_width + w > width && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            current.push(ch);
            current_width += w;
        }
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<(String, String)> {
        vec![
            ("Type de relation".to_string(), "Table".to_string()),
            ("Propriétaire".to_string(), "gis".to_string()),
        ]
    }

    #[test]
    fn test_show_and_hide() {
        let mut dialog = MetadataDialog::new();
        dialog.show("Métadonnées : public.roads".to_string(), rows());
        assert!(dialog.is_visible());
        assert_eq!(dialog.rows().len(), 2);
        dialog.scroll_down();
        dialog.hide();
        assert!(!dialog.is_visible());
        assert_eq!(dialog.scroll_offset, 0);
    }

    #[test]
    fn test_scroll_bounds() {
        let mut dialog = MetadataDialog::new();
        dialog.show("t".to_string(), rows());
        dialog.scroll_up();
        assert_eq!(dialog.scroll_offset, 0);
        dialog.scroll_down();
        dialog.scroll_down();
        assert_eq!(dialog.scroll_offset, 1);
        dialog.scroll_to_top();
        assert_eq!(dialog.scroll_offset, 0);
        dialog.scroll_to_bottom();
        assert_eq!(dialog.scroll_offset, 1);
    }

    #[test]
    fn test_long_comment_wraps_to_width() {
        let comment = "Voirie départementale, mise à jour annuelle";
        let lines = wrap_value(comment, 10);
        assert!(lines.iter().all(|l| l.chars().count() <= 10));
        assert_eq!(lines.concat(), comment);
        assert_eq!(lines[0], "Voirie dép");
    }

    #[test]
    fn test_multiline_comment_keeps_breaks() {
        assert_eq!(wrap_value("ligne 1\nligne 2", 40), vec!["ligne 1", "ligne 2"]);
        assert_eq!(wrap_value("", 40), vec![""]);
    }

    #[test]
    fn test_wrapped_comment_is_fully_rendered() {
        use ratatui::Terminal;
        use ratatui::backend::TestBackend;

        let tail = "fin-du-commentaire";
        let comment = format!("{} {}", "x".repeat(120), tail);
        let mut dialog = MetadataDialog::new();
        dialog.show(
            "Métadonnées : public.roads".to_string(),
            vec![("Commentaire".to_string(), comment)],
        );

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal
            .draw(|f| dialog.render(f, f.area(), true, &Theme::default()))
            .unwrap();
        let screen: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(screen.contains(tail));
    }
}
