//! Search input widget
//!
//! Single-line text field holding the name or name fragment to look for.

use crate::ui::theme::Theme;
use crate::ui::{Component, ComponentAction};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

const PLACEHOLDER: &str = "Nom ou partie du nom";

/// Search input component
pub struct SearchInput {
    input: String,
    /// Cursor position in characters
    cursor: usize,
}

impl SearchInput {
    pub fn new() -> Self {
        Self {
            input: String::new(),
            cursor: 0,
        }
    }

    pub fn text(&self) -> &str {
        &self.input
    }

    pub fn clear(&mut self) {
        self.input.clear();
        self.cursor = 0;
    }

    /// Insert character at cursor
    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_index();
        self.input.insert(at, c);
        self.cursor += 1;
    }

    /// Insert pasted text at cursor; line breaks become spaces
    pub fn insert_text(&mut self, text: &str) {
        for c in text.chars() {
            self.insert_char(if c == '\n' || c == '\r' { ' ' } else { c });
        }
    }

    /// Delete character before cursor
    pub fn delete_char(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index();
            self.input.remove(at);
        }
    }

    /// Delete character under cursor
    pub fn delete_forward(&mut self) {
        if self.cursor < self.char_count() {
            let at = self.byte_index();
            self.input.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    fn char_count(&self) -> usize {
        self.input.chars().count()
    }

    fn byte_index(&self) -> usize {
        self.input
            .char_indices()
            .nth(self.cursor)
            .map_or(self.input.len(), |(i, _)| i)
    }
}

impl Default for SearchInput {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for SearchInput {
    fn handle_key(&mut self, key: KeyEvent) -> ComponentAction {
        if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('u') {
                self.clear();
                return ComponentAction::Consumed;
            }
            return ComponentAction::Ignored;
        }
        match key.code {
            KeyCode::Char(c) => self.insert_char(c),
            KeyCode::Backspace => self.delete_char(),
            KeyCode::Delete => self.delete_forward(),
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.char_count(),
            _ => return ComponentAction::Ignored,
        }
        ComponentAction::Consumed
    }

    fn render(&self, frame: &mut Frame, area: Rect, focused: bool, theme: &Theme) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Rechercher ")
            .border_style(theme.border_style(focused));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let line = if self.input.is_empty() && !focused {
            Line::from(Span::styled(PLACEHOLDER, theme.input_placeholder))
        } else {
            let at = self.byte_index();
            let (before, rest) = self.input.split_at(at);
            let mut chars = rest.chars();
            let under = chars.next();
            let after = chars.as_str();
            let mut spans = vec![Span::styled(before.to_string(), theme.input_text)];
            if focused {
                let cursor_text = under.map_or_else(|| " ".to_string(), |c| c.to_string());
                spans.push(Span::styled(cursor_text, theme.input_cursor));
                spans.push(Span::styled(after.to_string(), theme.input_text));
            } else {
                spans.push(Span::styled(rest.to_string(), theme.input_text));
            }
            Line::from(spans)
        };
        frame.render_widget(Paragraph::new(line), inner);
    }
}
