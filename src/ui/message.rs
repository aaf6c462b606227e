//! Modal message dialog
//!
//! Information, warning and error boxes. Dismissed with Enter or Esc.

use crate::ui::Component;
use crate::ui::layout::centered_fixed;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Warning,
    Error,
}

impl MessageLevel {
    fn icon(self) -> &'static str {
        match self {
            MessageLevel::Info => "ℹ",
            MessageLevel::Warning => "⚠",
            MessageLevel::Error => "✖",
        }
    }
}

struct Message {
    level: MessageLevel,
    title: String,
    body: String,
}

pub struct MessageDialog {
    current: Option<Message>,
}

impl MessageDialog {
    pub fn new() -> Self {
        Self { current: None }
    }

    pub fn show(&mut self, level: MessageLevel, title: String, body: String) {
        match level {
            MessageLevel::Error => tracing::debug!(%title, %body, "error dialog"),
            _ => tracing::trace!(%title, "message dialog"),
        }
        self.current = Some(Message { level, title, body });
    }

    pub fn hide(&mut self) {
        self.current = None;
    }

    pub fn is_visible(&self) -> bool {
        self.current.is_some()
    }

    pub fn level(&self) -> Option<MessageLevel> {
        self.current.as_ref().map(|m| m.level)
    }

    pub fn title(&self) -> &str {
        self.current.as_ref().map_or("", |m| m.title.as_str())
    }

    pub fn body(&self) -> &str {
        self.current.as_ref().map_or("", |m| m.body.as_str())
    }
}

impl Default for MessageDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for MessageDialog {
    /// `area` is the whole screen; the dialog sizes itself to its text
    fn render(&self, frame: &mut Frame, area: Rect, _focused: bool, theme: &Theme) {
        let Some(ref msg) = self.current else {
            return;
        };

        let title_style = match msg.level {
            MessageLevel::Info => theme.dialog_info,
            MessageLevel::Warning => theme.dialog_warning,
            MessageLevel::Error => theme.dialog_error,
        };

        let longest = msg
            .body
            .lines()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0)
            .max(msg.title.chars().count() + 4);
        let width = (longest as u16 + 4).clamp(30, area.width.saturating_sub(4).max(30));
        let body_lines = msg.body.lines().count().max(1) as u16;
        let height = body_lines + 5;
        let popup = centered_fixed(width, height, area);

        frame.render_widget(Clear, popup);
        let block = Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(
                format!(" {} {} ", msg.level.icon(), msg.title),
                title_style,
            ))
            .border_style(theme.dialog_border);
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let mut lines: Vec<Line> = msg
            .body
            .lines()
            .map(|l| Line::from(Span::styled(l.to_string(), theme.dialog_text)))
            .collect();
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("[Entrée] OK", theme.dialog_hint)));
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    }
}
