//! Help overlay: keybinding reference modal
//!
//! Displays all keybindings organized by panel context as a centered popup.

use crate::ui::Component;
use crate::ui::layout::centered_rect;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

/// Help overlay showing keybinding reference
pub struct HelpOverlay {
    visible: bool,
    scroll_offset: usize,
}

/// Total number of content lines in the help text
const HELP_LINE_COUNT: usize = 33;

impl HelpOverlay {
    pub fn new() -> Self {
        Self {
            visible: false,
            scroll_offset: 0,
        }
    }

    pub fn show(&mut self) {
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

    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        if self.scroll_offset + 1 < HELP_LINE_COUNT {
            self.scroll_offset += 1;
        }
    }

    pub fn page_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(10);
    }

    pub fn page_down(&mut self) {
        self.scroll_offset = (self.scroll_offset + 10).min(HELP_LINE_COUNT - 1);
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_offset = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = HELP_LINE_COUNT - 1;
    }

    fn build_lines<'a>(&self, theme: &Theme) -> Vec<Line<'a>> {
        let section = theme.help_section;
        let key = theme.help_key;
        let desc = theme.help_desc;
        let blank = Line::from("");

        vec![
            Line::from(Span::styled("Global", section)),
            help_line("  Ctrl+Q", "Quitter", key, desc),
            help_line("  Tab / Shift+Tab", "Changer de panneau", key, desc),
            help_line("  F1", "Aide", key, desc),
            help_line("  F3", "Métadonnées de la sélection", key, desc),
            help_line("  F4", "Aperçu des données", key, desc),
            blank.clone(),
            Line::from(Span::styled("Recherche", section)),
            help_line("  Entrée", "Lancer la recherche", key, desc),
            help_line("  Ctrl+U", "Effacer le champ", key, desc),
            help_line("  \u{2193}", "Aller aux résultats", key, desc),
            blank.clone(),
            Line::from(Span::styled("Résultats", section)),
            help_line("  j/k  \u{2191}/\u{2193}", "Naviguer", key, desc),
            help_line("  Entrée", "Charger la couche", key, desc),
            help_line("  m", "Métadonnées", key, desc),
            help_line("  p", "Aperçu des données", key, desc),
            help_line("  /", "Retour à la recherche", key, desc),
            help_line("  g / G", "Début / Fin", key, desc),
            help_line("  PgUp / PgDn", "Page précédente / suivante", key, desc),
            blank.clone(),
            Line::from(Span::styled("Couches", section)),
            help_line("  j/k  \u{2191}/\u{2193}", "Naviguer", key, desc),
            help_line("  y", "Copier la source", key, desc),
            blank.clone(),
            Line::from(Span::styled("Aperçu", section)),
            help_line("  h/l  \u{2190}/\u{2192}", "Colonnes", key, desc),
            help_line("  j/k  \u{2191}/\u{2193}", "Lignes", key, desc),
            help_line("  y", "Copier la cellule", key, desc),
            help_line("  Esc / q", "Fermer", key, desc),
            blank.clone(),
            Line::from(Span::styled("Messages", section)),
            help_line("  Entrée / Esc", "Fermer", key, desc),
        ]
    }
}

impl Default for HelpOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for HelpOverlay {
    fn render(&self, frame: &mut Frame, area: Rect, focused: bool, theme: &Theme) {
        if !self.visible {
            return;
        }
        let popup = centered_rect(60, 70, area);
        frame.render_widget(Clear, popup);
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Aide ")
            .border_style(theme.border_style(focused));
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let lines: Vec<Line> = self
            .build_lines(theme)
            .into_iter()
            .skip(self.scroll_offset)
            .take(inner.height as usize)
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

/// Build a single help line: "  key           description"
fn help_line<'a>(
    key_text: &'a str,
    desc_text: &'a str,
    key_style: Style,
    desc_style: Style,
) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{:<20}", key_text), key_style),
        Span::styled(desc_text, desc_style),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_default_not_visible() {
        let help = HelpOverlay::new();
        assert!(!help.is_visible());
        assert_eq!(help.scroll_offset, 0);
    }

    #[test]
    fn test_help_hide_resets_scroll() {
        let mut help = HelpOverlay::new();
        help.show();
        help.scroll_down();
        assert_eq!(help.scroll_offset, 1);
        help.hide();
        assert!(!help.is_visible());
        assert_eq!(help.scroll_offset, 0);
    }

    #[test]
    fn test_help_scroll_boundaries() {
        let mut help = HelpOverlay::new();
        help.show();
        help.scroll_up();
        assert_eq!(help.scroll_offset, 0);
        help.scroll_to_bottom();
        help.scroll_down();
        assert_eq!(help.scroll_offset, HELP_LINE_COUNT - 1);
        help.scroll_to_top();
        help.page_down();
        assert_eq!(help.scroll_offset, 10);
        help.page_up();
        help.page_up();
        assert_eq!(help.scroll_offset, 0);
    }

    #[test]
    fn test_help_line_count_matches_content() {
        let help = HelpOverlay::new();
        let lines = help.build_lines(&Theme::default());
        assert_eq!(lines.len(), HELP_LINE_COUNT);
    }
}
