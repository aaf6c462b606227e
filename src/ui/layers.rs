//! Loaded layers panel
//!
//! Lists the layers registered with the project this session.

use crate::layer::{MapHost, Project, VectorLayer};
use crate::ui::Component;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

pub struct LayersPanel {
    project: Project,
    selected: usize,
}

impl LayersPanel {
    pub fn new() -> Self {
        Self {
            project: Project::new(),
            selected: 0,
        }
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn selected_layer(&self) -> Option<&VectorLayer> {
        self.project.layers().get(self.selected)
    }

    /// Data-source string of the highlighted layer
    pub fn selected_uri(&self) -> Option<&str> {
        self.selected_layer().map(|l| l.uri.as_str())
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < self.project.len() {
            self.selected += 1;
        }
    }

    pub fn go_to_top(&mut self) {
        self.selected = 0;
    }

    pub fn go_to_bottom(&mut self) {
        self.selected = self.project.len().saturating_sub(1);
    }
}

impl Default for LayersPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl MapHost for LayersPanel {
    /// Register the layer and highlight it
    fn add_map_layer(&mut self, layer: VectorLayer) {
        self.project.add_map_layer(layer);
        self.selected = self.project.len() - 1;
    }
}

impl Component for LayersPanel {
    fn render(&self, frame: &mut Frame, area: Rect, focused: bool, theme: &Theme) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" Couches ({}) ", self.project.len()))
            .border_style(theme.border_style(focused));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.project.is_empty() {
            frame.render_widget(
                Paragraph::new("Aucune couche chargée").style(theme.tree_placeholder),
                inner,
            );
            return;
        }

        let height = inner.height as usize;
        let offset = (self.selected + 1).saturating_sub(height);
        for (i, layer) in self
            .project
            .layers()
            .iter()
            .enumerate()
            .skip(offset)
            .take(height)
        {
            let marker = if layer.is_spatial { "◆" } else { "◇" };
            let style = if focused && i == self.selected {
                theme.layer_selected
            } else if layer.is_spatial {
                theme.layer_spatial
            } else {
                theme.layer_plain
            };
            frame.render_widget(
                Paragraph::new(format!("{} {}", marker, layer.name)).style(style),
                Rect::new(inner.x, inner.y + (i - offset) as u16, inner.width, 1),
            );
        }
    }
}
