//! Search result tree widget
//!
//! Displays the grouped search results: schema headers, kind headers and
//! leaves, indented by depth.

use crate::search::{ResultTree, Selection, TreeNode};
use crate::ui::Component;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};
use std::cell::Cell;

/// Rows moved by PageUp/PageDown
const PAGE_SIZE: usize = 20;

/// Result tree component
pub struct ResultsTree {
    tree: ResultTree,
    selected: usize,
    /// First visible row; adjusted during render to keep the selection in view
    scroll_offset: Cell<usize>,
}

impl ResultsTree {
    pub fn new() -> Self {
        Self {
            tree: ResultTree::default(),
            selected: 0,
            scroll_offset: Cell::new(0),
        }
    }

    /// Replace the tree; the previous content is discarded
    pub fn set_tree(&mut self, tree: ResultTree) {
        self.tree = tree;
        self.selected = 0;
        self.scroll_offset.set(0);
    }

    pub fn tree(&self) -> &ResultTree {
        &self.tree
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Payload of the highlighted row, when it names a relation
    pub fn selected_selection(&self) -> Option<&Selection> {
        self.tree.selection_at(self.selected)
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < self.tree.len() {
            self.selected += 1;
        }
    }

    pub fn page_up(&mut self) {
        self.selected = self.selected.saturating_sub(PAGE_SIZE);
    }

    pub fn page_down(&mut self) {
        self.selected = (self.selected + PAGE_SIZE).min(self.tree.len().saturating_sub(1));
    }

    pub fn go_to_top(&mut self) {
        self.selected = 0;
    }

    pub fn go_to_bottom(&mut self) {
        self.selected = self.tree.len().saturating_sub(1);
    }

    fn node_style(node: &TreeNode, theme: &Theme) -> Style {
        match node {
            TreeNode::SchemaHeader(_) => theme.tree_schema,
            TreeNode::KindHeader(_) => theme.tree_kind,
            TreeNode::Leaf {
                selection: Some(_), ..
            } => theme.tree_relation,
            TreeNode::Leaf { .. } => theme.tree_leaf,
            TreeNode::Placeholder(_) => theme.tree_placeholder,
        }
    }
}

impl Default for ResultsTree {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for ResultsTree {
    fn render(&self, frame: &mut Frame, area: Rect, focused: bool, theme: &Theme) {
        let title = if self.tree.is_empty() {
            " Résultats ".to_string()
        } else {
            format!(" Résultats ({}) ", self.tree.len())
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(theme.border_style(focused));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let visible_height = inner.height as usize;
        if visible_height == 0 {
            return;
        }

        let mut offset = self.scroll_offset.get();
        if self.selected < offset {
            offset = self.selected;
        } else if self.selected >= offset + visible_height {
            offset = self.selected + 1 - visible_height;
        }
        self.scroll_offset.set(offset);

        for (i, node) in self
            .tree
            .nodes()
            .iter()
            .enumerate()
            .skip(offset)
            .take(visible_height)
        {
            let y = inner.y + (i - offset) as u16;
            let text = format!("{}{}", "  ".repeat(node.depth()), node.label());
            let style = if focused && i == self.selected {
                theme.tree_selected
            } else {
                Self::node_style(node, theme)
            };
            frame.render_widget(
                Paragraph::new(text).style(style),
                Rect::new(inner.x, y, inner.width, 1),
            );
        }
    }
}
