//! Data preview grid
//!
//! Shows the first rows of a relation in a scrollable table with
//! cell-level selection, as a modal over the main screen.

use crate::db::types::QueryResults;
use crate::ui::Component;
use crate::ui::layout::centered_rect;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use unicode_truncate::UnicodeTruncateStr;
use unicode_width::UnicodeWidthStr;

const PAGE_SIZE: usize = 20;

/// Preview grid modal
pub struct PreviewGrid {
    title: String,
    results: Option<QueryResults>,
    selected_row: usize,
    selected_col: usize,
    /// Computed column widths
    col_widths: Vec<u16>,
}

impl PreviewGrid {
    pub fn new() -> Self {
        Self {
            title: String::new(),
            results: None,
            selected_row: 0,
            selected_col: 0,
            col_widths: Vec::new(),
        }
    }

    pub fn show(&mut self, title: String, results: QueryResults) {
        self.col_widths = compute_column_widths(&results);
        self.title = title;
        self.results = Some(results);
        self.selected_row = 0;
        self.selected_col = 0;
    }

    pub fn hide(&mut self) {
        self.results = None;
        self.col_widths.clear();
    }

    pub fn is_visible(&self) -> bool {
        self.results.is_some()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn row_count(&self) -> usize {
        self.results.as_ref().map_or(0, QueryResults::row_count)
    }

    fn col_count(&self) -> usize {
        self.results.as_ref().map_or(0, |r| r.columns.len())
    }

    /// Full text of the selected cell
    pub fn selected_cell_text(&self) -> Option<String> {
        let results = self.results.as_ref()?;
        let cell = results
            .rows
            .get(self.selected_row)?
            .values
            .get(self.selected_col)?;
        Some(cell.to_text())
    }

    pub fn move_up(&mut self) {
        self.selected_row = self.selected_row.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected_row + 1 < self.row_count() {
            self.selected_row += 1;
        }
    }

    pub fn move_left(&mut self) {
        self.selected_col = self.selected_col.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.selected_col + 1 < self.col_count() {
            self.selected_col += 1;
        }
    }

    pub fn page_up(&mut self) {
        self.selected_row = self.selected_row.saturating_sub(PAGE_SIZE);
    }

    pub fn page_down(&mut self) {
        self.selected_row = (self.selected_row + PAGE_SIZE).min(self.row_count().saturating_sub(1));
    }

    pub fn go_to_top(&mut self) {
        self.selected_row = 0;
    }

    pub fn go_to_bottom(&mut self) {
        self.selected_row = self.row_count().saturating_sub(1);
    }

    /// First column to draw so the selected one fits in `width`
    fn h_scroll(&self, width: u16) -> usize {
        let mut start = self.selected_col;
        let mut used = self.col_width(start);
        while start > 0 {
            let prev = self.col_width(start - 1) + 1;
            if used + prev > width {
                break;
            }
            used += prev;
            start -= 1;
        }
        start
    }

    fn col_width(&self, idx: usize) -> u16 {
        self.col_widths.get(idx).copied().unwrap_or(10)
    }
}

impl Default for PreviewGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for PreviewGrid {
    fn render(&self, frame: &mut Frame, area: Rect, focused: bool, theme: &Theme) {
        let Some(ref results) = self.results else {
            return;
        };

        let popup = centered_rect(90, 80, area);
        frame.render_widget(Clear, popup);
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", self.title))
            .border_style(theme.border_style(focused));
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        if inner.height < 3 || inner.width < 5 {
            return;
        }

        // header + footer
        let visible_height = inner.height as usize - 2;
        let scroll_offset = (self.selected_row + 1).saturating_sub(visible_height);
        let h_scroll = self.h_scroll(inner.width);
        let right = inner.x + inner.width;

        let mut x = inner.x;
        for (col_idx, col) in results.columns.iter().enumerate().skip(h_scroll) {
            if x >= right {
                break;
            }
            let w = self.col_width(col_idx).min(right - x);
            let style = if col_idx == self.selected_col {
                theme.grid_header_selected
            } else {
                theme.grid_header
            };
            let (name, _) = col.name.unicode_truncate(w as usize);
            frame.render_widget(
                Paragraph::new(name.to_string()).style(style),
                Rect::new(x, inner.y, w, 1),
            );
            x += w + 1;
        }

        for (row_idx, row) in results
            .rows
            .iter()
            .enumerate()
            .skip(scroll_offset)
            .take(visible_height)
        {
            let vis_row = row_idx - scroll_offset;
            let y = inner.y + 1 + vis_row as u16;
            let base = if vis_row % 2 == 0 {
                theme.grid_row_even
            } else {
                theme.grid_row_odd
            };

            let mut x = inner.x;
            for (col_idx, cell) in row.values.iter().enumerate().skip(h_scroll) {
                if x >= right {
                    break;
                }
                let w = self.col_width(col_idx).min(right - x);
                let style = if row_idx == self.selected_row && col_idx == self.selected_col {
                    theme.grid_selected
                } else if cell.is_null() {
                    theme.grid_null
                } else {
                    base
                };
                frame.render_widget(
                    Paragraph::new(cell.display_string(w as usize)).style(style),
                    Rect::new(x, y, w, 1),
                );
                x += w + 1;
            }
        }

        let column = results
            .columns
            .get(self.selected_col)
            .map(|c| format!("{} ({})", c.name, c.data_type.display_name()))
            .unwrap_or_default();
        let footer = format!(
            "Ligne {}/{} | {} | {:.1}ms",
            self.selected_row + 1,
            results.row_count(),
            column,
            results.execution_time.as_secs_f64() * 1000.0,
        );
        frame.render_widget(
            Paragraph::new(footer).style(theme.grid_footer),
            Rect::new(inner.x, inner.y + inner.height - 1, inner.width, 1),
        );
    }
}

/// Column widths from header names and the displayed values
fn compute_column_widths(results: &QueryResults) -> Vec<u16> {
    let mut widths: Vec<usize> = results.columns.iter().map(|c| c.name.width()).collect();

    for row in &results.rows {
        for (w, cell) in widths.iter_mut().zip(&row.values) {
            *w = (*w).max(cell.display_string(40).width());
        }
    }

    widths.into_iter().map(|w| (w as u16).clamp(4, 40)).collect()
}
