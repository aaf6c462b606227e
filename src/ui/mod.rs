//! Terminal UI components
//!
//! All UI widgets and rendering logic using ratatui.

pub mod help;
pub mod layers;
pub mod layout;
pub mod message;
pub mod metadata;
pub mod preview;
pub mod render;
pub mod search_input;
pub mod theme;
pub mod tree;

use crossterm::event::KeyEvent;
use ratatui::{Frame, layout::Rect};

use crate::ui::theme::Theme;

/// What a component did with a key it was offered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentAction {
    /// Event consumed, no further action needed
    Consumed,
    /// Event not handled, parent should try
    Ignored,
}

/// Trait for UI components
pub trait Component {
    /// Handle a key the keymap did not claim
    fn handle_key(&mut self, _key: KeyEvent) -> ComponentAction {
        ComponentAction::Ignored
    }

    /// Render the component to the frame
    fn render(&self, frame: &mut Frame, area: Rect, focused: bool, theme: &Theme);
}
