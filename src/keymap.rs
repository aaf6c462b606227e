//! Data-driven keybinding configuration
//!
//! All keybindings are defined as data in `KeyMap::default()`, not as match arms
//! scattered across components. To add a new binding, add an entry to the
//! appropriate context in `KeyMap::default()` and handle the `KeyAction` in
//! `App::execute_key_action()`.

use crate::app::PanelFocus;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// A key combination (code + modifiers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    const fn plain(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }

    const fn ctrl(c: char) -> Self {
        Self {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::CONTROL,
        }
    }
}

impl From<KeyEvent> for KeyBind {
    fn from(event: KeyEvent) -> Self {
        Self {
            code: event.code,
            modifiers: event.modifiers,
        }
    }
}

/// Semantic key actions: what a key means, not which key it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    // Global
    Quit,
    CycleFocus,
    CycleFocusReverse,
    ShowHelp,
    ShowMetadata,
    PreviewRows,

    // Navigation (shared by results, layers, dialogs)
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    PageUp,
    PageDown,
    GoToTop,
    GoToBottom,

    // Search input
    RunSearch,

    // Results tree
    LoadLayer,
    FocusSearch,

    // Layers panel and preview grid
    Copy,

    // Modal dismiss
    Dismiss,
}

/// Maps key combos to semantic actions per panel.
pub struct KeyMap {
    /// Bindings that apply regardless of focus (checked first)
    global: HashMap<KeyBind, KeyAction>,
    /// Per-panel bindings (checked after global)
    panels: HashMap<PanelFocus, HashMap<KeyBind, KeyAction>>,
}

impl KeyMap {
    /// Resolve a key event to a semantic action.
    /// Checks global bindings first, then panel-specific bindings.
    pub fn resolve(&self, focus: PanelFocus, key: KeyEvent) -> Option<KeyAction> {
        let bind = KeyBind::from(key);
        if let Some(action) = self.global.get(&bind) {
            return Some(*action);
        }
        self.panels
            .get(&focus)
            .and_then(|m| m.get(&bind))
            .copied()
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        let global = HashMap::from([
            (KeyBind::ctrl('q'), KeyAction::Quit),
            (KeyBind::plain(KeyCode::Tab), KeyAction::CycleFocus),
            (
                KeyBind {
                    code: KeyCode::BackTab,
                    modifiers: KeyModifiers::SHIFT,
                },
                KeyAction::CycleFocusReverse,
            ),
            (KeyBind::plain(KeyCode::F(1)), KeyAction::ShowHelp),
            (KeyBind::plain(KeyCode::F(3)), KeyAction::ShowMetadata),
            (KeyBind::plain(KeyCode::F(4)), KeyAction::PreviewRows),
        ]);

        let mut panels = HashMap::new();

        // ── Search input ─────────────────────────────────────────
        // Printable keys fall through to the text input.
        panels.insert(
            PanelFocus::SearchInput,
            HashMap::from([
                (KeyBind::plain(KeyCode::Enter), KeyAction::RunSearch),
                (KeyBind::plain(KeyCode::Down), KeyAction::CycleFocus),
            ]),
        );

        // ── Results ──────────────────────────────────────────────
        let mut results = HashMap::new();
        insert_scroll_nav(&mut results);
        results.insert(KeyBind::plain(KeyCode::Enter), KeyAction::LoadLayer);
        results.insert(KeyBind::plain(KeyCode::Char('m')), KeyAction::ShowMetadata);
        results.insert(KeyBind::plain(KeyCode::Char('p')), KeyAction::PreviewRows);
        results.insert(KeyBind::plain(KeyCode::Char('/')), KeyAction::FocusSearch);
        results.insert(KeyBind::plain(KeyCode::Char('q')), KeyAction::Quit);
        panels.insert(PanelFocus::Results, results);

        // ── Layers ───────────────────────────────────────────────
        let mut layers = HashMap::new();
        insert_scroll_nav(&mut layers);
        layers.insert(KeyBind::plain(KeyCode::Char('y')), KeyAction::Copy);
        layers.insert(KeyBind::plain(KeyCode::Char('/')), KeyAction::FocusSearch);
        panels.insert(PanelFocus::Layers, layers);

        // ── Preview grid ─────────────────────────────────────────
        let mut preview = HashMap::new();
        insert_scroll_nav(&mut preview);
        preview.insert(KeyBind::plain(KeyCode::Left), KeyAction::MoveLeft);
        preview.insert(KeyBind::plain(KeyCode::Char('h')), KeyAction::MoveLeft);
        preview.insert(KeyBind::plain(KeyCode::Right), KeyAction::MoveRight);
        preview.insert(KeyBind::plain(KeyCode::Char('l')), KeyAction::MoveRight);
        preview.insert(KeyBind::plain(KeyCode::Char('y')), KeyAction::Copy);
        insert_dismiss(&mut preview);
        panels.insert(PanelFocus::Preview, preview);

        // ── Metadata, help ───────────────────────────────────────
        for focus in [PanelFocus::Metadata, PanelFocus::Help] {
            let mut modal = HashMap::new();
            insert_scroll_nav(&mut modal);
            insert_dismiss(&mut modal);
            panels.insert(focus, modal);
        }

        // ── Message dialog ───────────────────────────────────────
        let mut message = HashMap::new();
        insert_dismiss(&mut message);
        message.insert(KeyBind::plain(KeyCode::Enter), KeyAction::Dismiss);
        panels.insert(PanelFocus::Message, message);

        Self { global, panels }
    }
}

/// Insert vertical navigation bindings (arrows + jk + page + g/G + Home/End)
fn insert_scroll_nav(map: &mut HashMap<KeyBind, KeyAction>) {
    map.insert(KeyBind::plain(KeyCode::Up), KeyAction::MoveUp);
    map.insert(KeyBind::plain(KeyCode::Char('k')), KeyAction::MoveUp);
    map.insert(KeyBind::plain(KeyCode::Down), KeyAction::MoveDown);
    map.insert(KeyBind::plain(KeyCode::Char('j')), KeyAction::MoveDown);
    map.insert(KeyBind::plain(KeyCode::PageUp), KeyAction::PageUp);
    map.insert(KeyBind::plain(KeyCode::PageDown), KeyAction::PageDown);
    map.insert(KeyBind::plain(KeyCode::Home), KeyAction::GoToTop);
    map.insert(KeyBind::plain(KeyCode::Char('g')), KeyAction::GoToTop);
    map.insert(KeyBind::plain(KeyCode::End), KeyAction::GoToBottom);
    map.insert(
        KeyBind {
            code: KeyCode::Char('G'),
            modifiers: KeyModifiers::SHIFT,
        },
        KeyAction::GoToBottom,
    );
}

fn insert_dismiss(map: &mut HashMap<KeyBind, KeyAction>) {
    map.insert(KeyBind::plain(KeyCode::Esc), KeyAction::Dismiss);
    map.insert(KeyBind::plain(KeyCode::Char('q')), KeyAction::Dismiss);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_global_binding_wins() {
        let km = KeyMap::default();
        let ctrl_q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL);
        for focus in [PanelFocus::SearchInput, PanelFocus::Results, PanelFocus::Preview] {
            assert_eq!(km.resolve(focus, ctrl_q), Some(KeyAction::Quit));
        }
    }

    #[test]
    fn test_letters_fall_through_in_search_input() {
        let km = KeyMap::default();
        for c in ['j', 'k', 'm', 'p', 'q', 'y', '/'] {
            assert_eq!(km.resolve(PanelFocus::SearchInput, key(KeyCode::Char(c))), None);
        }
    }

    #[test]
    fn test_enter_depends_on_panel() {
        let km = KeyMap::default();
        assert_eq!(
            km.resolve(PanelFocus::SearchInput, key(KeyCode::Enter)),
            Some(KeyAction::RunSearch)
        );
        assert_eq!(
            km.resolve(PanelFocus::Results, key(KeyCode::Enter)),
            Some(KeyAction::LoadLayer)
        );
        assert_eq!(
            km.resolve(PanelFocus::Message, key(KeyCode::Enter)),
            Some(KeyAction::Dismiss)
        );
    }

    #[test]
    fn test_results_action_keys() {
        let km = KeyMap::default();
        assert_eq!(
            km.resolve(PanelFocus::Results, key(KeyCode::Char('m'))),
            Some(KeyAction::ShowMetadata)
        );
        assert_eq!(
            km.resolve(PanelFocus::Results, key(KeyCode::Char('p'))),
            Some(KeyAction::PreviewRows)
        );
        assert_eq!(
            km.resolve(PanelFocus::SearchInput, key(KeyCode::F(4))),
            Some(KeyAction::PreviewRows)
        );
    }

    #[test]
    fn test_shift_g_goes_to_bottom() {
        let km = KeyMap::default();
        let shift_g = KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT);
        assert_eq!(
            km.resolve(PanelFocus::Layers, shift_g),
            Some(KeyAction::GoToBottom)
        );
    }

    #[test]
    fn test_copy_in_layers_and_preview() {
        let km = KeyMap::default();
        for focus in [PanelFocus::Layers, PanelFocus::Preview] {
            assert_eq!(
                km.resolve(focus, key(KeyCode::Char('y'))),
                Some(KeyAction::Copy)
            );
        }
        assert_eq!(km.resolve(PanelFocus::Results, key(KeyCode::Char('y'))), None);
    }
}
