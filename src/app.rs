//! Application state and event handling
//!
//! Central state machine: events come in, state updates, actions go out.
//! Database work is described by [`Action`] values and carried out by the
//! [`crate::runner::ActionRunner`]; its outcome comes back as an [`AppEvent`].

use crate::config::settings::SearchSettings;
use crate::db::catalog::{RelationMetadata, SearchRow};
use crate::db::types::QueryResults;
use crate::keymap::{KeyAction, KeyMap};
use crate::layer::{MapHost, VectorLayer};
use crate::search::{
    EMPTY_PATTERN_MESSAGE, EMPTY_PATTERN_TITLE, ResultTree, SearchPattern, Selection,
};
use crate::ui::Component;
use crate::ui::help::HelpOverlay;
use crate::ui::layers::LayersPanel;
use crate::ui::message::{MessageDialog, MessageLevel};
use crate::ui::metadata::MetadataDialog;
use crate::ui::preview::PreviewGrid;
use crate::ui::search_input::SearchInput;
use crate::ui::theme::Theme;
use crate::ui::tree::ResultsTree;
use crossterm::event::KeyEvent;

/// Shown when an action needs a table or view and none is selected
pub const SELECT_RELATION_MESSAGE: &str = "Sélectionnez une table ou vue dans la liste.";

/// Main application state
pub struct App {
    /// Display name of the connection (`database@host`)
    pub connection_name: Option<String>,

    /// Which panel currently has focus
    pub focus: PanelFocus,

    /// Focus before a modal was opened (to restore on dismiss)
    pub previous_focus: PanelFocus,

    /// UI Components
    pub search_input: SearchInput,
    pub results: ResultsTree,
    pub layers: LayersPanel,
    pub metadata: MetadataDialog,
    pub preview: PreviewGrid,
    pub message: MessageDialog,
    pub help: HelpOverlay,

    /// Data-driven keybinding configuration
    pub keymap: KeyMap,

    /// UI theme (created once, reused every frame)
    pub theme: Theme,

    /// Status message to display
    pub status_message: Option<StatusMessage>,

    /// Whether a database round trip is in flight
    pub busy: bool,

    search_settings: SearchSettings,

    /// Persistent clipboard handle (kept alive to avoid Linux clipboard drop race)
    clipboard: Option<arboard::Clipboard>,

    /// Error from clipboard initialization (preserved for diagnostics)
    clipboard_error: Option<String>,

    /// Whether the application is running
    pub running: bool,
}

/// Panel focus state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelFocus {
    SearchInput,
    Results,
    Layers,
    Metadata,
    Preview,
    Message,
    Help,
}

impl PanelFocus {
    /// Modal panels capture all input until dismissed
    pub fn is_modal(self) -> bool {
        matches!(
            self,
            PanelFocus::Metadata | PanelFocus::Preview | PanelFocus::Message | PanelFocus::Help
        )
    }
}

/// Status message with severity level
pub struct StatusMessage {
    pub message: String,
    pub level: StatusLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Application events from the event loop and the action runner
#[derive(Debug)]
pub enum AppEvent {
    /// Keyboard input event
    Key(KeyEvent),
    /// Terminal resize event
    Resize,
    /// Bracketed paste event
    Paste(String),
    /// Catalog search finished
    SearchCompleted(Vec<SearchRow>),
    /// Relation metadata fetched; `None` when the catalog has no entry
    MetadataLoaded {
        selection: Selection,
        metadata: Option<RelationMetadata>,
    },
    /// Preview rows fetched
    PreviewLoaded {
        selection: Selection,
        results: QueryResults,
    },
    /// A layer passed validation and can be registered
    LayerReady(VectorLayer),
    /// A database action failed; shown as an error dialog
    ActionFailed { title: String, message: String },
    /// Background database connection lost
    ConnectionLost(String),
}

/// Actions returned by event handlers for the main loop to execute
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Search(SearchPattern),
    LoadLayer(Selection),
    ShowMetadata(Selection),
    Preview(Selection),
    Quit,
    None,
}

impl Action {
    /// Whether carrying out this action needs a database round trip
    pub fn needs_database(&self) -> bool {
        matches!(
            self,
            Action::Search(_) | Action::LoadLayer(_) | Action::ShowMetadata(_) | Action::Preview(_)
        )
    }
}

impl App {
    pub fn new() -> Self {
        Self::with_settings(SearchSettings::default())
    }

    pub fn with_settings(search_settings: SearchSettings) -> Self {
        let (clipboard, clipboard_error) = match arboard::Clipboard::new() {
            Ok(c) => (Some(c), None),
            Err(e) => (None, Some(e.to_string())),
        };
        Self {
            connection_name: None,
            focus: PanelFocus::SearchInput,
            previous_focus: PanelFocus::SearchInput,
            search_input: SearchInput::new(),
            results: ResultsTree::new(),
            layers: LayersPanel::new(),
            metadata: MetadataDialog::new(),
            preview: PreviewGrid::new(),
            message: MessageDialog::new(),
            help: HelpOverlay::new(),
            keymap: KeyMap::default(),
            theme: Theme::default(),
            status_message: None,
            busy: false,
            search_settings,
            clipboard,
            clipboard_error,
            running: true,
        }
    }

    /// Number of rows requested by the data preview
    pub fn preview_rows(&self) -> usize {
        self.search_settings.preview_rows
    }

    /// Handle an application event and return resulting action
    pub fn handle_event(&mut self, event: AppEvent) -> Action {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Paste(data) => {
                if self.focus == PanelFocus::SearchInput {
                    self.search_input.insert_text(&data);
                }
                Action::None
            }
            AppEvent::Resize => Action::None,
            AppEvent::SearchCompleted(rows) => {
                self.busy = false;
                let count = rows.len();
                tracing::debug!(rows = count, "search completed");
                let tree = ResultTree::build(&rows, self.search_settings.comment_max_chars);
                self.results.set_tree(tree);
                if count == 0 {
                    self.set_status("Aucun résultat".to_string(), StatusLevel::Info);
                } else {
                    self.focus = PanelFocus::Results;
                    self.set_status(format!("{} résultat(s)", count), StatusLevel::Success);
                }
                Action::None
            }
            AppEvent::MetadataLoaded {
                selection,
                metadata,
            } => {
                self.busy = false;
                match metadata {
                    Some(meta) => {
                        self.metadata.show(
                            format!("Métadonnées : {}", selection.qualified_name()),
                            meta.properties(),
                        );
                        self.open_modal(PanelFocus::Metadata);
                    }
                    None => self.show_message(
                        MessageLevel::Info,
                        "Métadonnées",
                        "Aucune information trouvée.",
                    ),
                }
                Action::None
            }
            AppEvent::PreviewLoaded { selection, results } => {
                self.busy = false;
                if results.is_empty() {
                    self.show_message(MessageLevel::Info, "Info", "Aucune donnée trouvée.");
                } else {
                    self.preview.show(
                        format!(
                            "{} premières lignes de {}",
                            self.search_settings.preview_rows,
                            selection.qualified_name()
                        ),
                        results,
                    );
                    self.open_modal(PanelFocus::Preview);
                }
                Action::None
            }
            AppEvent::LayerReady(layer) => {
                self.busy = false;
                let name = layer.name.clone();
                self.layers.add_map_layer(layer);
                self.set_status(format!("Couche ajoutée : {}", name), StatusLevel::Success);
                Action::None
            }
            AppEvent::ActionFailed { title, message } => {
                self.busy = false;
                self.show_message(MessageLevel::Error, &title, &message);
                Action::None
            }
            AppEvent::ConnectionLost(msg) => {
                self.busy = false;
                tracing::error!(message = %msg, "database connection lost");
                self.set_status(msg, StatusLevel::Error);
                Action::None
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Action {
        if self.busy {
            return Action::None;
        }
        self.status_message = None;

        if let Some(key_action) = self.keymap.resolve(self.focus, key) {
            // Global panel and action keys do nothing while a modal is up,
            // so they cannot fall through to the panel underneath.
            match key_action {
                KeyAction::CycleFocus
                | KeyAction::CycleFocusReverse
                | KeyAction::ShowHelp
                | KeyAction::ShowMetadata
                | KeyAction::PreviewRows
                    if self.focus.is_modal() =>
                {
                    return Action::None;
                }
                _ => return self.execute_key_action(key_action),
            }
        }

        // Fall through to the text input for free-form typing
        if self.focus == PanelFocus::SearchInput {
            self.search_input.handle_key(key);
        }
        Action::None
    }

    fn execute_key_action(&mut self, action: KeyAction) -> Action {
        match action {
            // ── Global ───────────────────────────────────────
            KeyAction::Quit => Action::Quit,
            KeyAction::CycleFocus => {
                self.cycle_focus();
                Action::None
            }
            KeyAction::CycleFocusReverse => {
                self.cycle_focus_reverse();
                Action::None
            }
            KeyAction::ShowHelp => {
                self.help.show();
                self.open_modal(PanelFocus::Help);
                Action::None
            }
            KeyAction::ShowMetadata => match self.require_selection() {
                Some(selection) => self.begin(Action::ShowMetadata(selection)),
                None => Action::None,
            },
            KeyAction::PreviewRows => match self.require_selection() {
                Some(selection) => self.begin(Action::Preview(selection)),
                None => Action::None,
            },

            // ── Navigation ───────────────────────────────────
            KeyAction::MoveUp => {
                match self.focus {
                    PanelFocus::Results => self.results.move_up(),
                    PanelFocus::Layers => self.layers.move_up(),
                    PanelFocus::Preview => self.preview.move_up(),
                    PanelFocus::Metadata => self.metadata.scroll_up(),
                    PanelFocus::Help => self.help.scroll_up(),
                    _ => {}
                }
                Action::None
            }
            KeyAction::MoveDown => {
                match self.focus {
                    PanelFocus::Results => self.results.move_down(),
                    PanelFocus::Layers => self.layers.move_down(),
                    PanelFocus::Preview => self.preview.move_down(),
                    PanelFocus::Metadata => self.metadata.scroll_down(),
                    PanelFocus::Help => self.help.scroll_down(),
                    _ => {}
                }
                Action::None
            }
            KeyAction::MoveLeft => {
                if self.focus == PanelFocus::Preview {
                    self.preview.move_left();
                }
                Action::None
            }
            KeyAction::MoveRight => {
                if self.focus == PanelFocus::Preview {
                    self.preview.move_right();
                }
                Action::None
            }
            KeyAction::PageUp => {
                match self.focus {
                    PanelFocus::Results => self.results.page_up(),
                    PanelFocus::Preview => self.preview.page_up(),
                    PanelFocus::Help => self.help.page_up(),
                    _ => {}
                }
                Action::None
            }
            KeyAction::PageDown => {
                match self.focus {
                    PanelFocus::Results => self.results.page_down(),
                    PanelFocus::Preview => self.preview.page_down(),
                    PanelFocus::Help => self.help.page_down(),
                    _ => {}
                }
                Action::None
            }
            KeyAction::GoToTop => {
                match self.focus {
                    PanelFocus::Results => self.results.go_to_top(),
                    PanelFocus::Layers => self.layers.go_to_top(),
                    PanelFocus::Preview => self.preview.go_to_top(),
                    PanelFocus::Metadata => self.metadata.scroll_to_top(),
                    PanelFocus::Help => self.help.scroll_to_top(),
                    _ => {}
                }
                Action::None
            }
            KeyAction::GoToBottom => {
                match self.focus {
                    PanelFocus::Results => self.results.go_to_bottom(),
                    PanelFocus::Layers => self.layers.go_to_bottom(),
                    PanelFocus::Preview => self.preview.go_to_bottom(),
                    PanelFocus::Metadata => self.metadata.scroll_to_bottom(),
                    PanelFocus::Help => self.help.scroll_to_bottom(),
                    _ => {}
                }
                Action::None
            }

            // ── Search input ─────────────────────────────────
            KeyAction::RunSearch => match SearchPattern::parse(self.search_input.text()) {
                Some(pattern) => {
                    tracing::debug!(pattern = pattern.as_str(), "search requested");
                    self.begin(Action::Search(pattern))
                }
                None => {
                    self.show_message(
                        MessageLevel::Warning,
                        EMPTY_PATTERN_TITLE,
                        EMPTY_PATTERN_MESSAGE,
                    );
                    Action::None
                }
            },

            // ── Results ──────────────────────────────────────
            // Rows without a payload (headers, columns, comments) are inert.
            KeyAction::LoadLayer => match self.results.selected_selection().cloned() {
                Some(selection) => self.begin(Action::LoadLayer(selection)),
                None => Action::None,
            },
            KeyAction::FocusSearch => {
                self.focus = PanelFocus::SearchInput;
                Action::None
            }

            // ── Layers / preview ─────────────────────────────
            KeyAction::Copy => {
                let text = match self.focus {
                    PanelFocus::Layers => self.layers.selected_uri().map(str::to_string),
                    PanelFocus::Preview => self.preview.selected_cell_text(),
                    _ => None,
                };
                if let Some(text) = text {
                    self.copy_to_clipboard(&text);
                }
                Action::None
            }

            // ── Modal ────────────────────────────────────────
            KeyAction::Dismiss => {
                match self.focus {
                    PanelFocus::Metadata => self.metadata.hide(),
                    PanelFocus::Preview => self.preview.hide(),
                    PanelFocus::Message => self.message.hide(),
                    PanelFocus::Help => self.help.hide(),
                    _ => return Action::None,
                }
                self.focus = self.previous_focus;
                Action::None
            }
        }
    }

    /// Mark a database action as in flight and hand it to the main loop
    fn begin(&mut self, action: Action) -> Action {
        self.busy = true;
        self.set_status("Recherche…".to_string(), StatusLevel::Info);
        action
    }

    /// Selection payload of the highlighted result row, or prompt the user
    fn require_selection(&mut self) -> Option<Selection> {
        let selection = self.results.selected_selection().cloned();
        if selection.is_none() {
            self.show_message(MessageLevel::Info, "Info", SELECT_RELATION_MESSAGE);
        }
        selection
    }

    pub fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            PanelFocus::SearchInput => PanelFocus::Results,
            PanelFocus::Results => PanelFocus::Layers,
            PanelFocus::Layers => PanelFocus::SearchInput,
            other => other,
        };
    }

    fn cycle_focus_reverse(&mut self) {
        self.focus = match self.focus {
            PanelFocus::SearchInput => PanelFocus::Layers,
            PanelFocus::Results => PanelFocus::SearchInput,
            PanelFocus::Layers => PanelFocus::Results,
            other => other,
        };
    }

    fn open_modal(&mut self, focus: PanelFocus) {
        if !self.focus.is_modal() {
            self.previous_focus = self.focus;
        }
        self.focus = focus;
    }

    /// Show a modal message dialog
    pub fn show_message(&mut self, level: MessageLevel, title: &str, body: &str) {
        self.message.show(level, title.to_string(), body.to_string());
        self.open_modal(PanelFocus::Message);
    }

    pub fn set_status(&mut self, message: String, level: StatusLevel) {
        self.status_message = Some(StatusMessage { message, level });
    }

    fn copy_to_clipboard(&mut self, text: &str) {
        if let Some(clipboard) = self.clipboard.as_mut() {
            match clipboard.set_text(text) {
                Ok(()) => self.set_status(
                    "Copié dans le presse-papiers".to_string(),
                    StatusLevel::Success,
                ),
                Err(e) => {
                    self.set_status(format!("Clipboard error: {}", e), StatusLevel::Warning);
                }
            }
        } else {
            let reason = self.clipboard_error.as_deref().unwrap_or("unknown reason");
            self.set_status(
                format!("Clipboard unavailable: {}", reason),
                StatusLevel::Warning,
            );
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
