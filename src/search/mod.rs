//! Catalog search: pattern validation and result grouping

pub mod tree;

pub use tree::{NO_MATCH_TEXT, ResultTree, Selection, TreeNode, truncate_comment};

/// Title of the warning shown for an empty pattern
pub const EMPTY_PATTERN_TITLE: &str = "Champ vide";

/// Body of the warning shown for an empty pattern
pub const EMPTY_PATTERN_MESSAGE: &str = "Veuillez entrer un nom ou une partie de nom.";

/// A trimmed, non-empty search pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPattern(String);

impl SearchPattern {
    /// Trim the input; `None` when nothing is left
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
