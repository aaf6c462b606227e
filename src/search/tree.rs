//! Grouped search result tree
//!
//! Turns the flat, sorted search rows into a display-independent list of
//! schema headers, kind headers and leaves. The TUI and the plain-text
//! printer both render from this structure.

use crate::db::catalog::{SearchKind, SearchRow};
use std::fmt;

/// Text of the single row shown when a search matches nothing
pub const NO_MATCH_TEXT: &str = "🔍 Aucune correspondance trouvée.";

/// Relation targeted by the load/metadata/preview actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub schema: String,
    pub name: String,
    pub kind: SearchKind,
}

impl Selection {
    /// `schema.name`
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.schema, self.name)
    }
}

/// One display row of the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    SchemaHeader(String),
    KindHeader(SearchKind),
    Leaf {
        text: String,
        /// Only set for table, view and materialized view rows
        selection: Option<Selection>,
    },
    Placeholder(String),
}

impl TreeNode {
    /// Indentation level (0 = schema header)
    pub fn depth(&self) -> usize {
        match self {
            TreeNode::SchemaHeader(_) | TreeNode::Placeholder(_) => 0,
            TreeNode::KindHeader(_) => 1,
            TreeNode::Leaf { .. } => 2,
        }
    }

    /// Label without indentation
    pub fn label(&self) -> String {
        match self {
            TreeNode::SchemaHeader(schema) => format!("----- Schéma : {} -----", schema),
            TreeNode::KindHeader(kind) => format!("• {}", kind.label()),
            TreeNode::Leaf { text, .. } => format!("- {}", text),
            TreeNode::Placeholder(text) => text.clone(),
        }
    }

    pub fn selection(&self) -> Option<&Selection> {
        match self {
            TreeNode::Leaf { selection, .. } => selection.as_ref(),
            _ => None,
        }
    }
}

/// Ordered search result tree, rebuilt from scratch on every search
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultTree {
    nodes: Vec<TreeNode>,
}

impl ResultTree {
    /// Group rows that are already sorted by (schema, name, kind).
    ///
    /// A schema header is emitted whenever the schema changes, and a kind
    /// header whenever the kind changes within a schema. Comments longer than
    /// `comment_max_chars` characters are cut.
    pub fn build(rows: &[SearchRow], comment_max_chars: usize) -> Self {
        if rows.is_empty() {
            return Self::no_match();
        }

        let mut nodes = Vec::with_capacity(rows.len() * 2);
        let mut current_schema: Option<&str> = None;
        let mut current_kind: Option<SearchKind> = None;

        for row in rows {
            if current_schema != Some(row.schema.as_str()) {
                nodes.push(TreeNode::SchemaHeader(row.schema.clone()));
                current_schema = Some(row.schema.as_str());
                current_kind = None;
            }
            if current_kind != Some(row.kind) {
                nodes.push(TreeNode::KindHeader(row.kind));
                current_kind = Some(row.kind);
            }
            nodes.push(leaf(row, comment_max_chars));
        }

        Self { nodes }
    }

    /// Tree holding only the "no match" placeholder
    pub fn no_match() -> Self {
        Self {
            nodes: vec![TreeNode::Placeholder(NO_MATCH_TEXT.to_string())],
        }
    }

    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    pub fn get(&self, index: usize) -> Option<&TreeNode> {
        self.nodes.get(index)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Selection payload of the node at `index`, if it carries one
    pub fn selection_at(&self, index: usize) -> Option<&Selection> {
        self.nodes.get(index).and_then(TreeNode::selection)
    }
}

impl fmt::Display for ResultTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for node in &self.nodes {
            writeln!(f, "{}{}", "  ".repeat(node.depth()), node.label())?;
        }
        Ok(())
    }
}

fn leaf(row: &SearchRow, comment_max_chars: usize) -> TreeNode {
    let text = match row.kind {
        SearchKind::Table | SearchKind::View | SearchKind::MatView => row.name.clone(),
        SearchKind::Column => format!("{}.{}", row.name, row.column.as_deref().unwrap_or_default()),
        SearchKind::Comment => format!(
            "{} : {}",
            row.name,
            truncate_comment(row.comment.as_deref().unwrap_or_default(), comment_max_chars)
        ),
    };
    let selection = row.kind.is_relation().then(|| Selection {
        schema: row.schema.clone(),
        name: row.name.clone(),
        kind: row.kind,
    });
    TreeNode::Leaf { text, selection }
}

/// Cut `comment` to `max_chars` characters, appending "..." when it was longer.
///
/// Counts Unicode scalar values, so multi-byte characters are never split.
pub fn truncate_comment(comment: &str, max_chars: usize) -> String {
    match comment.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &comment[..byte_idx]),
        None => comment.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(tree: &ResultTree) -> Vec<String> {
        tree.nodes().iter().map(TreeNode::label).collect()
    }

    #[test]
    fn test_empty_rows_give_single_placeholder() {
        let tree = ResultTree::build(&[], 50);
        assert_eq!(tree.len(), 1);
        assert_eq!(
            tree.get(0),
            Some(&TreeNode::Placeholder(NO_MATCH_TEXT.to_string()))
        );
        assert!(tree.selection_at(0).is_none());
    }

    #[test]
    fn test_road_example_grouping() {
        let rows = vec![
            SearchRow::column("network", "segments", "road_id"),
            SearchRow::relation(SearchKind::Table, "public", "roads"),
        ];
        let tree = ResultTree::build(&rows, 50);
        assert_eq!(
            labels(&tree),
            vec![
                "----- Schéma : network -----",
                "• Colonnes",
                "- segments.road_id",
                "----- Schéma : public -----",
                "• Tables",
                "- roads",
            ]
        );
    }

    #[test]
    fn test_one_header_per_schema_and_kind_run() {
        let rows = vec![
            SearchRow::relation(SearchKind::Table, "a", "t1"),
            SearchRow::relation(SearchKind::Table, "a", "t2"),
            SearchRow::column("a", "t2", "c"),
            SearchRow::relation(SearchKind::View, "a", "v1"),
            SearchRow::relation(SearchKind::View, "b", "v2"),
        ];
        let tree = ResultTree::build(&rows, 50);
        let schema_headers = tree
            .nodes()
            .iter()
            .filter(|n| matches!(n, TreeNode::SchemaHeader(_)))
            .count();
        let kind_headers: Vec<_> = tree
            .nodes()
            .iter()
            .filter_map(|n| match n {
                TreeNode::KindHeader(k) => Some(*k),
                _ => None,
            })
            .collect();
        assert_eq!(schema_headers, 2);
        assert_eq!(
            kind_headers,
            vec![
                SearchKind::Table,
                SearchKind::Column,
                SearchKind::View,
                SearchKind::View
            ]
        );
    }

    #[test]
    fn test_kind_header_repeats_after_schema_change() {
        let rows = vec![
            SearchRow::relation(SearchKind::Table, "a", "t"),
            SearchRow::relation(SearchKind::Table, "b", "t"),
        ];
        let tree = ResultTree::build(&rows, 50);
        assert_eq!(tree.len(), 6);
        assert_eq!(tree.get(4), Some(&TreeNode::KindHeader(SearchKind::Table)));
    }

    #[test]
    fn test_only_relations_carry_selection() {
        let rows = vec![
            SearchRow::column("s", "t", "c"),
            SearchRow::comment("s", "t", "note"),
            SearchRow::relation(SearchKind::MatView, "s", "mv"),
            SearchRow::relation(SearchKind::Table, "s", "t"),
            SearchRow::relation(SearchKind::View, "s", "v"),
        ];
        let tree = ResultTree::build(&rows, 50);
        for node in tree.nodes() {
            match node {
                TreeNode::Leaf { text, selection } => {
                    let is_relation = ["mv", "t", "v"].contains(&text.as_str());
                    assert_eq!(selection.is_some(), is_relation, "leaf {}", text);
                }
                other => assert!(other.selection().is_none()),
            }
        }
        let sel = tree
            .nodes()
            .iter()
            .find_map(|n| n.selection().filter(|s| s.kind == SearchKind::MatView))
            .unwrap();
        assert_eq!(sel.qualified_name(), "s.mv");
    }

    #[test]
    fn test_comment_leaf_truncated() {
        let long = "a".repeat(60);
        let tree = ResultTree::build(&[SearchRow::comment("s", "t", &long)], 50);
        assert_eq!(
            tree.get(2).unwrap().label(),
            format!("- t : {}...", "a".repeat(50))
        );
    }

    #[test]
    fn test_truncate_comment_boundaries() {
        let exact = "b".repeat(50);
        assert_eq!(truncate_comment(&exact, 50), exact);
        assert_eq!(truncate_comment("short", 50), "short");
        assert_eq!(truncate_comment("", 50), "");
        let over = "c".repeat(51);
        assert_eq!(truncate_comment(&over, 50), format!("{}...", "c".repeat(50)));
    }

    #[test]
    fn test_truncate_comment_counts_characters_not_bytes() {
        let accented = "é".repeat(50);
        assert_eq!(truncate_comment(&accented, 50), accented);
        let longer = "é".repeat(55);
        assert_eq!(truncate_comment(&longer, 50), format!("{}...", "é".repeat(50)));
    }

    #[test]
    fn test_display_indents_by_depth() {
        let tree = ResultTree::build(
            &[SearchRow::relation(SearchKind::Table, "public", "roads")],
            50,
        );
        assert_eq!(
            tree.to_string(),
            "----- Schéma : public -----\n  • Tables\n    - roads\n"
        );
    }
}
