//! Catalog search and metadata types
//!
//! Rows and records produced by the catalog queries, independent of how
//! they are displayed.

use std::fmt;

/// Kind of catalog object a search row refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchKind {
    Table,
    View,
    MatView,
    Column,
    Comment,
}

impl SearchKind {
    /// Parse the tag used in the search query's `type` column
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "table" => Some(SearchKind::Table),
            "view" => Some(SearchKind::View),
            "matview" => Some(SearchKind::MatView),
            "column" => Some(SearchKind::Column),
            "comment" => Some(SearchKind::Comment),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            SearchKind::Table => "table",
            SearchKind::View => "view",
            SearchKind::MatView => "matview",
            SearchKind::Column => "column",
            SearchKind::Comment => "comment",
        }
    }

    /// Group heading shown above rows of this kind
    pub fn label(self) -> &'static str {
        match self {
            SearchKind::Table => "Tables",
            SearchKind::View => "Vues",
            SearchKind::MatView => "Vues matérialisées",
            SearchKind::Column => "Colonnes",
            SearchKind::Comment => "Commentaires",
        }
    }

    /// Whether rows of this kind name a relation that can be loaded or previewed
    pub fn is_relation(self) -> bool {
        matches!(
            self,
            SearchKind::Table | SearchKind::View | SearchKind::MatView
        )
    }
}

impl fmt::Display for SearchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One row of the catalog search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRow {
    pub kind: SearchKind,
    pub schema: String,
    pub name: String,
    /// Set for column matches
    pub column: Option<String>,
    /// Set for comment matches
    pub comment: Option<String>,
}

impl SearchRow {
    pub fn relation(kind: SearchKind, schema: &str, name: &str) -> Self {
        Self {
            kind,
            schema: schema.to_string(),
            name: name.to_string(),
            column: None,
            comment: None,
        }
    }

    pub fn column(schema: &str, table: &str, column: &str) -> Self {
        Self {
            kind: SearchKind::Column,
            schema: schema.to_string(),
            name: table.to_string(),
            column: Some(column.to_string()),
            comment: None,
        }
    }

    pub fn comment(schema: &str, name: &str, comment: &str) -> Self {
        Self {
            kind: SearchKind::Comment,
            schema: schema.to_string(),
            name: name.to_string(),
            column: None,
            comment: Some(comment.to_string()),
        }
    }
}

/// Geometry registration of a spatial relation (from `geometry_columns`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeometryInfo {
    pub column: String,
    pub geometry_type: String,
    pub srid: i32,
}

/// Descriptive metadata of a relation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationMetadata {
    /// Raw `pg_class.relkind` code
    pub relkind: String,
    pub owner: Option<String>,
    pub comment: Option<String>,
    pub geometry: Option<GeometryInfo>,
}

impl RelationMetadata {
    /// Human label for the relkind code; unknown codes are shown as-is
    pub fn relation_label(&self) -> String {
        relkind_label(&self.relkind)
            .map(str::to_string)
            .unwrap_or_else(|| self.relkind.clone())
    }

    /// (property, value) pairs in display order
    pub fn properties(&self) -> Vec<(String, String)> {
        let mut props = vec![
            ("Type de relation".to_string(), self.relation_label()),
            (
                "Propriétaire".to_string(),
                self.owner
                    .clone()
                    .filter(|o| !o.is_empty())
                    .unwrap_or_else(|| "Inconnu".to_string()),
            ),
            (
                "Commentaire".to_string(),
                self.comment
                    .clone()
                    .filter(|c| !c.is_empty())
                    .unwrap_or_else(|| "(Aucun commentaire)".to_string()),
            ),
        ];
        if let Some(ref geom) = self.geometry {
            props.push(("Colonne géométrique".to_string(), geom.column.clone()));
            props.push(("Type de géométrie".to_string(), geom.geometry_type.clone()));
            props.push(("SRID".to_string(), geom.srid.to_string()));
        }
        props
    }
}

/// Map a `pg_class.relkind` code to its label
pub fn relkind_label(code: &str) -> Option<&'static str> {
    match code {
        "r" => Some("Table"),
        "v" => Some("Vue"),
        "m" => Some("Vue matérialisée"),
        "i" => Some("Index"),
        "S" => Some("Séquence"),
        "t" => Some("Type"),
        "c" => Some("Composite"),
        "f" => Some("Foreign Table"),
        "p" => Some("Partition"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(geometry: Option<GeometryInfo>) -> RelationMetadata {
        RelationMetadata {
            relkind: "r".to_string(),
            owner: Some("gis_admin".to_string()),
            comment: None,
            geometry,
        }
    }

    #[test]
    fn test_kind_tags_round_trip() {
        for kind in [
            SearchKind::Table,
            SearchKind::View,
            SearchKind::MatView,
            SearchKind::Column,
            SearchKind::Comment,
        ] {
            assert_eq!(SearchKind::from_tag(kind.tag()), Some(kind));
        }
        assert_eq!(SearchKind::from_tag("index"), None);
    }

    #[test]
    fn test_only_relations_are_relations() {
        assert!(SearchKind::Table.is_relation());
        assert!(SearchKind::MatView.is_relation());
        assert!(!SearchKind::Column.is_relation());
        assert!(!SearchKind::Comment.is_relation());
    }

    #[test]
    fn test_relkind_labels() {
        assert_eq!(relkind_label("m"), Some("Vue matérialisée"));
        assert_eq!(relkind_label("S"), Some("Séquence"));
        assert_eq!(relkind_label("s"), None);
    }

    #[test]
    fn test_unknown_relkind_falls_back_to_code() {
        let mut meta = metadata(None);
        meta.relkind = "x".to_string();
        assert_eq!(meta.relation_label(), "x");
    }

    #[test]
    fn test_properties_defaults_without_geometry() {
        let mut meta = metadata(None);
        meta.owner = None;
        let props = meta.properties();
        assert_eq!(props.len(), 3);
        assert_eq!(props[0], ("Type de relation".to_string(), "Table".to_string()));
        assert_eq!(props[1].1, "Inconnu");
        assert_eq!(props[2].1, "(Aucun commentaire)");
        assert!(!props.iter().any(|(k, _)| k == "SRID"));
    }

    #[test]
    fn test_properties_with_geometry() {
        let props = metadata(Some(GeometryInfo {
            column: "geom".to_string(),
            geometry_type: "MULTILINESTRING".to_string(),
            srid: 2154,
        }))
        .properties();
        assert_eq!(props.len(), 6);
        assert_eq!(props[3], ("Colonne géométrique".to_string(), "geom".to_string()));
        assert_eq!(props[5], ("SRID".to_string(), "2154".to_string()));
    }
}
