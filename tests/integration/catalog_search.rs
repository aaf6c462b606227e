//! Catalog search against a live database

use crate::common::{Fixture, connect_or_skip};
use pgsearch::db::{CatalogProvider, SearchKind, SearchRow};
use pgsearch::search::{ResultTree, TreeNode};

const DDL: &str = "
CREATE TABLE {schema}.zq_roads (id int PRIMARY KEY, geom text);
CREATE TABLE {schema}.segments (id int, zq_road_id int);
CREATE TABLE {schema}.plain (id int);
CREATE VIEW {schema}.zq_road_view AS SELECT id FROM {schema}.zq_roads;
CREATE MATERIALIZED VIEW {schema}.zq_road_stats AS SELECT count(*) AS n FROM {schema}.zq_roads;
COMMENT ON TABLE {schema}.plain IS 'Voirie départementale zq_road, mise à jour annuelle';
";

/// Search rows restricted to the fixture schema
async fn search_in(schema: &str, pattern: &str) -> Option<Vec<SearchRow>> {
    let provider = connect_or_skip().await?;
    let rows = provider.search(pattern).await.expect("search should succeed");
    provider.disconnect().await;
    Some(rows.into_iter().filter(|r| r.schema == schema).collect())
}

#[tokio::test]
async fn test_search_finds_every_kind() {
    let Some(fixture) = Fixture::setup("kinds", DDL).await else {
        eprintln!("Skipping test: database not available");
        return;
    };
    let Some(rows) = search_in(&fixture.schema, "zq_road").await else {
        fixture.teardown().await;
        return;
    };

    let kinds: Vec<(SearchKind, &str)> = rows.iter().map(|r| (r.kind, r.name.as_str())).collect();
    assert!(kinds.contains(&(SearchKind::Table, "zq_roads")));
    assert!(kinds.contains(&(SearchKind::View, "zq_road_view")));
    assert!(kinds.contains(&(SearchKind::MatView, "zq_road_stats")));
    assert!(kinds.contains(&(SearchKind::Column, "segments")));
    assert!(kinds.contains(&(SearchKind::Comment, "plain")));

    let column = rows
        .iter()
        .find(|r| r.kind == SearchKind::Column && r.name == "segments")
        .unwrap();
    assert_eq!(column.column.as_deref(), Some("zq_road_id"));

    let comment = rows.iter().find(|r| r.kind == SearchKind::Comment).unwrap();
    assert!(comment.comment.as_deref().unwrap().starts_with("Voirie"));

    fixture.teardown().await;
}

#[tokio::test]
async fn test_search_is_case_insensitive() {
    let Some(fixture) = Fixture::setup("case", DDL).await else {
        eprintln!("Skipping test: database not available");
        return;
    };
    let Some(rows) = search_in(&fixture.schema, "ZQ_ROADS").await else {
        fixture.teardown().await;
        return;
    };
    assert!(
        rows.iter()
            .any(|r| r.kind == SearchKind::Table && r.name == "zq_roads")
    );
    fixture.teardown().await;
}

#[tokio::test]
async fn test_rows_of_one_relation_are_adjacent() {
    let Some(fixture) = Fixture::setup("order", DDL).await else {
        eprintln!("Skipping test: database not available");
        return;
    };
    let Some(rows) = search_in(&fixture.schema, "zq_road").await else {
        fixture.teardown().await;
        return;
    };
    // Name order follows the server collation; only grouping is checked
    let mut seen: Vec<&str> = Vec::new();
    for row in &rows {
        if seen.last() != Some(&row.name.as_str()) {
            assert!(!seen.contains(&row.name.as_str()), "{} split", row.name);
            seen.push(&row.name);
        }
    }
    fixture.teardown().await;
}

#[tokio::test]
async fn test_search_tree_for_fixture_schema() {
    let Some(fixture) = Fixture::setup("tree", DDL).await else {
        eprintln!("Skipping test: database not available");
        return;
    };
    let Some(rows) = search_in(&fixture.schema, "zq_road").await else {
        fixture.teardown().await;
        return;
    };

    let tree = ResultTree::build(&rows, 50);
    assert_eq!(
        tree.get(0),
        Some(&TreeNode::SchemaHeader(fixture.schema.clone()))
    );
    let schema_headers = tree
        .nodes()
        .iter()
        .filter(|n| matches!(n, TreeNode::SchemaHeader(_)))
        .count();
    assert_eq!(schema_headers, 1);

    // Only relation leaves can be loaded
    let loadable: Vec<String> = tree
        .nodes()
        .iter()
        .filter_map(|n| n.selection().map(|s| s.name.clone()))
        .collect();
    assert_eq!(loadable.len(), 3);
    assert!(!loadable.contains(&"segments".to_string()));

    fixture.teardown().await;
}

#[tokio::test]
async fn test_search_without_match_is_empty() {
    let Some(provider) = connect_or_skip().await else {
        return;
    };
    let rows = provider
        .search("zz_no_such_object_anywhere_42")
        .await
        .expect("search should succeed");
    assert!(rows.is_empty());
    assert_eq!(ResultTree::build(&rows, 50), ResultTree::no_match());
    provider.disconnect().await;
}

#[tokio::test]
async fn test_search_pattern_is_bound_not_spliced() {
    let Some(provider) = connect_or_skip().await else {
        return;
    };
    // A quote in the pattern must not break the statement
    let rows = provider.search("o'brien").await;
    assert!(rows.is_ok(), "quoted pattern should not fail: {:?}", rows.err());
    provider.disconnect().await;
}
