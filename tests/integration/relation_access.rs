//! Metadata, preview and layer validation against a live database

use crate::common::{Fixture, connect_or_skip, test_config};
use pgsearch::app::{Action, AppEvent};
use pgsearch::db::types::CellValue;
use pgsearch::db::{CatalogProvider, SearchKind};
use pgsearch::runner::ActionRunner;
use pgsearch::search::Selection;

const DDL: &str = "
CREATE TABLE {schema}.towns (id int, name text, note text);
INSERT INTO {schema}.towns SELECT g, 'town ' || g, NULL FROM generate_series(1, 30) g;
COMMENT ON TABLE {schema}.towns IS 'Communes du département';
COMMENT ON COLUMN {schema}.towns.name IS 'column comment, not the table comment';
CREATE TABLE {schema}.empty_one (id int);
CREATE VIEW {schema}.town_names AS SELECT name FROM {schema}.towns;
CREATE TABLE {schema}.\"Odd \"\"Name\" (\"Id\" int);
INSERT INTO {schema}.\"Odd \"\"Name\" VALUES (7);
";

fn selection(schema: &str, name: &str, kind: SearchKind) -> Selection {
    Selection {
        schema: schema.to_string(),
        name: name.to_string(),
        kind,
    }
}

#[tokio::test]
async fn test_table_metadata() {
    let Some(fixture) = Fixture::setup("meta", DDL).await else {
        eprintln!("Skipping test: database not available");
        return;
    };
    let Some(provider) = connect_or_skip().await else {
        fixture.teardown().await;
        return;
    };

    let meta = provider
        .relation_metadata(&fixture.schema, "towns")
        .await
        .expect("metadata query should succeed")
        .expect("table should be in the catalog");
    assert_eq!(meta.relkind, "r");
    assert_eq!(meta.relation_label(), "Table");
    assert_eq!(meta.owner.as_deref(), Some(test_config().username.as_str()));
    assert_eq!(meta.comment.as_deref(), Some("Communes du département"));
    // Plain text column; never registered as geometry
    assert!(meta.geometry.is_none());

    let view = provider
        .relation_metadata(&fixture.schema, "town_names")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(view.relation_label(), "Vue");
    let props = view.properties();
    assert_eq!(props[2].1, "(Aucun commentaire)");

    provider.disconnect().await;
    fixture.teardown().await;
}

#[tokio::test]
async fn test_metadata_for_missing_relation_is_none() {
    let Some(provider) = connect_or_skip().await else {
        return;
    };
    let meta = provider
        .relation_metadata("public", "zz_missing_relation_42")
        .await
        .expect("metadata query should succeed");
    assert!(meta.is_none());
    provider.disconnect().await;
}

#[tokio::test]
async fn test_preview_respects_limit() {
    let Some(fixture) = Fixture::setup("preview", DDL).await else {
        eprintln!("Skipping test: database not available");
        return;
    };
    let Some(provider) = connect_or_skip().await else {
        fixture.teardown().await;
        return;
    };

    let results = provider
        .preview(&fixture.schema, "towns", 20)
        .await
        .expect("preview should succeed");
    assert_eq!(results.row_count(), 20);
    let names: Vec<&str> = results.columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["id", "name", "note"]);
    assert!(results.rows[0].values[2].is_null());

    let empty = provider
        .preview(&fixture.schema, "empty_one", 20)
        .await
        .unwrap();
    assert!(empty.is_empty());

    provider.disconnect().await;
    fixture.teardown().await;
}

#[tokio::test]
async fn test_preview_quotes_odd_identifiers() {
    let Some(fixture) = Fixture::setup("quoting", DDL).await else {
        eprintln!("Skipping test: database not available");
        return;
    };
    let Some(provider) = connect_or_skip().await else {
        fixture.teardown().await;
        return;
    };

    let results = provider
        .preview(&fixture.schema, "Odd \"Name", 20)
        .await
        .expect("quoted identifiers should resolve");
    assert_eq!(results.columns[0].name, "Id");
    assert_eq!(results.rows[0].values[0], CellValue::Integer(7));

    provider.disconnect().await;
    fixture.teardown().await;
}

#[tokio::test]
async fn test_check_readable() {
    let Some(fixture) = Fixture::setup("probe", DDL).await else {
        eprintln!("Skipping test: database not available");
        return;
    };
    let Some(provider) = connect_or_skip().await else {
        fixture.teardown().await;
        return;
    };

    assert!(provider.check_readable(&fixture.schema, "towns").await.is_ok());
    assert!(
        provider
            .check_readable(&fixture.schema, "zz_missing")
            .await
            .is_err()
    );

    provider.disconnect().await;
    fixture.teardown().await;
}

#[tokio::test]
async fn test_runner_loads_non_spatial_layer() {
    let Some(fixture) = Fixture::setup("layer", DDL).await else {
        eprintln!("Skipping test: database not available");
        return;
    };
    let Some(provider) = connect_or_skip().await else {
        fixture.teardown().await;
        return;
    };
    let config = test_config();
    let runner = ActionRunner::new(&provider, &config, 20);

    let event = runner
        .run(Action::LoadLayer(selection(
            &fixture.schema,
            "towns",
            SearchKind::Table,
        )))
        .await;
    match event {
        Some(AppEvent::LayerReady(layer)) => {
            assert_eq!(layer.name, format!("{}.towns", fixture.schema));
            assert!(!layer.is_spatial);
            assert!(layer.uri.ends_with("table='towns' sql="));
        }
        other => panic!("unexpected event: {:?}", other),
    }

    let missing = runner
        .run(Action::LoadLayer(selection(
            &fixture.schema,
            "zz_missing",
            SearchKind::Table,
        )))
        .await;
    match missing {
        Some(AppEvent::ActionFailed { message, .. }) => assert_eq!(
            message,
            format!("Impossible de charger la couche {}.zz_missing", fixture.schema)
        ),
        other => panic!("unexpected event: {:?}", other),
    }

    provider.disconnect().await;
    fixture.teardown().await;
}

#[tokio::test]
async fn test_runner_reports_preview_error() {
    let Some(provider) = connect_or_skip().await else {
        return;
    };
    let config = test_config();
    let runner = ActionRunner::new(&provider, &config, 20);

    let event = runner
        .run(Action::Preview(selection(
            "public",
            "zz_missing_relation_42",
            SearchKind::Table,
        )))
        .await;
    match event {
        Some(AppEvent::ActionFailed { message, .. }) => {
            assert!(message.starts_with("Erreur lors de la récupération des données :\n"));
            assert!(message.contains("zz_missing_relation_42"));
        }
        other => panic!("unexpected event: {:?}", other),
    }
    provider.disconnect().await;
}
