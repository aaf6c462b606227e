//! Catalog provider trait
//!
//! Defines the operations the search dialog needs from a database.
//! This abstraction allows for:
//! - Testing the action runner with in-memory mock implementations
//! - Keeping SQL and driver details out of the application state

use crate::db::catalog::{GeometryInfo, RelationMetadata, SearchRow};
use crate::db::types::QueryResults;
use crate::error::DbResult;

/// Database operations behind the search dialog
///
/// Each call is one complete round trip; nothing is held open between calls.
pub trait CatalogProvider {
    /// Search tables, views, materialized views, columns and comments
    /// for a case-insensitive substring.
    ///
    /// Rows come back ordered by (schema, name, kind tag).
    ///
    /// # Errors
    /// Returns `DbError::QueryFailed` if the query fails
    async fn search(&self, pattern: &str) -> DbResult<Vec<SearchRow>>;

    /// First geometry column registered for a relation, if any
    async fn geometry_column(&self, schema: &str, table: &str) -> DbResult<Option<String>>;

    /// Relkind, owner, comment and geometry registration of a relation.
    ///
    /// Returns `Ok(None)` when the relation is not in the catalog.
    async fn relation_metadata(
        &self,
        schema: &str,
        table: &str,
    ) -> DbResult<Option<RelationMetadata>>;

    /// Fetch the first `limit` rows of a relation
    async fn preview(&self, schema: &str, table: &str, limit: usize) -> DbResult<QueryResults>;

    /// Check that a relation can be read by the connected role
    async fn check_readable(&self, schema: &str, table: &str) -> DbResult<()>;
}

/// Geometry lookup shared by metadata implementations
pub(crate) fn geometry_from_parts(
    column: Option<String>,
    geometry_type: Option<String>,
    srid: Option<i32>,
) -> Option<GeometryInfo> {
    let column = column?;
    Some(GeometryInfo {
        column,
        geometry_type: geometry_type.unwrap_or_default(),
        srid: srid.unwrap_or(0),
    })
}
