//! Database access layer
//!
//! A trait-based abstraction over the catalog queries, so the action runner
//! can be exercised with mock providers.

pub mod catalog;
pub mod postgres;
pub mod provider;
pub mod sql;
pub mod types;

// Re-export main types
pub use catalog::{GeometryInfo, RelationMetadata, SearchKind, SearchRow};
pub use provider::CatalogProvider;
pub use types::{CellValue, ColumnDef, DataType, QueryResults, Row};
