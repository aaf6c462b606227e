//! Preview result types
//!
//! Rows fetched by the data preview, with every value kept in a form that
//! can be stringified for the grid.

use std::time::Duration;
use unicode_truncate::UnicodeTruncateStr;
use unicode_width::UnicodeWidthStr;

/// Query execution results
#[derive(Debug, Clone)]
pub struct QueryResults {
    /// Column definitions
    pub columns: Vec<ColumnDef>,
    /// Result rows
    pub rows: Vec<Row>,
    /// Query execution time
    pub execution_time: Duration,
}

/// Column definition in query results
#[derive(Debug, Clone)]
pub struct ColumnDef {
    /// Column name
    pub name: String,
    /// Data type
    pub data_type: DataType,
}

/// Database data types the preview knows how to decode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataType {
    SmallInt,
    Integer,
    BigInt,
    Real,
    Double,
    Numeric,
    Text,
    Boolean,
    Date,
    Time,
    Timestamp,
    TimestampTz,
    Json,
    Jsonb,
    Bytea,
    Uuid,
    Array(Box<DataType>),
    /// Anything else, including PostGIS geometry; holds the server type name
    Unknown(String),
}

/// A single row of query results
#[derive(Debug, Clone)]
pub struct Row {
    /// Cell values in column order
    pub values: Vec<CellValue>,
}

/// A cell value (single column value in a row)
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Integer(i64),
    Float(f64),
    Text(String),
    Boolean(bool),
    Json(serde_json::Value),
    Binary(Vec<u8>),
    DateTime(String),
    Array(Vec<CellValue>),
}

impl QueryResults {
    pub fn new(columns: Vec<ColumnDef>, rows: Vec<Row>, execution_time: Duration) -> Self {
        Self {
            columns,
            rows,
            execution_time,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl DataType {
    /// Server-side type name, shown in the grid footer
    pub fn display_name(&self) -> String {
        let name = match self {
            DataType::SmallInt => "smallint",
            DataType::Integer => "integer",
            DataType::BigInt => "bigint",
            DataType::Real => "real",
            DataType::Double => "double precision",
            DataType::Numeric => "numeric",
            DataType::Text => "text",
            DataType::Boolean => "boolean",
            DataType::Date => "date",
            DataType::Time => "time",
            DataType::Timestamp => "timestamp",
            DataType::TimestampTz => "timestamptz",
            DataType::Json => "json",
            DataType::Jsonb => "jsonb",
            DataType::Bytea => "bytea",
            DataType::Uuid => "uuid",
            DataType::Array(inner) => return format!("{}[]", inner.display_name()),
            DataType::Unknown(name) => name,
        };
        name.to_string()
    }
}

impl CellValue {
    /// Full string form of the value
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Null => "NULL".to_string(),
            CellValue::Integer(i) => i.to_string(),
            CellValue::Float(f) => f.to_string(),
            CellValue::Text(s) | CellValue::DateTime(s) => s.clone(),
            CellValue::Boolean(b) => b.to_string(),
            CellValue::Json(v) => v.to_string(),
            CellValue::Binary(b) => format!("<binary {} bytes>", b.len()),
            CellValue::Array(arr) => {
                let items: Vec<String> = arr.iter().map(CellValue::to_text).collect();
                format!("{{{}}}", items.join(","))
            }
        }
    }

    /// String form cut to `max_width` terminal columns, ending in "..." when cut
    pub fn display_string(&self, max_width: usize) -> String {
        let full = self.to_text();
        if full.width() <= max_width {
            return full;
        }
        let (head, _) = full.unicode_truncate(max_width.saturating_sub(3));
        format!("{}...", head)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}
