//! PostgreSQL catalog provider
//!
//! Concrete implementation using tokio-postgres.

use crate::config::ConnectionConfig;
use crate::config::connections::SslMode;
use crate::db::catalog::{RelationMetadata, SearchKind, SearchRow};
use crate::db::provider::{CatalogProvider, geometry_from_parts};
use crate::db::sql;
use crate::db::types::{CellValue, ColumnDef, DataType, QueryResults, Row};
use crate::error::{DbError, DbResult};
use rust_decimal::Decimal;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_postgres::Client;
use tokio_postgres::types::{FromSql, Kind, Type};

/// PostgreSQL catalog provider
///
/// Owns the client and the background task driving its connection.
/// Close it with [`PostgresProvider::disconnect`].
pub struct PostgresProvider {
    client: Client,
    connection_task: JoinHandle<()>,
}

impl PostgresProvider {
    /// Connect to a PostgreSQL database.
    ///
    /// Returns the provider and a receiver that fires if the background
    /// connection is lost (e.g. server restart, idle timeout).
    pub async fn connect(
        config: &ConnectionConfig,
    ) -> DbResult<(Self, mpsc::UnboundedReceiver<String>)> {
        let conn_string = config.connection_string_with_password();
        let (conn_err_tx, conn_err_rx) = mpsc::unbounded_channel();

        let (client, connection_task) = match config.ssl_mode {
            SslMode::Disable => {
                let (client, connection) =
                    tokio_postgres::connect(&conn_string, tokio_postgres::NoTls)
                        .await
                        .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;
                let task = tokio::spawn(async move {
                    if let Err(e) = connection.await {
                        let _ = conn_err_tx.send(format!("Connection lost: {}", e));
                    }
                });
                (client, task)
            }
            SslMode::Prefer | SslMode::Require => {
                let tls = tokio_postgres_rustls::MakeRustlsConnect::new(make_tls_config());
                let (client, connection) = tokio_postgres::connect(&conn_string, tls)
                    .await
                    .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;
                let task = tokio::spawn(async move {
                    if let Err(e) = connection.await {
                        let _ = conn_err_tx.send(format!("Connection lost: {}", e));
                    }
                });
                (client, task)
            }
        };

        tracing::info!(
            host = %config.host,
            port = config.port,
            database = %config.database,
            "connected"
        );

        Ok((
            Self {
                client,
                connection_task,
            },
            conn_err_rx,
        ))
    }

    /// Close the connection and wait for the background task to finish
    pub async fn disconnect(self) {
        drop(self.client);
        if let Err(e) = self.connection_task.await {
            tracing::warn!(error = %e, "connection task ended abnormally");
        }
        tracing::info!("disconnected");
    }

    async fn geometry_info(
        &self,
        schema: &str,
        table: &str,
    ) -> DbResult<Option<crate::db::catalog::GeometryInfo>> {
        let row = self
            .client
            .query_opt(sql::GEOMETRY_INFO, &[&schema, &table])
            .await?;
        Ok(row.and_then(|r| {
            geometry_from_parts(
                r.get::<_, Option<String>>(0),
                r.get::<_, Option<String>>(1),
                r.get::<_, Option<i32>>(2),
            )
        }))
    }
}

impl CatalogProvider for PostgresProvider {
    async fn search(&self, pattern: &str) -> DbResult<Vec<SearchRow>> {
        let rows = self.client.query(sql::SEARCH_CATALOG, &[&pattern]).await?;

        let mut results = Vec::with_capacity(rows.len());
        for row in &rows {
            let tag: String = row.try_get(0)?;
            let Some(kind) = SearchKind::from_tag(&tag) else {
                tracing::warn!(tag = %tag, "unexpected search row type");
                continue;
            };
            results.push(SearchRow {
                kind,
                schema: row.try_get(1)?,
                name: row.try_get(2)?,
                column: row.try_get(3)?,
                comment: row.try_get(4)?,
            });
        }
        Ok(results)
    }

    async fn geometry_column(&self, schema: &str, table: &str) -> DbResult<Option<String>> {
        let row = self
            .client
            .query_opt(sql::GEOMETRY_COLUMN, &[&schema, &table])
            .await?;
        Ok(row.and_then(|r| r.get::<_, Option<String>>(0)))
    }

    async fn relation_metadata(
        &self,
        schema: &str,
        table: &str,
    ) -> DbResult<Option<RelationMetadata>> {
        let Some(row) = self
            .client
            .query_opt(sql::RELATION_METADATA, &[&schema, &table])
            .await?
        else {
            return Ok(None);
        };

        // geometry_columns only exists where PostGIS is installed
        let geometry = match self.geometry_info(schema, table).await {
            Ok(g) => g,
            Err(e) => {
                tracing::warn!(schema, table, error = %e, "geometry lookup failed");
                None
            }
        };

        Ok(Some(RelationMetadata {
            relkind: row.try_get(0)?,
            owner: row.try_get(1)?,
            comment: row.try_get(2)?,
            geometry,
        }))
    }

    async fn preview(&self, schema: &str, table: &str, limit: usize) -> DbResult<QueryResults> {
        let start = std::time::Instant::now();
        let stmt = self
            .client
            .prepare(&sql::preview_query(schema, table, limit))
            .await?;

        let columns: Vec<ColumnDef> = stmt
            .columns()
            .iter()
            .map(|col| ColumnDef {
                name: col.name().to_string(),
                data_type: pg_type_to_datatype(col.type_()),
            })
            .collect();

        let pg_rows = self.client.query(&stmt, &[]).await?;

        let rows = pg_rows
            .iter()
            .map(|pg_row| Row {
                values: columns
                    .iter()
                    .enumerate()
                    .map(|(i, col)| extract_cell_value(pg_row, i, &col.data_type))
                    .collect(),
            })
            .collect();

        Ok(QueryResults::new(columns, rows, start.elapsed()))
    }

    async fn check_readable(&self, schema: &str, table: &str) -> DbResult<()> {
        self.client
            .execute(&sql::probe_query(schema, table), &[])
            .await?;
        Ok(())
    }
}

/// Map tokio_postgres Type to our DataType enum
fn pg_type_to_datatype(pg_type: &Type) -> DataType {
    match *pg_type {
        Type::INT2 => DataType::SmallInt,
        Type::INT4 => DataType::Integer,
        Type::INT8 => DataType::BigInt,
        Type::FLOAT4 => DataType::Real,
        Type::FLOAT8 => DataType::Double,
        Type::NUMERIC => DataType::Numeric,
        Type::TEXT | Type::NAME | Type::VARCHAR | Type::CHAR | Type::BPCHAR => DataType::Text,
        Type::BOOL => DataType::Boolean,
        Type::DATE => DataType::Date,
        Type::TIME => DataType::Time,
        Type::TIMESTAMP => DataType::Timestamp,
        Type::TIMESTAMPTZ => DataType::TimestampTz,
        Type::JSON => DataType::Json,
        Type::JSONB => DataType::Jsonb,
        Type::BYTEA => DataType::Bytea,
        Type::UUID => DataType::Uuid,
        Type::INT4_ARRAY => DataType::Array(Box::new(DataType::Integer)),
        Type::INT8_ARRAY => DataType::Array(Box::new(DataType::BigInt)),
        Type::TEXT_ARRAY | Type::VARCHAR_ARRAY | Type::NAME_ARRAY => {
            DataType::Array(Box::new(DataType::Text))
        }
        _ => DataType::Unknown(pg_type.name().to_string()),
    }
}

/// Build a rustls ClientConfig that trusts OS certificates (with Mozilla roots as fallback)
fn make_tls_config() -> rustls::ClientConfig {
    let mut root_store = rustls::RootCertStore::empty();

    let native_certs = rustls_native_certs::load_native_certs();
    let mut loaded = 0;
    for cert in native_certs.certs {
        if root_store.add(cert).is_ok() {
            loaded += 1;
        }
    }
    if loaded == 0 {
        root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
    }

    rustls::ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth()
}

/// Extract a cell value from a tokio_postgres Row based on the column's DataType.
///
/// Falls back to the string representation when the typed read fails.
fn extract_cell_value(row: &tokio_postgres::Row, idx: usize, data_type: &DataType) -> CellValue {
    fn typed<'a, T, F>(row: &'a tokio_postgres::Row, idx: usize, f: F) -> CellValue
    where
        T: tokio_postgres::types::FromSql<'a>,
        F: FnOnce(T) -> CellValue,
    {
        match row.try_get::<_, Option<T>>(idx) {
            Ok(Some(v)) => f(v),
            Ok(None) => CellValue::Null,
            Err(_) => try_as_string(row, idx),
        }
    }

    match data_type {
        DataType::SmallInt => typed::<i16, _>(row, idx, |v| CellValue::Integer(v as i64)),
        DataType::Integer => typed::<i32, _>(row, idx, |v| CellValue::Integer(v as i64)),
        DataType::BigInt => typed::<i64, _>(row, idx, CellValue::Integer),
        DataType::Real => typed::<f32, _>(row, idx, |v| CellValue::Float(v as f64)),
        DataType::Double => typed::<f64, _>(row, idx, CellValue::Float),
        DataType::Numeric => typed::<Decimal, _>(row, idx, |v| CellValue::Text(v.to_string())),
        DataType::Boolean => typed::<bool, _>(row, idx, CellValue::Boolean),
        DataType::Json | DataType::Jsonb => {
            typed::<serde_json::Value, _>(row, idx, CellValue::Json)
        }
        DataType::Bytea => typed::<Vec<u8>, _>(row, idx, CellValue::Binary),
        DataType::Uuid => typed::<uuid::Uuid, _>(row, idx, |v| CellValue::Text(v.to_string())),
        DataType::Date => typed::<chrono::NaiveDate, _>(row, idx, |v| {
            CellValue::DateTime(v.to_string())
        }),
        DataType::Time => typed::<chrono::NaiveTime, _>(row, idx, |v| {
            CellValue::DateTime(v.to_string())
        }),
        DataType::Timestamp => typed::<chrono::NaiveDateTime, _>(row, idx, |v| {
            CellValue::DateTime(v.to_string())
        }),
        DataType::TimestampTz => typed::<chrono::DateTime<chrono::Utc>, _>(row, idx, |v| {
            CellValue::DateTime(v.to_string())
        }),
        DataType::Array(inner) => match **inner {
            DataType::Integer => typed::<Vec<Option<i32>>, _>(row, idx, |v| {
                CellValue::Array(
                    v.into_iter()
                        .map(|n| n.map_or(CellValue::Null, |n| CellValue::Integer(n as i64)))
                        .collect(),
                )
            }),
            DataType::BigInt => typed::<Vec<Option<i64>>, _>(row, idx, |v| {
                CellValue::Array(
                    v.into_iter()
                        .map(|n| n.map_or(CellValue::Null, CellValue::Integer))
                        .collect(),
                )
            }),
            _ => typed::<Vec<Option<String>>, _>(row, idx, |v| {
                CellValue::Array(
                    v.into_iter()
                        .map(|s| s.map_or(CellValue::Null, CellValue::Text))
                        .collect(),
                )
            }),
        },
        DataType::Text | DataType::Unknown(_) => try_as_string(row, idx),
    }
}

/// Try to extract a value as a string (fallback for type mismatches).
///
/// Types without a text mapping fall back to their raw wire bytes: enum
/// labels as text, anything else (e.g. PostGIS geometry, which arrives as
/// EWKB) as uppercase hex like the server's own text output.
fn try_as_string(row: &tokio_postgres::Row, idx: usize) -> CellValue {
    match row.try_get::<_, Option<String>>(idx) {
        Ok(Some(v)) => CellValue::Text(v),
        Ok(None) => CellValue::Null,
        Err(_) => match row.try_get::<_, Option<RawValue>>(idx) {
            Ok(Some(raw)) => {
                let is_enum = row
                    .columns()
                    .get(idx)
                    .is_some_and(|c| matches!(c.type_().kind(), Kind::Enum(_)));
                if is_enum {
                    CellValue::Text(String::from_utf8_lossy(&raw.0).into_owned())
                } else {
                    CellValue::Text(to_hex(&raw.0))
                }
            }
            Ok(None) => CellValue::Null,
            Err(_) => {
                let type_name = row
                    .columns()
                    .get(idx)
                    .map_or("unknown", |c| c.type_().name());
                CellValue::Text(format!("<{}>", type_name))
            }
        },
    }
}

/// Undecoded binary-format value of any type
struct RawValue(Vec<u8>);

impl<'a> FromSql<'a> for RawValue {
    fn from_sql(
        _ty: &Type,
        raw: &'a [u8],
    ) -> std::result::Result<Self, Box<dyn std::error::Error + Sync + Send>> {
        Ok(RawValue(raw.to_vec()))
    }

    fn accepts(_ty: &Type) -> bool {
        true
    }
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02X}", b)).collect()
}
