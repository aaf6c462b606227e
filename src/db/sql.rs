//! SQL text for the catalog queries and identifier quoting

/// Union of table, view, materialized view, column and comment matches.
///
/// `$1` is the bare pattern; the `%` wrapping happens server-side.
pub const SEARCH_CATALOG: &str = "\
SELECT 'table' AS type, schemaname::text AS schema, tablename::text AS name, \
       NULL::text AS column_name, NULL::text AS comment \
FROM pg_catalog.pg_tables \
WHERE tablename ILIKE '%' || $1 || '%' \
UNION ALL \
SELECT 'view', schemaname::text, viewname::text, NULL, NULL \
FROM pg_catalog.pg_views \
WHERE viewname ILIKE '%' || $1 || '%' \
UNION ALL \
SELECT 'matview', schemaname::text, matviewname::text, NULL, NULL \
FROM pg_catalog.pg_matviews \
WHERE matviewname ILIKE '%' || $1 || '%' \
UNION ALL \
SELECT 'column', table_schema::text, table_name::text, column_name::text, NULL \
FROM information_schema.columns \
WHERE column_name ILIKE '%' || $1 || '%' \
UNION ALL \
SELECT 'comment', n.nspname::text, c.relname::text, NULL, d.description \
FROM pg_catalog.pg_class c \
JOIN pg_catalog.pg_namespace n ON n.oid = c.relnamespace \
LEFT JOIN pg_catalog.pg_description d ON d.objoid = c.oid \
WHERE d.description ILIKE '%' || $1 || '%' \
ORDER BY schema, name, type";

/// First registered geometry column of a relation
pub const GEOMETRY_COLUMN: &str = "\
SELECT f_geometry_column::text \
FROM geometry_columns \
WHERE f_table_schema = $1 AND f_table_name = $2 \
LIMIT 1";

/// Geometry column, type and SRID of a relation
pub const GEOMETRY_INFO: &str = "\
SELECT f_geometry_column::text, type::text, srid \
FROM geometry_columns \
WHERE f_table_schema = $1 AND f_table_name = $2 \
LIMIT 1";

/// Relkind, owner and comment of a relation
pub const RELATION_METADATA: &str = "\
SELECT c.relkind::text, r.rolname::text, d.description \
FROM pg_catalog.pg_class c \
JOIN pg_catalog.pg_namespace n ON n.oid = c.relnamespace \
JOIN pg_catalog.pg_roles r ON r.oid = c.relowner \
LEFT JOIN pg_catalog.pg_description d ON d.objoid = c.oid AND d.objsubid = 0 \
WHERE n.nspname = $1 AND c.relname = $2 \
LIMIT 1";

/// Quote an identifier for inclusion in SQL text.
///
/// Always quotes, so case and reserved words survive; embedded `"` are doubled.
pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// `"schema"."name"`
pub fn qualified_name(schema: &str, name: &str) -> String {
    format!("{}.{}", quote_ident(schema), quote_ident(name))
}

/// First `limit` rows of a relation
pub fn preview_query(schema: &str, name: &str, limit: usize) -> String {
    format!("SELECT * FROM {} LIMIT {}", qualified_name(schema, name), limit)
}

/// Zero-row read used to check that a relation is readable
pub fn probe_query(schema: &str, name: &str) -> String {
    format!("SELECT * FROM {} LIMIT 0", qualified_name(schema, name))
}
