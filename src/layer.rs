//! Map layers backed by PostGIS relations
//!
//! Builds the data-source string a GIS layer provider consumes, and defines
//! the host that layers are handed to once they validate.

use crate::config::ConnectionConfig;

/// Provider key for PostGIS-backed vector layers
pub const POSTGRES_PROVIDER: &str = "postgres";

/// Data-source descriptor for one relation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSource {
    pub database: String,
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub schema: String,
    pub table: String,
    pub geometry_column: Option<String>,
}

impl DataSource {
    pub fn new(
        config: &ConnectionConfig,
        schema: &str,
        table: &str,
        geometry_column: Option<String>,
    ) -> Self {
        Self {
            database: config.database.clone(),
            host: config.host.clone(),
            port: config.port,
            username: config.username.clone(),
            password: config.password.clone().unwrap_or_default(),
            schema: schema.to_string(),
            table: table.to_string(),
            geometry_column,
        }
    }

    /// Render as a provider URI, e.g.
    /// `dbname='gis' host=db port=5432 user='u' password='p' schema='public'
    /// table='roads' (geom) sql=`
    ///
    /// The geometry clause is present only for spatial relations. Quoted
    /// values have `\` and `'` backslash-escaped.
    pub fn uri(&self) -> String {
        let mut uri = format!(
            "dbname='{}' host={} port={} user='{}' password='{}' schema='{}' table='{}'",
            escape_quoted(&self.database),
            self.host,
            self.port,
            escape_quoted(&self.username),
            escape_quoted(&self.password),
            escape_quoted(&self.schema),
            escape_quoted(&self.table)
        );
        if let Some(ref geom) = self.geometry_column {
            uri.push_str(&format!(" ({})", geom));
        }
        uri.push_str(" sql=");
        uri
    }
}

fn escape_quoted(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

/// A vector layer ready to be registered with a host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorLayer {
    /// Display name, `schema.table`
    pub name: String,
    pub uri: String,
    pub provider: &'static str,
    pub is_spatial: bool,
}

impl VectorLayer {
    pub fn from_source(source: &DataSource) -> Self {
        Self {
            name: format!("{}.{}", source.schema, source.table),
            uri: source.uri(),
            provider: POSTGRES_PROVIDER,
            is_spatial: source.geometry_column.is_some(),
        }
    }
}

/// Receiver of validated layers
pub trait MapHost {
    fn add_map_layer(&mut self, layer: VectorLayer);
}

/// In-process project holding the layers loaded this session
#[derive(Debug, Default)]
pub struct Project {
    layers: Vec<VectorLayer>,
}

impl Project {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layers(&self) -> &[VectorLayer] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl MapHost for Project {
    fn add_map_layer(&mut self, layer: VectorLayer) {
        tracing::info!(layer = %layer.name, spatial = layer.is_spatial, "layer added");
        self.layers.push(layer);
    }
}
