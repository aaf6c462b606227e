//! Common test utilities and helpers
//!
//! Shared fixtures for the integration tests. Each test builds its own
//! throwaway schema so tests can run in parallel against one database.

#![allow(dead_code)]

use pgsearch::config::ConnectionConfig;
use pgsearch::config::SslMode;
use pgsearch::db::postgres::PostgresProvider;
use tokio_postgres::{Client, NoTls};

/// Test database connection config (TEST_DB_* variables, with defaults)
pub fn test_config() -> ConnectionConfig {
    ConnectionConfig {
        host: std::env::var("TEST_DB_HOST").unwrap_or_else(|_| "localhost".to_string()),
        port: std::env::var("TEST_DB_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(5433),
        database: std::env::var("TEST_DB_NAME").unwrap_or_else(|_| "test_db".to_string()),
        username: std::env::var("TEST_DB_USER").unwrap_or_else(|_| "test_user".to_string()),
        password: Some(
            std::env::var("TEST_DB_PASSWORD").unwrap_or_else(|_| "test_password".to_string()),
        ),
        ssl_mode: SslMode::Disable,
    }
}

/// Connect the provider, or `None` (with a note on stderr) when no database is reachable
pub async fn connect_or_skip() -> Option<PostgresProvider> {
    let config = test_config();
    match PostgresProvider::connect(&config).await {
        Ok((provider, _)) => Some(provider),
        Err(e) => {
            eprintln!(
                "Skipping test: database not available at {}:{} - {}",
                config.host, config.port, e
            );
            None
        }
    }
}

/// A schema created for one test and dropped by [`Fixture::teardown`]
pub struct Fixture {
    pub schema: String,
    client: Client,
}

impl Fixture {
    /// Create `pgsearch_it_<tag>_<pid>` and run `ddl` in it.
    ///
    /// `ddl` may use `{schema}` as a placeholder for the quoted schema name.
    pub async fn setup(tag: &str, ddl: &str) -> Option<Self> {
        let config = test_config();
        let (client, connection) =
            match tokio_postgres::connect(&config.connection_string_with_password(), NoTls).await
            {
                Ok(c) => c,
                Err(_) => return None,
            };
        tokio::spawn(async move {
            let _ = connection.await;
        });

        let schema = format!("pgsearch_it_{}_{}", tag, std::process::id());
        client
            .batch_execute(&format!(
                "DROP SCHEMA IF EXISTS \"{0}\" CASCADE; CREATE SCHEMA \"{0}\";",
                schema
            ))
            .await
            .expect("create fixture schema");
        client
            .batch_execute(&ddl.replace("{schema}", &format!("\"{}\"", schema)))
            .await
            .expect("run fixture ddl");

        Some(Self { schema, client })
    }

    pub async fn teardown(self) {
        let _ = self
            .client
            .batch_execute(&format!("DROP SCHEMA IF EXISTS \"{}\" CASCADE", self.schema))
            .await;
    }
}
