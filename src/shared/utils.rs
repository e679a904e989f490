use anyhow::{Context, Result};
use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PooledConnection};
use diesel::SqliteConnection;
use log::info;
use std::sync::Arc;
use std::time::Duration;

use crate::config::DatabaseConfig;

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConn = PooledConnection<ConnectionManager<SqliteConnection>>;

/// Bootstrap script compiled into the binary.
pub const DEFAULT_SCHEMA: &str = include_str!("../../schema.sql");

/// Runs on every freshly opened connection, before the pool hands it out.
#[derive(Debug, Clone)]
pub struct ConnectionBootstrap {
    schema_sql: Arc<str>,
    busy_timeout_ms: u32,
}

impl ConnectionBootstrap {
    pub fn new(schema_sql: impl Into<Arc<str>>, busy_timeout_ms: u32) -> Self {
        Self {
            schema_sql: schema_sql.into(),
            busy_timeout_ms,
        }
    }
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionBootstrap {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute(&format!("PRAGMA busy_timeout = {};", self.busy_timeout_ms))
            .and_then(|()| conn.batch_execute(&self.schema_sql))
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Reads the configured bootstrap script, falling back to the embedded one.
pub fn load_schema(config: &DatabaseConfig) -> Result<String> {
    match &config.schema_path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read schema script at {}", path.display())),
        None => Ok(DEFAULT_SCHEMA.to_string()),
    }
}

/// Connections are opened lazily; none are created until the first checkout.
pub fn create_conn(config: &DatabaseConfig) -> Result<DbPool> {
    let schema_sql = load_schema(config)?;
    let manager = ConnectionManager::<SqliteConnection>::new(config.url.as_str());
    let pool = Pool::builder()
        .max_size(config.pool_size.max(1))
        .min_idle(Some(0))
        .connection_timeout(Duration::from_secs(config.connection_timeout_secs))
        .connection_customizer(Box::new(ConnectionBootstrap::new(
            schema_sql,
            config.busy_timeout_ms,
        )))
        .build(manager)
        .with_context(|| format!("Failed to create database pool for {}", config.url))?;

    info!(
        "Database pool ready for {} (max {} connections)",
        config.url,
        config.pool_size.max(1)
    );
    Ok(pool)
}
