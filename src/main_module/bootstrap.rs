//! Bootstrap and application initialization logic

use anyhow::{Context, Result};
use log::info;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::shared::create_conn;
use crate::shared::state::AppState;
use crate::tasks::TaskStore;

/// Initialize logging; `RUST_LOG` overrides the default `info` filter.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}

/// Opens the database and builds the shared state. The first connection is
/// opened here so a bad path or schema script fails startup.
pub async fn build_app_state(config: AppConfig) -> Result<Arc<AppState>> {
    let pool = create_conn(&config.database)?;
    let task_store = TaskStore::new(pool);

    task_store
        .run(|store| store.ping())
        .await
        .with_context(|| format!("Database at {} is not usable", config.database.url))?;
    info!("Task store ready at {}", config.database.url);

    Ok(Arc::new(AppState::new(config, task_store)))
}
