use crate::config::AppConfig;
use crate::tasks::TaskStore;

/// Built once at startup and shared with every handler through axum state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub task_store: TaskStore,
}

impl AppState {
    pub fn new(config: AppConfig, task_store: TaskStore) -> Self {
        Self { config, task_store }
    }
}
