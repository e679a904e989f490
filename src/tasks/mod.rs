//! Task tracking: storage, JSON API and HTML pages.
//!
//! - store: SQLite-backed TaskStore with the CRUD operations
//! - handlers: `/api/tasks` JSON handlers
//! - ui: server-rendered pages and form posts
//! - types / error: row, request and response types, error mapping

pub mod error;
pub mod handlers;
pub mod store;
pub mod types;
pub mod ui;

use axum::Router;
use std::sync::Arc;

use crate::shared::state::AppState;

pub use store::TaskStore;

pub fn configure() -> Router<Arc<AppState>> {
    Router::new()
        .merge(handlers::configure_task_routes())
        .merge(ui::configure_task_ui_routes())
}
