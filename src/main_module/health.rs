//! Liveness (`/health`) and readiness (`/api/health`) endpoints

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use log::warn;
use serde::Serialize;
use std::sync::Arc;

use crate::shared::state::AppState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    /// Only reported by the readiness check.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<bool>,
}

impl HealthReport {
    fn new(status: &'static str, database: Option<bool>) -> Self {
        Self {
            status,
            service: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            database,
        }
    }

    pub fn alive() -> Self {
        Self::new("ok", None)
    }

    pub fn readiness(database_reachable: bool) -> (StatusCode, Self) {
        if database_reachable {
            (StatusCode::OK, Self::new("healthy", Some(true)))
        } else {
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Self::new("degraded", Some(false)),
            )
        }
    }
}

pub async fn handle_liveness() -> Json<HealthReport> {
    Json(HealthReport::alive())
}

pub async fn handle_readiness(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<HealthReport>) {
    let reachable = match state.task_store.run(|store| store.ping()).await {
        Ok(()) => true,
        Err(e) => {
            warn!("[HEALTH] Task store unreachable: {e}");
            false
        }
    };

    let (code, report) = HealthReport::readiness(reachable);
    (code, Json(report))
}

pub fn configure_health_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(handle_liveness))
        .route("/api/health", get(handle_readiness))
}
