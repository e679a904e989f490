//! HTTP server initialization and routing

use anyhow::{Context, Result};
use axum::Router;
use log::info;
use std::sync::Arc;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::shared::state::AppState;

use super::{configure_health_routes, shutdown_signal};

pub fn build_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .merge(configure_health_routes())
        .merge(crate::tasks::configure())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(app_state)
}

pub async fn run_axum_server(app_state: Arc<AppState>) -> Result<()> {
    let addr = app_state.config.bind_addr();
    let app = build_router(Arc::clone(&app_state));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Task server listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Server stopped");
    Ok(())
}
