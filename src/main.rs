use dotenvy::dotenv;
use log::info;

use todoserver::config::AppConfig;
use todoserver::main_module::{build_app_state, init_logging, run_axum_server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let config = AppConfig::load()?;
    info!(
        "Starting {} {} (database: {})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        config.database.url
    );

    let app_state = build_app_state(config).await?;
    run_axum_server(app_state).await
}
