//! LeanLog HTTP API server

use std::sync::Arc;

use leanlog::config::Config;
use leanlog::http::{self, AppState};
use leanlog::lookup::{FdcClient, FoodSource};
use leanlog::tools::status::StatusTracker;
use leanlog::{build_info, db};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("leanlog=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner("HTTP");

    let config = Config::load();
    info!("Database path: {}", config.database_path.display());

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let database = db::open(&config.database_path)?;

    let source: Arc<dyn FoodSource> = Arc::new(FdcClient::new(
        &config.fdc_base_url,
        config.fdc_api_key.clone(),
        config.fdc_timeout,
    )?);

    let state = AppState::new(source, database, StatusTracker::new(config.database_path.clone()));
    http::serve(state, config.port).await?;

    Ok(())
}
