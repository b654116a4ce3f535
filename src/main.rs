//! LeanLog
//!
//! MCP server for food lookup, food logging and body composition.

use std::sync::Arc;

use leanlog::config::Config;
use leanlog::lookup::{FdcClient, FoodSource};
use leanlog::mcp::LeanlogService;
use leanlog::{build_info, db};
use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Output to stderr to not interfere with MCP stdio
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("leanlog=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner("MCP stdio");

    let config = Config::load();
    eprintln!("Database path: {}", config.database_path.display());

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let database = db::open(&config.database_path)?;

    let source: Arc<dyn FoodSource> = Arc::new(FdcClient::new(
        &config.fdc_base_url,
        config.fdc_api_key.clone(),
        config.fdc_timeout,
    )?);

    let service = LeanlogService::new(config.database_path.clone(), database, source);

    let server = service.serve((stdin(), stdout())).await?;
    server.waiting().await?;

    Ok(())
}
