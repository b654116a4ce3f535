//! Interactive food search
//!
//! Each stdin line is the current contents of the search box. Lines are
//! debounced; only the latest query's results are printed.

use std::sync::Arc;

use leanlog::config::Config;
use leanlog::lookup::{FdcClient, FoodSource, NutritionSearchResponse, SearchDebouncer};
use leanlog::nutrition::format_amount;
use tokio::io::{stdin, AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

fn print_results(response: &NutritionSearchResponse) {
    if response.results.is_empty() {
        println!("-- no results for '{}'", response.query);
        return;
    }

    println!(
        "-- '{}': {} of {} matches (per 100 g)",
        response.query,
        response.results.len(),
        response.total_hits
    );
    for result in &response.results {
        let brand = result
            .brand_name
            .as_deref()
            .map(|b| format!(" [{}]", b))
            .unwrap_or_default();
        println!(
            "{:>8}  {}{}  {} kcal  P {}g  C {}g  F {}g",
            result.fdc_id,
            result.name,
            brand,
            format_amount(result.calories),
            format_amount(result.protein),
            format_amount(result.carbs),
            format_amount(result.fat),
        );
        let servings: Vec<String> = result
            .serving_options
            .iter()
            .map(|o| format!("{} ({}g)", o.label, format_amount(o.grams)))
            .collect();
        println!("          servings: {}", servings.join(", "));
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("leanlog=warn".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load();
    let source: Arc<dyn FoodSource> = Arc::new(FdcClient::new(
        &config.fdc_base_url,
        config.fdc_api_key.clone(),
        config.fdc_timeout,
    )?);
    let debouncer = Arc::new(SearchDebouncer::new(source, config.debounce));

    let mut lines = BufReader::new(stdin()).lines();
    let mut latest = None;

    while let Some(line) = lines.next_line().await? {
        let debouncer = Arc::clone(&debouncer);
        latest = Some(tokio::spawn(async move {
            if let Some(response) = debouncer.submit(&line).await {
                print_results(&response);
            }
        }));
    }

    if let Some(handle) = latest {
        handle.await?;
    }

    Ok(())
}
