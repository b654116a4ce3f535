//! Nutrition lookup
//!
//! Queries the upstream food database through a `FoodSource` and shapes each
//! hit with the normalizer.

pub mod debounce;
pub mod fdc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::models::{FoodRecord, NutritionResult};
use crate::nutrition::normalize;

pub use debounce::SearchDebouncer;
pub use fdc::FdcClient;

/// Rows requested from the upstream per query
pub const UPSTREAM_PAGE_SIZE: usize = 15;
/// Results returned to callers per query
pub const MAX_RESULTS: usize = 10;

/// Lookup failures. All of them surface to users as a generic message.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Nutrition service is not configured")]
    NotConfigured,

    #[error("Upstream returned status {0}")]
    UpstreamStatus(u16),

    #[error("Upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// One page of upstream hits
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodSearchPage {
    #[serde(default)]
    pub foods: Vec<FoodRecord>,
    #[serde(default)]
    pub total_hits: u64,
}

/// Anything that can answer a free-text food query
#[async_trait]
pub trait FoodSource: Send + Sync {
    async fn search(&self, query: &str, page_size: usize) -> Result<FoodSearchPage, LookupError>;
}

/// Lookup response body
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionSearchResponse {
    pub query: String,
    pub results: Vec<NutritionResult>,
    pub total_hits: u64,
}

impl NutritionSearchResponse {
    pub fn empty(query: &str) -> Self {
        Self {
            query: query.to_string(),
            results: Vec::new(),
            total_hits: 0,
        }
    }
}

/// Run one lookup and normalize the first `MAX_RESULTS` hits
pub async fn search_foods<S>(source: &S, query: &str) -> Result<NutritionSearchResponse, LookupError>
where
    S: FoodSource + ?Sized,
{
    let query = query.trim();
    let page = source.search(query, UPSTREAM_PAGE_SIZE).await?;

    let results: Vec<NutritionResult> = page
        .foods
        .iter()
        .take(MAX_RESULTS)
        .map(normalize)
        .collect();

    info!(
        "Food search '{}': {} results of {} hits",
        query,
        results.len(),
        page.total_hits
    );

    Ok(NutritionSearchResponse {
        query: query.to_string(),
        results,
        total_hits: page.total_hits,
    })
}


#[cfg(test)]
mod tests {
    use super::testing::{apple, StaticFoodSource};
    use super::*;

    #[tokio::test]
    async fn test_search_caps_results_and_keeps_total() {
        let foods = (0..20).map(|i| apple(i, &format!("Apple {}", i))).collect();
        let source = StaticFoodSource::new(foods);

        let response = search_foods(&source, "  apple ").await.unwrap();
        assert_eq!(response.query, "apple");
        assert_eq!(response.results.len(), MAX_RESULTS);
        assert_eq!(response.total_hits, 20);
        assert_eq!(response.results[0].calories, 52.0);
        assert!(response.results[0].option("1 cup").is_some());
    }

    #[tokio::test]
    async fn test_search_propagates_upstream_failure() {
        let source = StaticFoodSource::failing(503);
        let err = search_foods(&source, "apple").await.unwrap_err();
        assert!(matches!(err, LookupError::UpstreamStatus(503)));
    }

    #[test]
    fn test_response_serializes_total_hits() {
        let value = serde_json::to_value(NutritionSearchResponse::empty("kale")).unwrap();
        assert_eq!(value["query"], "kale");
        assert_eq!(value["totalHits"], 0);
        assert!(value["results"].as_array().unwrap().is_empty());
    }
}
