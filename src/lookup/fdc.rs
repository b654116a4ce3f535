//! USDA FoodData Central client
//!
//! `GET {base}/foods/search?api_key=..&query=..&pageSize=..`, one request per
//! query and no retries.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::warn;

use super::{FoodSearchPage, FoodSource, LookupError};

pub const DEFAULT_BASE_URL: &str = "https://api.nal.usda.gov/fdc/v1";

#[derive(Clone)]
pub struct FdcClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

impl FdcClient {
    pub fn new(base_url: &str, api_key: Option<String>, timeout: Duration) -> Result<Self, LookupError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        })
    }

    fn search_url(&self) -> String {
        format!("{}/foods/search", self.base_url)
    }
}

#[async_trait]
impl FoodSource for FdcClient {
    async fn search(&self, query: &str, page_size: usize) -> Result<FoodSearchPage, LookupError> {
        let api_key = self.api_key.as_deref().ok_or(LookupError::NotConfigured)?;
        let page_size = page_size.to_string();

        let response = self
            .http
            .get(self.search_url())
            .query(&[
                ("api_key", api_key),
                ("query", query),
                ("pageSize", page_size.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("FoodData Central returned {} for '{}'", status, query);
            return Err(LookupError::UpstreamStatus(status.as_u16()));
        }

        Ok(response.json::<FoodSearchPage>().await?)
    }
}
