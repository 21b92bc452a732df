//! Runtime configuration for the recipe service

use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

use crate::cache::{QueryCache, SystemClock, FRESHNESS_WINDOW};
use crate::data::recipes::{DEFAULT_TIMEOUT, SPOONACULAR_BASE_URL};
use crate::data::RecipeClient;
use crate::service::RecipeService;

/// Settings shared by every command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Credential sent as the `apiKey` query parameter
    pub api_key: String,
    /// Base URL of the recipe API
    pub api_base_url: String,
    /// How long search results are served from the cache
    pub freshness: Duration,
    /// Timeout applied to each upstream request
    pub request_timeout: Duration,
    /// Whether concurrent misses on the same search share one fetch
    pub single_flight: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base_url: SPOONACULAR_BASE_URL.to_string(),
            freshness: FRESHNESS_WINDOW,
            request_timeout: DEFAULT_TIMEOUT,
            single_flight: true,
        }
    }
}

impl Config {
    /// Builds the HTTP client, cache and service this configuration describes
    pub fn build_service(&self) -> Result<RecipeService, reqwest::Error> {
        if self.api_key.is_empty() {
            warn!("no API key configured; upstream requests will likely be rejected");
        }

        let http = reqwest::Client::builder()
            .timeout(self.request_timeout)
            .build()?;
        let client = RecipeClient::with_client(http, &self.api_base_url, &self.api_key);
        let cache = QueryCache::with_clock(Arc::new(SystemClock)).with_freshness(self.freshness);

        Ok(RecipeService::with_cache(client, cache).single_flight(self.single_flight))
    }
}
