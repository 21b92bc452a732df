//! Recipe API client
//!
//! This module fetches search results and recipe details from a
//! Spoonacular-compatible HTTP API and parses them into our recipe types.

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

use super::{RecipeDetails, RecipeSummary, SearchParams};

/// Base URL for the Spoonacular API
pub const SPOONACULAR_BASE_URL: &str = "https://api.spoonacular.com";

/// Default timeout for a single upstream request
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors that can occur when talking to the recipe API
#[derive(Debug, Error)]
pub enum RecipeApiError {
    /// HTTP request failed before a response arrived
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("upstream returned {0}")]
    Status(StatusCode),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Search endpoint response
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<RecipeSummary>,
}

/// Client for the recipe search and detail endpoints
#[derive(Debug, Clone)]
pub struct RecipeClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RecipeClient {
    /// Create a client for the public Spoonacular API
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(SPOONACULAR_BASE_URL, api_key)
    }

    /// Create a client against a custom base URL
    ///
    /// Used for self-hosted mirrors and for pointing tests at a mock server.
    pub fn with_base_url(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self::with_client(client, base_url, api_key)
    }

    /// Create a client around an existing HTTP client
    pub fn with_client(
        client: Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// The base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Search for recipes matching `params`
    ///
    /// Sends the non-empty subset of the search fields plus the API key.
    /// Exactly one request is made; there are no retries.
    pub async fn search(&self, params: &SearchParams) -> Result<Vec<RecipeSummary>, RecipeApiError> {
        let url = format!("{}/recipes/complexSearch", self.base_url);
        let mut query = params.upstream_query();
        query.push(("apiKey", self.api_key.as_str()));

        info!(fields = ?params.upstream_query(), "searching recipes upstream");
        let text = self.get_text(&url, &query).await?;
        let response: SearchResponse = serde_json::from_str(&text)?;

        Ok(response.results)
    }

    /// Fetch the full record for one recipe
    pub async fn recipe(&self, id: u64) -> Result<RecipeDetails, RecipeApiError> {
        let url = format!("{}/recipes/{}/information", self.base_url, id);

        info!(id, "fetching recipe details upstream");
        let text = self
            .get_text(&url, &[("apiKey", self.api_key.as_str())])
            .await?;

        Ok(serde_json::from_str(&text)?)
    }

    async fn get_text(&self, url: &str, query: &[(&str, &str)]) -> Result<String, RecipeApiError> {
        let response = self.client.get(url).query(query).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, url, "recipe API returned an error status");
            return Err(RecipeApiError::Status(status));
        }

        Ok(response.text().await?)
    }
}
