//! Cache-backed recipe fetching
//!
//! `RecipeService` is what request handlers call. A search is answered from
//! the query cache while it is fresh; otherwise exactly one upstream request
//! is made and a successful result list is written back. Failed fetches never
//! touch the cache. Recipe details are always fetched upstream.

use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::cache::{CacheKey, Clock, Flight, QueryCache, SingleFlight, SystemClock};
use crate::data::{
    parse_recipe_id, RecipeApiError, RecipeClient, RecipeDetails, RecipeSummary, SearchParams,
    ValidationError,
};

/// Errors surfaced to the rendering layer
#[derive(Debug, Error)]
pub enum FetchError {
    /// The caller's input was rejected before any upstream call
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// The search request failed or returned an unusable body
    #[error("Failed to fetch recipes: {0}")]
    Search(#[source] RecipeApiError),

    /// The detail request failed or returned an unusable body
    #[error("Failed to fetch recipe: {0}")]
    Details(#[source] RecipeApiError),
}

impl FetchError {
    /// Whether the failure came from the upstream API rather than the caller
    pub fn is_upstream(&self) -> bool {
        matches!(self, FetchError::Search(_) | FetchError::Details(_))
    }
}

/// What the results page renders: a list or an error, never both
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SearchOutcome {
    Results { results: Vec<RecipeSummary> },
    Error { error: String },
}

/// What the detail page renders: a recipe or an error, never both
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RecipeOutcome {
    Recipe { recipe: RecipeDetails },
    Error { error: String },
}

impl From<Result<Vec<RecipeSummary>, FetchError>> for SearchOutcome {
    fn from(result: Result<Vec<RecipeSummary>, FetchError>) -> Self {
        match result {
            Ok(results) => SearchOutcome::Results { results },
            Err(e) => SearchOutcome::Error {
                error: e.to_string(),
            },
        }
    }
}

impl From<Result<RecipeDetails, FetchError>> for RecipeOutcome {
    fn from(result: Result<RecipeDetails, FetchError>) -> Self {
        match result {
            Ok(recipe) => RecipeOutcome::Recipe { recipe },
            Err(e) => RecipeOutcome::Error {
                error: e.to_string(),
            },
        }
    }
}

/// Fetch orchestrator shared by every request handler
#[derive(Debug)]
pub struct RecipeService {
    client: RecipeClient,
    cache: QueryCache<RecipeSummary>,
    flights: Option<SingleFlight>,
}

impl RecipeService {
    /// Creates a service with the system clock, default freshness and single-flight on
    pub fn new(client: RecipeClient) -> Self {
        Self::with_cache(client, QueryCache::with_clock(Arc::new(SystemClock)))
    }

    /// Creates a service around an explicitly built cache
    pub fn with_cache(client: RecipeClient, cache: QueryCache<RecipeSummary>) -> Self {
        Self {
            client,
            cache,
            flights: Some(SingleFlight::new()),
        }
    }

    /// Creates a service whose cache reads time from `clock`
    pub fn with_clock(client: RecipeClient, clock: Arc<dyn Clock>, freshness: Duration) -> Self {
        Self::with_cache(client, QueryCache::with_clock(clock).with_freshness(freshness))
    }

    /// Turns per-key de-duplication of concurrent misses on or off
    pub fn single_flight(mut self, enabled: bool) -> Self {
        self.flights = enabled.then(SingleFlight::new);
        self
    }

    /// The underlying query cache
    pub fn cache(&self) -> &QueryCache<RecipeSummary> {
        &self.cache
    }

    /// Search for recipes, serving fresh cached results when available
    pub async fn search(&self, params: &SearchParams) -> Result<Vec<RecipeSummary>, FetchError> {
        params.validate()?;
        let key = CacheKey::from(params);

        if let Some(cached) = self.cache.get(&key) {
            debug!(key = %key, cached_at = %cached.cached_at, "recipe search cache hit");
            return Ok(cached.data);
        }
        debug!(key = %key, "recipe search cache miss");

        let Some(flights) = &self.flights else {
            return self.fetch_and_store(key, params).await;
        };

        match flights.join(&key) {
            Flight::Leader(_guard) => self.fetch_and_store(key, params).await,
            Flight::Follower(waiter) => {
                waiter.wait().await;
                if let Some(cached) = self.cache.get(&key) {
                    debug!(key = %key, "recipe search served by in-flight fetch");
                    return Ok(cached.data);
                }
                // The leader failed; try once on our own.
                self.fetch_and_store(key, params).await
            }
        }
    }

    /// Fetch the detail record for a recipe id given as text
    pub async fn recipe(&self, raw_id: &str) -> Result<RecipeDetails, FetchError> {
        let id = parse_recipe_id(raw_id)?;
        self.client.recipe(id).await.map_err(|e| {
            warn!(id, error = %e, "recipe detail fetch failed");
            FetchError::Details(e)
        })
    }

    async fn fetch_and_store(
        &self,
        key: CacheKey,
        params: &SearchParams,
    ) -> Result<Vec<RecipeSummary>, FetchError> {
        match self.client.search(params).await {
            Ok(results) => {
                self.cache.put(key, results.clone());
                Ok(results)
            }
            Err(e) => {
                warn!(key = %key, error = %e, "recipe search failed");
                Err(FetchError::Search(e))
            }
        }
    }
}
