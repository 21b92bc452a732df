//! Core data models for Recipe Finder
//!
//! This module contains the recipe records returned by the upstream API, the
//! search parameters a caller supplies, and the client that talks to the API.

pub mod cuisine;
pub mod params;
pub mod recipes;

pub use cuisine::Cuisine;
pub use params::{parse_recipe_id, SearchParams, ValidationError};
pub use recipes::{RecipeApiError, RecipeClient};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One entry of a search result list
///
/// Only `id` is required. A missing title or image stays missing, and every
/// other field the API sends is kept in `extra` and written back out unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeSummary {
    /// Upstream recipe identifier
    pub id: u64,
    /// Recipe title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Image URL, if the API supplied one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Remaining upstream fields, passed through as-is
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RecipeSummary {
    /// Creates a summary with no image and no extra fields
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: Some(title.into()),
            image: None,
            extra: Map::new(),
        }
    }
}

/// Full recipe record for the detail view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDetails {
    pub id: u64,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Total preparation time in minutes
    pub ready_in_minutes: u32,
    pub servings: u32,
    /// Ingredients in the order the recipe lists them
    #[serde(default)]
    pub extended_ingredients: Vec<Ingredient>,
}

/// A single ingredient line of a recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    #[serde(default)]
    pub id: Option<u64>,
    /// The ingredient line as written, e.g. "2 cups flour"
    pub original: String,
}

impl RecipeDetails {
    /// Ingredient lines in recipe order
    pub fn ingredients(&self) -> Vec<&str> {
        self.extended_ingredients
            .iter()
            .map(|i| i.original.as_str())
            .collect()
    }
}
