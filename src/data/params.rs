//! Search parameters and their validation

use serde::Deserialize;
use thiserror::Error;

/// Errors for caller input that cannot be sent upstream
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Every search field was absent or blank
    #[error("Enter a search term, a cuisine, or a maximum preparation time")]
    NoCriteria,

    /// The max-ready-time field is not a positive whole number
    #[error("Max preparation time must be a positive number of minutes, got '{0}'")]
    InvalidMaxReadyTime(String),

    /// A recipe id that is not a positive integer
    #[error("Invalid recipe id: '{0}'")]
    InvalidRecipeId(String),
}

/// Parameters of one recipe search
///
/// Field names on the wire match the upstream API: `query`, `cuisine` and
/// `maxReadyTime`. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchParams {
    /// Free-text search, e.g. "pasta"
    #[serde(default)]
    pub query: Option<String>,
    /// Cuisine filter, listed or free-form
    #[serde(default)]
    pub cuisine: Option<String>,
    /// Maximum preparation time in minutes, as the caller typed it
    #[serde(default, rename = "maxReadyTime")]
    pub max_ready_time: Option<String>,
}

impl SearchParams {
    /// Builds parameters from key/value pairs in any order.
    ///
    /// Unknown keys are ignored. A repeated key keeps its last value.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "query" => &mut params.query,
                "cuisine" => &mut params.cuisine,
                "maxReadyTime" => &mut params.max_ready_time,
                _ => continue,
            };
            *slot = Some(value.into());
        }
        params
    }

    /// Checks that the parameters describe a usable search.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let has_criteria = [&self.query, &self.cuisine, &self.max_ready_time]
            .into_iter()
            .any(|field| field.as_deref().is_some_and(|s| !s.trim().is_empty()));
        if !has_criteria {
            return Err(ValidationError::NoCriteria);
        }

        if let Some(raw) = non_empty(&self.max_ready_time) {
            match raw.trim().parse::<u64>() {
                Ok(minutes) if minutes > 0 => {}
                _ => return Err(ValidationError::InvalidMaxReadyTime(raw.to_string())),
            }
        }

        Ok(())
    }

    /// Query parameters for the upstream search, omitting empty fields.
    pub fn upstream_query(&self) -> Vec<(&'static str, &str)> {
        [
            ("query", &self.query),
            ("cuisine", &self.cuisine),
            ("maxReadyTime", &self.max_ready_time),
        ]
        .into_iter()
        .filter_map(|(name, value)| non_empty(value).map(|v| (name, v)))
        .collect()
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

/// Parses a recipe id as supplied in a URL or on the command line
pub fn parse_recipe_id(raw: &str) -> Result<u64, ValidationError> {
    match raw.trim().parse::<u64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ValidationError::InvalidRecipeId(raw.to_string())),
    }
}
