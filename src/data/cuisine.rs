//! Cuisines offered by the search form
//!
//! The upstream API accepts any cuisine string, so these are suggestions for
//! the form's select box rather than a closed set.

use serde::Serialize;

/// A cuisine the search form lists by default
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Cuisine {
    Italian,
    Mexican,
    Chinese,
    Indian,
    American,
}

impl Cuisine {
    /// Returns a slice containing all listed cuisines, in form order.
    pub fn all() -> &'static [Cuisine] {
        &[
            Cuisine::Italian,
            Cuisine::Mexican,
            Cuisine::Chinese,
            Cuisine::Indian,
            Cuisine::American,
        ]
    }

    /// The value sent upstream, which is also the display label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Cuisine::Italian => "Italian",
            Cuisine::Mexican => "Mexican",
            Cuisine::Chinese => "Chinese",
            Cuisine::Indian => "Indian",
            Cuisine::American => "American",
        }
    }

    /// Parses user input into a listed Cuisine.
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace.
    /// Returns `None` for free-form cuisines that are not in the list.
    pub fn from_str(s: &str) -> Option<Cuisine> {
        match s.to_lowercase().trim() {
            "italian" => Some(Cuisine::Italian),
            "mexican" => Some(Cuisine::Mexican),
            "chinese" => Some(Cuisine::Chinese),
            "indian" => Some(Cuisine::Indian),
            "american" => Some(Cuisine::American),
            _ => None,
        }
    }
}
