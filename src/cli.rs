//! Command-line interface parsing for Recipe Finder
//!
//! This module handles parsing of CLI arguments using clap: the `serve`,
//! `search` and `show` subcommands plus the global upstream and cache settings.

use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

use crate::config::Config;
use crate::data::{Cuisine, SearchParams};

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The freshness window must be at least one millisecond
    #[error("Invalid freshness window: '{0}'. Must be greater than 0 ms")]
    InvalidFreshness(u64),

    /// The upstream timeout must be at least one second
    #[error("Invalid timeout: '{0}'. Must be greater than 0 seconds")]
    InvalidTimeout(u64),
}

/// Recipe Finder - search recipes through a caching front end
#[derive(Parser, Debug)]
#[command(name = "recipefinder")]
#[command(about = "Recipe search with a short-lived response cache")]
#[command(version)]
pub struct Cli {
    /// What to run; defaults to `serve`
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Recipe API credential
    #[arg(long, env = "API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Base URL of the recipe API
    #[arg(long, value_name = "URL", default_value = "https://api.spoonacular.com", global = true)]
    pub api_base_url: String,

    /// How long search results are served from the cache, in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 60_000, global = true)]
    pub freshness_ms: u64,

    /// Timeout for each upstream request, in seconds
    #[arg(long, value_name = "SECS", default_value_t = 10, global = true)]
    pub timeout_secs: u64,

    /// Let concurrent misses on the same search each fetch upstream
    #[arg(long, global = true)]
    pub no_single_flight: bool,
}

/// Subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the JSON HTTP server
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:3000")]
        bind: SocketAddr,
    },
    /// Run one search and print the results
    Search {
        /// Free-text search, e.g. "pasta"
        #[arg(long)]
        query: Option<String>,
        /// Cuisine, e.g. Italian, Mexican, Chinese, Indian, American
        #[arg(long)]
        cuisine: Option<String>,
        /// Maximum preparation time in minutes
        #[arg(long, value_name = "MINUTES")]
        max_ready_time: Option<String>,
    },
    /// Print the details of one recipe
    Show {
        /// Recipe id as shown in search results
        id: String,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Serve {
            bind: SocketAddr::from(([127, 0, 0, 1], 3000)),
        }
    }
}

impl Command {
    /// Search parameters for `search`, or `None` for other commands
    ///
    /// A listed cuisine typed in any case is sent with its form label;
    /// free-form cuisines pass through unchanged.
    pub fn search_params(&self) -> Option<SearchParams> {
        match self {
            Command::Search {
                query,
                cuisine,
                max_ready_time,
            } => Some(SearchParams {
                query: query.clone(),
                cuisine: cuisine.as_deref().map(|raw| match Cuisine::from_str(raw) {
                    Some(listed) => listed.as_str().to_string(),
                    None => raw.to_string(),
                }),
                max_ready_time: max_ready_time.clone(),
            }),
            _ => None,
        }
    }
}

impl Config {
    /// Creates a Config from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(Config)` with the settings applied
    /// * `Err(CliError)` if a duration argument is zero
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        if cli.freshness_ms == 0 {
            return Err(CliError::InvalidFreshness(cli.freshness_ms));
        }
        if cli.timeout_secs == 0 {
            return Err(CliError::InvalidTimeout(cli.timeout_secs));
        }

        Ok(Config {
            api_key: cli.api_key.clone().unwrap_or_default(),
            api_base_url: cli.api_base_url.clone(),
            freshness: Duration::from_millis(cli.freshness_ms),
            request_timeout: Duration::from_secs(cli.timeout_secs),
            single_flight: !cli.no_single_flight,
        })
    }
}
