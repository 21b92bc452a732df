//! Recipe Finder Library
//!
//! A recipe search front end over a third-party recipe API. Search results are
//! kept in a short-lived in-memory cache keyed by the search parameters.

pub mod cache;
pub mod cli;
pub mod config;
pub mod data;
pub mod server;
pub mod service;
