//! Cache module for recent recipe search results
//!
//! This module provides an in-memory query cache keyed by search parameters,
//! with a fixed freshness window evaluated lazily on read. Time comes from an
//! injected clock, and an optional single-flight table lets concurrent misses
//! on the same key share one upstream fetch.

mod clock;
mod key;
mod query_cache;
mod single_flight;

pub use clock::{Clock, ManualClock, SystemClock};
pub use key::CacheKey;
pub use query_cache::{CachedData, QueryCache, FRESHNESS_WINDOW};
pub use single_flight::{Flight, FlightGuard, FlightWaiter, SingleFlight};
