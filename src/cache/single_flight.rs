//! Per-key de-duplication of concurrent upstream fetches
//!
//! The first caller to miss on a key becomes the leader and performs the
//! fetch. Callers that miss on the same key while the leader is running get a
//! receiver that resolves once the leader finishes, after which they re-read
//! the cache instead of fetching again.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use tokio::sync::watch;

use super::key::CacheKey;

/// Table of in-flight fetches keyed by search
#[derive(Debug, Default)]
pub struct SingleFlight {
    calls: Mutex<HashMap<CacheKey, watch::Receiver<()>>>,
}

/// Role assigned to a caller by [`SingleFlight::join`]
#[derive(Debug)]
pub enum Flight<'a> {
    /// This caller performs the fetch; dropping the guard releases waiters
    Leader(FlightGuard<'a>),
    /// Another caller is fetching; wait on this before re-reading the cache
    Follower(FlightWaiter),
}

/// Held by the leader for the duration of its fetch
#[derive(Debug)]
pub struct FlightGuard<'a> {
    owner: &'a SingleFlight,
    key: CacheKey,
    // Never sent on; dropping it wakes every follower.
    _done: watch::Sender<()>,
}

/// Handed to followers of an in-flight fetch
#[derive(Debug)]
pub struct FlightWaiter {
    done: watch::Receiver<()>,
}

impl SingleFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the slot for `key`, or joins the fetch already holding it
    pub fn join(&self, key: &CacheKey) -> Flight<'_> {
        let mut calls = self.calls.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(done) = calls.get(key) {
            return Flight::Follower(FlightWaiter { done: done.clone() });
        }

        let (tx, rx) = watch::channel(());
        calls.insert(key.clone(), rx);
        Flight::Leader(FlightGuard {
            owner: self,
            key: key.clone(),
            _done: tx,
        })
    }

    /// Number of keys currently being fetched
    pub fn in_flight(&self) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        // The slot is removed before `_done` is dropped, so a late joiner
        // either sees no slot or a sender that is still alive.
        self.owner
            .calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.key);
    }
}

impl FlightWaiter {
    /// Resolves once the leader's guard has been dropped
    pub async fn wait(mut self) {
        // `changed` only errors once the sender is gone, which is the signal.
        while self.done.changed().await.is_ok() {}
    }
}
