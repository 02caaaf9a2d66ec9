//! # Profile Lookup
//!
//! Search box behaviour: an exact-match lookup per query, at most one result.
//!
//! Each query bumps a generation counter. A response that comes back after a
//! newer query (or a clear) has been issued is discarded, so a slow lookup for
//! an old query can't overwrite the results for the current one.

use super::events::{EventSink, FeedEvent};
use crate::core::error::Result;
use crate::core::service::FeedApi;
use parking_lot::RwLock;
use shared::dto::profile::Profile;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Clone)]
pub struct ProfileLookup {
    api: Arc<dyn FeedApi>,
    query: Arc<RwLock<String>>,
    results: Arc<RwLock<Vec<Profile>>>,
    generation: Arc<AtomicU64>,
    events: EventSink,
}

impl ProfileLookup {
    pub fn new(api: Arc<dyn FeedApi>, events: EventSink) -> Self {
        Self {
            api,
            query: Arc::new(RwLock::new(String::new())),
            results: Arc::new(RwLock::new(Vec::new())),
            generation: Arc::new(AtomicU64::new(0)),
            events,
        }
    }

    pub fn query(&self) -> String {
        self.query.read().clone()
    }

    pub fn results(&self) -> Vec<Profile> {
        self.results.read().clone()
    }

    /// Run a lookup for `query`.
    ///
    /// An empty query clears the results without touching the network. A
    /// network failure leaves the previous results in place and is returned.
    pub async fn search(&self, query: &str) -> Result<()> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        *self.query.write() = query.to_string();

        if query.is_empty() {
            self.set_results(Vec::new());
            return Ok(());
        }

        let found = self.api.get_profile(query).await.map_err(|e| {
            warn!(error = %e, query = %query, "Profile lookup failed");
            e
        })?;

        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(query = %query, "Discarding stale profile lookup");
            return Ok(());
        }

        self.set_results(found.into_iter().collect());
        Ok(())
    }

    fn set_results(&self, results: Vec<Profile>) {
        *self.results.write() = results.clone();
        self.events.emit(FeedEvent::SearchResults(results));
    }
}
