//! Short-lived in-memory reuse of the price snapshot.
//!
//! The snapshot is identical for every set within a provider refresh
//! window, so one copy serves all requests until it expires. A zero TTL
//! turns the cache into a pass-through and every request fetches fresh.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use crate::error::Result;
use crate::models::PricesDocument;

struct Entry {
    fetched_at: Instant,
    doc: Arc<PricesDocument>,
}

/// Holds at most one price snapshot and the instant it was fetched.
pub struct PriceCache {
    ttl: Duration,
    slot: RwLock<Option<Entry>>,
}

impl PriceCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: RwLock::new(None),
        }
    }

    pub fn enabled(&self) -> bool {
        !self.ttl.is_zero()
    }

    /// Return the cached snapshot if still fresh, otherwise run `fetch` and
    /// store its result. Failed fetches are returned as-is and never stored.
    pub async fn get_or_fetch<F, Fut>(&self, fetch: F) -> Result<Arc<PricesDocument>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<PricesDocument>>,
    {
        if !self.enabled() {
            return fetch().await.map(Arc::new);
        }

        if let Some(doc) = self.fresh().await {
            log::debug!("Price snapshot served from cache");
            return Ok(doc);
        }

        let mut slot = self.slot.write().await;
        // Another request may have refreshed while we waited for the lock.
        if let Some(entry) = slot.as_ref() {
            if entry.fetched_at.elapsed() < self.ttl {
                return Ok(entry.doc.clone());
            }
        }

        let doc = Arc::new(fetch().await?);
        *slot = Some(Entry {
            fetched_at: Instant::now(),
            doc: doc.clone(),
        });
        log::info!("Price snapshot cached for {}s", self.ttl.as_secs());
        Ok(doc)
    }

    async fn fresh(&self) -> Option<Arc<PricesDocument>> {
        let slot = self.slot.read().await;
        slot.as_ref()
            .filter(|entry| entry.fetched_at.elapsed() < self.ttl)
            .map(|entry| entry.doc.clone())
    }
}
