//! Memoization of catalog query results

use crate::error::CatalogResult;
use crate::traits::{Catalog, CatalogQuery, QueryOutcome};
use romtag_core::{cache_key, ItemId, KeyValueStore};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Hit/miss counters of a [`QueryCache`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Catalog query results keyed by a hash of (query, subject)
///
/// Only positive results are stored. "Not recognized" answers and provider
/// failures go back to the caller uncached, so they are asked again next time.
pub struct QueryCache {
    catalog: Arc<dyn Catalog>,
    store: Box<dyn KeyValueStore>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl QueryCache {
    pub fn new(catalog: Arc<dyn Catalog>, store: Box<dyn KeyValueStore>) -> Self {
        Self {
            catalog,
            store,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Answer `query` for `subject`, from the cache when possible
    pub async fn lookup(&self, query: &CatalogQuery, subject: &ItemId) -> CatalogResult<QueryOutcome> {
        let key = cache_key(&query.cache_text(), subject.as_str());

        if let Some(value) = self.store.get(&key)? {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(QueryOutcome::Found(value));
        }
        self.misses.fetch_add(1, Ordering::Relaxed);

        let outcome = self.catalog.query(query, subject).await?;
        if let QueryOutcome::Found(value) = &outcome {
            self.store.put(&key, value)?;
        }
        Ok(outcome)
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
#[path = "cache_test.rs"]
mod tests;
