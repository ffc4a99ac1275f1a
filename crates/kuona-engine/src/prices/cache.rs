//! Caching layer in front of a price provider to reduce upstream calls

use async_trait::async_trait;
use cached::{Cached, TimedCache};
use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use super::{PriceProvider, PriceSeries};
use crate::error::Result;

/// Cache key for a price window request
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PriceKey {
    /// Uppercased ticker
    pub ticker: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl PriceKey {
    pub fn new(ticker: &str, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            ticker: ticker.to_uppercase(),
            start,
            end,
        }
    }
}

/// Price provider decorator with a time-bounded cache
///
/// Only non-empty successful responses are stored; errors and empty windows
/// go back to the caller uncached.
pub struct CachedPriceProvider<P> {
    inner: P,
    cache: Arc<RwLock<TimedCache<PriceKey, PriceSeries>>>,
}

impl<P: PriceProvider> CachedPriceProvider<P> {
    /// Wrap `inner` with a cache whose entries live for `ttl`
    pub fn new(inner: P, ttl: Duration) -> Self {
        Self {
            inner,
            cache: Arc::new(RwLock::new(TimedCache::with_lifespan(ttl))),
        }
    }

    /// Get a cached series
    pub async fn get(&self, key: &PriceKey) -> Option<PriceSeries> {
        let mut cache = self.cache.write().await;
        cache.cache_get(key).cloned()
    }

    /// Get the number of cached entries
    pub async fn len(&self) -> usize {
        let cache = self.cache.read().await;
        cache.cache_size()
    }

    /// Check if the cache is empty
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl<P: PriceProvider> PriceProvider for CachedPriceProvider<P> {
    async fn fetch(&self, ticker: &str, start: NaiveDate, end: NaiveDate) -> Result<PriceSeries> {
        let key = PriceKey::new(ticker, start, end);

        if let Some(series) = self.get(&key).await {
            tracing::debug!("Cache hit for key: {:?}", key);
            return Ok(series);
        }

        tracing::debug!("Cache miss for key: {:?}", key);

        let series = self.inner.fetch(ticker, start, end).await?;

        if !series.is_empty() {
            let mut cache = self.cache.write().await;
            let _ = cache.cache_set(key, series.clone());
        }

        Ok(series)
    }
}
