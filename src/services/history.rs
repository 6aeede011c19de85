//! Price history service.
//!
//! Front door for bar fetches: a provider behind the [`BarProvider`]
//! seam, a TTL cache so repeated analyses of the same symbol do not
//! hammer the upstream API, and a bounded-concurrency batch fetch for
//! the multi-symbol ranking endpoints.

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use futures_util::stream::{self, StreamExt};
use tracing::debug;

use crate::error::EngineError;
use crate::sources::BarProvider;
use crate::types::Series;

/// TTL cache of fetched series keyed by uppercase symbol.
struct SeriesCache {
    entries: DashMap<String, (Series, Instant)>,
    ttl: Duration,
}

impl SeriesCache {
    fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    fn get(&self, key: &str) -> Option<Series> {
        let entry = self.entries.get(key)?;
        let (series, stored_at) = entry.value();
        if stored_at.elapsed() < self.ttl {
            Some(series.clone())
        } else {
            drop(entry);
            self.entries.remove(key);
            None
        }
    }

    fn set(&self, key: String, series: Series) {
        self.entries.insert(key, (series, Instant::now()));
    }
}

/// Cached, concurrency-bounded access to a bar provider.
pub struct HistoryService {
    provider: Arc<dyn BarProvider>,
    cache: SeriesCache,
    fetch_concurrency: usize,
    history_days: usize,
}

impl HistoryService {
    pub fn new(
        provider: Arc<dyn BarProvider>,
        cache_ttl: Duration,
        fetch_concurrency: usize,
        history_days: usize,
    ) -> Arc<Self> {
        Arc::new(Self {
            provider,
            cache: SeriesCache::new(cache_ttl),
            fetch_concurrency: fetch_concurrency.max(1),
            history_days: history_days.max(1),
        })
    }

    /// Fetch a symbol's daily history, serving from cache when fresh.
    pub async fn fetch(&self, symbol: &str) -> Result<Series, EngineError> {
        let key = symbol.trim().to_uppercase();
        if key.is_empty() {
            return Err(EngineError::InvalidInput("empty symbol".to_string()));
        }
        if let Some(series) = self.cache.get(&key) {
            debug!(symbol = %key, bars = series.len(), "history cache hit");
            return Ok(series);
        }
        let series = self.provider.fetch_history(&key, self.history_days).await?;
        debug!(symbol = %key, bars = series.len(), "fetched history");
        self.cache.set(key, series.clone());
        Ok(series)
    }

    /// Fetch many symbols with bounded concurrency.
    ///
    /// Per-symbol failures are kept alongside the successes so ranking
    /// endpoints can skip bad symbols without aborting the batch.
    pub async fn fetch_many(
        &self,
        symbols: Vec<String>,
    ) -> Vec<(String, Result<Series, EngineError>)> {
        stream::iter(symbols)
            .map(|symbol| async move {
                let result = self.fetch(&symbol).await;
                (symbol, result)
            })
            .buffer_unordered(self.fetch_concurrency)
            .collect()
            .await
    }
}
