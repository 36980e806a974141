use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use indexboard_core::{
    BoardError, FeedMiddleware, Interval, Lookback, PriceFeed, PriceTable,
};
use indexboard_types::CacheConfig;
use moka::future::Cache;
use serde_json::json;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct DownloadKey {
    ticker: String,
    interval: Interval,
    lookback: Lookback,
}

/// Feed wrapper that memoizes successful downloads for a fixed time-to-live.
///
/// Entries are keyed by `(ticker, interval, lookback)`. Errors are never cached,
/// so a failed step is retried on the next call. A zero TTL or zero capacity
/// turns the wrapper into a pass-through.
pub struct CachingFeed {
    inner: Arc<dyn PriceFeed>,
    cache: Option<Cache<DownloadKey, Arc<PriceTable>>>,
    cfg: CacheConfig,
}

impl CachingFeed {
    /// Wrap `inner` with a cache configured by `cfg`.
    #[must_use]
    pub fn new(inner: Arc<dyn PriceFeed>, cfg: &CacheConfig) -> Self {
        let cache = (cfg.ttl > Duration::ZERO && cfg.max_entries > 0).then(|| {
            Cache::builder()
                .max_capacity(cfg.max_entries)
                .time_to_live(cfg.ttl)
                .build()
        });
        Self {
            inner,
            cache,
            cfg: cfg.clone(),
        }
    }

    /// Effective configuration.
    #[must_use]
    pub const fn config(&self) -> &CacheConfig {
        &self.cfg
    }

    /// Drop every cached download.
    pub fn invalidate_all(&self) {
        if let Some(cache) = &self.cache {
            cache.invalidate_all();
        }
    }
}

#[async_trait]
impl PriceFeed for CachingFeed {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn vendor(&self) -> &'static str {
        self.inner.vendor()
    }

    async fn download(
        &self,
        ticker: &str,
        interval: Interval,
        lookback: Lookback,
    ) -> Result<PriceTable, BoardError> {
        let Some(cache) = &self.cache else {
            return self.inner.download(ticker, interval, lookback).await;
        };
        let key = DownloadKey {
            ticker: ticker.to_string(),
            interval,
            lookback,
        };
        if let Some(hit) = cache.get(&key).await {
            #[cfg(feature = "tracing")]
            tracing::trace!(target: "indexboard::cache", ticker, %interval, %lookback, "cache hit");
            return Ok(hit.as_ref().clone());
        }
        let table = self.inner.download(ticker, interval, lookback).await?;
        cache.insert(key, Arc::new(table.clone())).await;
        Ok(table)
    }

    fn supported_intervals(&self) -> &'static [Interval] {
        self.inner.supported_intervals()
    }
}

/// Middleware descriptor that wraps a feed in a [`CachingFeed`].
pub struct CacheMiddleware {
    cfg: CacheConfig,
}

impl CacheMiddleware {
    /// Middleware applying `cfg`.
    #[must_use]
    pub const fn new(cfg: CacheConfig) -> Self {
        Self { cfg }
    }
}

impl FeedMiddleware for CacheMiddleware {
    fn apply(self: Box<Self>, inner: Arc<dyn PriceFeed>) -> Arc<dyn PriceFeed> {
        Arc::new(CachingFeed::new(inner, &self.cfg))
    }

    fn name(&self) -> &'static str {
        "CachingFeed"
    }

    fn config_json(&self) -> serde_json::Value {
        json!({
            "ttl_ms": u64::try_from(self.cfg.ttl.as_millis()).unwrap_or(u64::MAX),
            "max_entries": self.cfg.max_entries,
        })
    }
}
