use std::sync::Arc;

use indexboard_core::{BoardError, PriceFeed};
use indexboard_middleware::FeedBuilder;
use indexboard_types::CacheConfig;

use crate::YfFeed;

/// Builder type alias specialized for the Yahoo feed.
pub type YfFeedBuilder = FeedBuilder;

impl YfFeed {
    /// Returns an unconfigured builder around the default feed.
    ///
    /// Customize with the builder methods before calling `.build()`.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn builder() -> Result<YfFeedBuilder, BoardError> {
        let raw: Arc<dyn PriceFeed> = Arc::new(Self::try_new_default()?);
        Ok(FeedBuilder::new(raw))
    }

    /// Returns a builder whose downloads are memoized per `cfg`.
    ///
    /// A board refreshing every `cfg.ttl` then issues at most one provider call
    /// per ticker, interval and lookback per tick.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn cached(cfg: &CacheConfig) -> Result<YfFeedBuilder, BoardError> {
        Ok(Self::builder()?.with_cache(cfg))
    }
}
