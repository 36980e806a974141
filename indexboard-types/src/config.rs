//! Configuration types shared by the board orchestrator and the feed middleware.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::market::{MarketConfig, world_indices};
use crate::request::Interval;

/// How markets are resolved within one refresh tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum FetchStrategy {
    /// Resolve markets one after the other.
    #[default]
    Sequential,
    /// Resolve all markets concurrently; output order still follows the configuration.
    Concurrent,
}

/// How a snapshot arranges its records into sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Layout {
    /// An "Open Markets" section followed by a "Closed Markets" section.
    #[default]
    Grouped,
    /// A single row with every market.
    Flat,
}

/// Time-boxed memoization of provider downloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// How long a successful download stays valid.
    pub ttl: Duration,
    /// Upper bound on the number of cached downloads.
    pub max_entries: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
            max_entries: 256,
        }
    }
}

/// Global configuration for the `Board` orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Period between refresh ticks; also the default cache TTL.
    pub refresh_every: Duration,
    /// Half-width, in days, of the schedule window queried around "now".
    pub schedule_window_days: u32,
    /// Intraday granularities tried, finest first, before falling back to daily data.
    pub intraday_cascade: Vec<Interval>,
    /// Section arrangement of snapshots.
    pub layout: Layout,
    /// Sequential or concurrent resolution of markets.
    pub fetch_strategy: FetchStrategy,
    /// Markets shown on the board, in display order.
    pub markets: Vec<MarketConfig>,
}

impl BoardConfig {
    /// Cache settings derived from the refresh period.
    #[must_use]
    pub fn cache(&self) -> CacheConfig {
        CacheConfig {
            ttl: self.refresh_every,
            ..CacheConfig::default()
        }
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            refresh_every: Duration::from_secs(60),
            schedule_window_days: 1,
            intraday_cascade: vec![Interval::OneMinute, Interval::FiveMinutes],
            layout: Layout::Grouped,
            fetch_strategy: FetchStrategy::Sequential,
            markets: world_indices(),
        }
    }
}
