//! Builder for composing price feeds with middleware layers.
//!
//! Layers form an onion around the raw feed. The `layers` vector stores them
//! outermost-first (last added = outermost) and `build()` applies them in
//! reverse:
//!
//! ```text
//! builder.with_cache(..).layer(custom)
//!
//! Storage: [Custom, Cache]
//! Applied:  Raw -> Cache -> Custom
//! Result:   Custom(Cache(Raw))
//! ```

use std::sync::Arc;
use std::time::Duration;

use indexboard_core::{FeedMiddleware, PriceFeed};
use indexboard_types::CacheConfig;
use serde_json::{Value, json};

use crate::cache::CacheMiddleware;

const CACHE_LAYER: &str = "CachingFeed";

/// Generic middleware builder for composing a feed with layered wrappers.
pub struct FeedBuilder {
    raw: Arc<dyn PriceFeed>,
    /// Middleware layers in outermost-first order.
    layers: Vec<Box<dyn FeedMiddleware>>,
}

impl FeedBuilder {
    /// Create a new builder from a raw, unwrapped feed.
    #[must_use]
    pub fn new(raw: Arc<dyn PriceFeed>) -> Self {
        Self {
            raw,
            layers: Vec::new(),
        }
    }

    /// Add or replace the download cache.
    ///
    /// The cache goes at the outermost position so hits never reach inner layers.
    #[must_use]
    pub fn with_cache(mut self, cfg: &CacheConfig) -> Self {
        self.layers.retain(|m| m.name() != CACHE_LAYER);
        self.layers
            .insert(0, Box::new(CacheMiddleware::new(cfg.clone())));
        self
    }

    /// Shortcut: cache with `ttl` and the default capacity.
    #[must_use]
    pub fn cache_ttl(self, ttl: Duration) -> Self {
        let cfg = CacheConfig {
            ttl,
            ..CacheConfig::default()
        };
        self.with_cache(&cfg)
    }

    /// Remove the cache if present.
    #[must_use]
    pub fn without_cache(mut self) -> Self {
        self.layers.retain(|m| m.name() != CACHE_LAYER);
        self
    }

    /// Add an arbitrary middleware layer at the outermost position.
    #[must_use]
    pub fn layer(mut self, layer: Box<dyn FeedMiddleware>) -> Self {
        self.layers.insert(0, layer);
        self
    }

    /// Names of the configured layers, outermost first.
    #[must_use]
    pub fn layer_names(&self) -> Vec<&'static str> {
        self.layers.iter().map(|l| l.name()).collect()
    }

    /// Export the stack as JSON for inspection.
    ///
    /// Layers are listed outermost first; the raw feed is appended as the
    /// innermost entry.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut layers: Vec<Value> = self
            .layers
            .iter()
            .map(|l| json!({ "name": l.name(), "config": l.config_json() }))
            .collect();
        layers.push(json!({
            "name": "RawFeed",
            "config": { "name": self.raw.name(), "vendor": self.raw.vendor() },
        }));
        json!({ "layers": layers })
    }

    /// Build the wrapped feed, applying layers innermost first.
    #[must_use]
    pub fn build(self) -> Arc<dyn PriceFeed> {
        let mut acc: Arc<dyn PriceFeed> = Arc::clone(&self.raw);
        for m in self.layers.into_iter().rev() {
            acc = m.apply(acc);
        }
        acc
    }
}
