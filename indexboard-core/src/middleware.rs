//! Middleware trait for wrapping `PriceFeed` implementations.

use std::sync::Arc;

use crate::connector::PriceFeed;

/// Trait implemented by feed middleware layers.
///
/// A middleware consumes an inner `PriceFeed` and returns a wrapped feed that
/// augments its behavior (e.g., memoization).
pub trait FeedMiddleware: Send + Sync {
    /// Apply this middleware to wrap an inner feed and return the wrapped feed.
    fn apply(self: Box<Self>, inner: Arc<dyn PriceFeed>) -> Arc<dyn PriceFeed>;

    /// Human-readable middleware name for introspection/logging.
    fn name(&self) -> &'static str;

    /// Opaque configuration snapshot for serialization/inspection.
    fn config_json(&self) -> serde_json::Value;
}
