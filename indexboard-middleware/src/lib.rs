//! indexboard-middleware
//!
//! Wrappers around `PriceFeed` implementations and a builder that composes them.
#![warn(missing_docs)]

mod builder;
mod cache;

pub use crate::builder::FeedBuilder;
pub use crate::cache::{CacheMiddleware, CachingFeed};
