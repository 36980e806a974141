//! Indexboard-specific data transfer objects and configuration primitives.
#![warn(missing_docs)]

mod config;
mod error;
mod market;
mod request;

pub use config::{BoardConfig, CacheConfig, FetchStrategy, Layout};
pub use error::BoardError;
pub use market::{MarketConfig, world_indices};
pub use request::{Interval, Lookback};
