//! indexboard-core
//!
//! Core types, traits, and utilities shared across the indexboard workspace.
//!
//! - `types`: re-exported DTOs plus price tables, series, sessions and view records.
//! - `connector`: the `PriceFeed`, `CalendarProvider` and `TradingCalendar` traits.
//! - `middleware`: the trait implemented by feed wrappers.
//! - `clock`: injectable sources of "now".
//! - `timeseries`: helpers that turn provider tables into board series.
#![warn(missing_docs)]

/// Injectable wall clocks.
pub mod clock;
/// Provider traits for price feeds and trading calendars.
pub mod connector;
/// Middleware trait implemented by feed wrappers.
pub mod middleware;
/// Helpers for day filtering and flat series synthesis.
pub mod timeseries;
pub mod types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use connector::{CalendarProvider, PriceFeed, TradingCalendar};
pub use middleware::FeedMiddleware;
pub use timeseries::synth::flat_minute_series;
pub use timeseries::today::points_on_day;
pub use types::*;
