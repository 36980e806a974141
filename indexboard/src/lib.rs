//! indexboard
//!
//! Core of a world equity index dashboard: for every configured market it
//! resolves today's price series and whether the exchange is trading, then
//! hands the result to a presentation layer as plain view records.
//!
//! Overview
//! - `SeriesResolver` walks a granularity cascade (1m, then 5m intraday bars for
//!   today; then a flat line from today's daily close; then a flat line from the
//!   last close of the past five days; then nothing).
//! - `SessionStatusResolver` asks a trading calendar for the sessions around
//!   "now" and reports `Open`, `Closed` or `Unknown`.
//! - `Board` runs both for each market on every refresh tick and produces a
//!   `BoardSnapshot`, grouped by status or laid out flat.
//!
//! Key behaviors and trade-offs
//! - Both resolvers are total: provider and calendar failures are logged (with the
//!   `tracing` feature) and absorbed into the empty series, `Closed` or `Unknown`.
//! - "Today" and "now" come from an injected `Clock` and are read on every call,
//!   so a long-running board rolls over at midnight UTC.
//! - Intraday rows are assigned to a day in the provider's exchange timezone but
//!   compared against today's UTC date. Near midnight UTC an Asian market may show
//!   an empty or partial day; this mirrors how the board has always behaved.
//! - Degraded series are synthetic: a constant value at one-minute spacing from
//!   00:00 UTC to now. `PriceSeries::source()` tells them apart from real bars.
//! - Markets are resolved sequentially by default. `FetchStrategy::Concurrent`
//!   fans out with `join_all` and keeps configuration order in the output.
//!
//! Quickstart
//! ```rust,ignore
//! use std::sync::Arc;
//! use indexboard::Board;
//! use indexboard_yfinance::YfFeed;
//!
//! let board = Board::builder()
//!     .with_feed(Arc::new(YfFeed::try_new_default()?))
//!     .cache_downloads(true)
//!     .build()?;
//!
//! let snapshot = board.refresh().await;
//! for section in snapshot.groups() {
//!     for record in section.records {
//!         println!("{} {:.2} {:+.2}%", record.name, record.last_price, record.delta_pct);
//!     }
//! }
//! ```
//!
//! Single questions can be asked without a board:
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use indexboard::{SeriesResolver, SessionStatusResolver, SystemClock};
//! use indexboard_calendars::ExchangeCalendars;
//!
//! let clock = Arc::new(SystemClock);
//! let series = SeriesResolver::new(feed, clock.clone()).resolve("^GSPC").await;
//! let open = SessionStatusResolver::new(Arc::new(ExchangeCalendars::new()), clock)
//!     .is_open("NYSE");
//! ```
//!
//! See `demos/examples/` for runnable end-to-end demonstrations.
#![warn(missing_docs)]

pub(crate) mod core;
mod series;
mod session;
mod snapshot;

pub use core::{Board, BoardBuilder};
pub use series::{DEFAULT_CASCADE, SeriesResolver};
pub use session::{DEFAULT_WINDOW_DAYS, SessionStatusResolver};
pub use snapshot::{BoardSnapshot, CLOSED_SECTION, OPEN_SECTION, Section};

pub use indexboard_middleware::{CacheMiddleware, CachingFeed, FeedBuilder};

// Re-export core types for convenience
pub use indexboard_core::{
    BoardConfig, BoardError, CacheConfig, CalendarProvider, Clock, FetchStrategy, FixedClock,
    Interval, Layout, Lookback, MarketConfig, PricePoint, PriceFeed, PriceSeries, PriceTable,
    SeriesSource, Session, SessionSchedule, SessionStatus, SystemClock, TradingCalendar,
    ViewRecord, world_indices,
};
