use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::types::{BoardError, Interval, Lookback, PriceTable, SessionSchedule};

/// Every interval the board may request.
pub const ALL_INTERVALS: &[Interval] = &[
    Interval::OneMinute,
    Interval::FiveMinutes,
    Interval::OneDay,
];

/// A source of close-price tables, e.g. a market-data vendor.
///
/// Implementations perform exactly one provider call per `download`; retries and
/// fallbacks are the caller's business.
#[async_trait]
pub trait PriceFeed: Send + Sync {
    /// Stable provider name for logs and cache keys.
    fn name(&self) -> &'static str;

    /// Human-readable vendor name.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// Download close prices for `ticker` at `interval` over the trailing `lookback`.
    ///
    /// An empty table is a valid answer meaning "nothing in that window".
    async fn download(
        &self,
        ticker: &str,
        interval: Interval,
        lookback: Lookback,
    ) -> Result<PriceTable, BoardError>;

    /// Intervals this feed can serve natively. Defaults to all of them.
    fn supported_intervals(&self) -> &'static [Interval] {
        ALL_INTERVALS
    }
}

/// Session rules of a single exchange.
pub trait TradingCalendar: Send + Sync {
    /// Canonical identifier, e.g. "NYSE".
    fn id(&self) -> &str;

    /// Exchange-local timezone.
    fn timezone(&self) -> Tz;

    /// Sessions for every trading day in `[start, end]` (local dates, inclusive).
    ///
    /// # Errors
    /// Returns `BoardError::OutOfRange` when the dates fall outside what the
    /// calendar knows, or `BoardError::InvalidArg` when `end < start`.
    fn schedule(&self, start: NaiveDate, end: NaiveDate) -> Result<SessionSchedule, BoardError>;

    /// Whether `ts` falls inside one of the schedule's sessions.
    ///
    /// # Errors
    /// Returns `BoardError::OutOfRange` if `ts` is not covered by the schedule
    /// (before its first open or after its last close, or the schedule is empty).
    fn open_at_time(
        &self,
        schedule: &SessionSchedule,
        ts: DateTime<Utc>,
    ) -> Result<bool, BoardError> {
        if !schedule.covers(ts) {
            return Err(BoardError::out_of_range(format!(
                "{ts} is not covered by the {} schedule",
                schedule.calendar()
            )));
        }
        Ok(schedule.sessions().iter().any(|s| s.contains(ts)))
    }
}

/// Registry resolving calendar identifiers to calendars.
pub trait CalendarProvider: Send + Sync {
    /// Look up a calendar by identifier.
    ///
    /// # Errors
    /// Returns `BoardError::UnknownCalendar` if no calendar matches `id`.
    fn get_calendar(&self, id: &str) -> Result<Arc<dyn TradingCalendar>, BoardError>;

    /// Canonical identifiers of the calendars this provider knows.
    fn calendar_ids(&self) -> Vec<String> {
        Vec::new()
    }
}
