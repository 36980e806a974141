use std::sync::Arc;

use chrono::TimeDelta;
use indexboard_core::{BoardError, CalendarProvider, Clock, SessionStatus};

/// Default half-width, in days, of the schedule window around "now".
pub const DEFAULT_WINDOW_DAYS: u32 = 1;

/// Answers "is this market trading right now?" from trading calendars.
///
/// The schedule is fetched for `[today - window, today + window]` on each call.
/// An empty schedule, or a "now" that no session of the window covers, is
/// `Closed`. An unknown calendar or any other calendar failure is `Unknown`.
pub struct SessionStatusResolver {
    calendars: Arc<dyn CalendarProvider>,
    clock: Arc<dyn Clock>,
    window_days: u32,
}

impl SessionStatusResolver {
    /// Resolver over `calendars`, reading "now" from `clock`.
    #[must_use]
    pub fn new(calendars: Arc<dyn CalendarProvider>, clock: Arc<dyn Clock>) -> Self {
        Self {
            calendars,
            clock,
            window_days: DEFAULT_WINDOW_DAYS,
        }
    }

    /// Set the schedule half-width in days.
    #[must_use]
    pub const fn with_window_days(mut self, days: u32) -> Self {
        self.window_days = days;
        self
    }

    /// Half-width of the schedule window in days.
    #[must_use]
    pub const fn window_days(&self) -> u32 {
        self.window_days
    }

    /// Current status of the exchange identified by `calendar_id`.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "indexboard::session::status", skip(self))
    )]
    pub fn status(&self, calendar_id: &str) -> SessionStatus {
        match self.try_status(calendar_id) {
            Ok(status) => status,
            #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(error = %err, "calendar lookup failed; status unknown");
                SessionStatus::Unknown
            }
        }
    }

    /// `status(calendar_id).is_open()`; `Unknown` counts as closed.
    pub fn is_open(&self, calendar_id: &str) -> bool {
        self.status(calendar_id).is_open()
    }

    fn try_status(&self, calendar_id: &str) -> Result<SessionStatus, BoardError> {
        let calendar = self.calendars.get_calendar(calendar_id)?;
        let now = self.clock.now();
        let today = now.date_naive();
        let window = TimeDelta::days(i64::from(self.window_days));
        let start = today
            .checked_sub_signed(window)
            .ok_or_else(|| BoardError::InvalidArg(format!("{today} minus {window}")))?;
        let end = today
            .checked_add_signed(window)
            .ok_or_else(|| BoardError::InvalidArg(format!("{today} plus {window}")))?;

        let schedule = calendar.schedule(start, end)?;
        if schedule.is_empty() {
            return Ok(SessionStatus::Closed);
        }
        match calendar.open_at_time(&schedule, now) {
            Ok(true) => Ok(SessionStatus::Open),
            Ok(false) => Ok(SessionStatus::Closed),
            // no session of the window covers now
            Err(BoardError::OutOfRange(_)) => Ok(SessionStatus::Closed),
            Err(err) => Err(err),
        }
    }
}
