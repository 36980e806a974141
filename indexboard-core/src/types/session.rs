use std::fmt;

use chrono::{DateTime, Utc};

/// One trading day of an exchange, in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    /// Regular open.
    pub open: DateTime<Utc>,
    /// Regular close (exclusive).
    pub close: DateTime<Utc>,
    /// Start of the midday break, if the exchange has one.
    pub break_start: Option<DateTime<Utc>>,
    /// End of the midday break.
    pub break_end: Option<DateTime<Utc>>,
}

impl Session {
    /// Session without a midday break.
    #[must_use]
    pub const fn new(open: DateTime<Utc>, close: DateTime<Utc>) -> Self {
        Self {
            open,
            close,
            break_start: None,
            break_end: None,
        }
    }

    /// Attach a midday break.
    #[must_use]
    pub const fn with_break(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.break_start = Some(start);
        self.break_end = Some(end);
        self
    }

    /// True while trading is paused for the break.
    #[must_use]
    pub fn in_break(&self, ts: DateTime<Utc>) -> bool {
        match (self.break_start, self.break_end) {
            (Some(start), Some(end)) => ts >= start && ts < end,
            _ => false,
        }
    }

    /// True when `ts` is within `[open, close)` and outside the break.
    #[must_use]
    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        ts >= self.open && ts < self.close && !self.in_break(ts)
    }
}

/// Sessions of one calendar over a date window, ordered by open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSchedule {
    calendar: String,
    sessions: Vec<Session>,
}

impl SessionSchedule {
    /// Build a schedule; sessions are sorted by open time.
    pub fn new(calendar: impl Into<String>, mut sessions: Vec<Session>) -> Self {
        sessions.sort_by_key(|s| s.open);
        Self {
            calendar: calendar.into(),
            sessions,
        }
    }

    /// Calendar identifier the schedule was computed for.
    #[must_use]
    pub fn calendar(&self) -> &str {
        &self.calendar
    }

    /// Sessions ordered by open.
    #[must_use]
    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    /// True when the window holds no trading day.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Open of the earliest session.
    #[must_use]
    pub fn first_open(&self) -> Option<DateTime<Utc>> {
        self.sessions.first().map(|s| s.open)
    }

    /// Close of the latest session.
    #[must_use]
    pub fn last_close(&self) -> Option<DateTime<Utc>> {
        self.sessions.iter().map(|s| s.close).max()
    }

    /// True when `ts` lies between the first open and the last close.
    #[must_use]
    pub fn covers(&self, ts: DateTime<Utc>) -> bool {
        match (self.first_open(), self.last_close()) {
            (Some(first), Some(last)) => ts >= first && ts <= last,
            _ => false,
        }
    }
}

/// Outcome of a market-open check.
///
/// `Unknown` keeps "we could not tell" apart from a confirmed `Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionStatus {
    /// A session of the calendar contains "now".
    Open,
    /// No session contains "now".
    Closed,
    /// The calendar is unknown or could not be evaluated.
    Unknown,
}

impl SessionStatus {
    /// Only `Open` counts as open.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }

    /// Short human label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Closed => "Closed",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
