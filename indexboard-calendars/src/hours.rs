use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;

use indexboard_core::{BoardError, Session};

/// Regular trading hours of an exchange, in exchange-local time.
///
/// A close at or before the open means the session ends on the next local day
/// (`00:00..00:00` is a full 24 hour session).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TradingHours {
    /// Exchange timezone.
    pub timezone: Tz,
    /// Regular open.
    pub open: NaiveTime,
    /// Regular close.
    pub close: NaiveTime,
    /// Midday break, start and end.
    pub lunch: Option<(NaiveTime, NaiveTime)>,
}

/// Hours that differ from the regular ones on a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecialHours {
    /// Local date the override applies to.
    pub date: NaiveDate,
    /// Late open, if any.
    pub open: Option<NaiveTime>,
    /// Early close, if any.
    pub close: Option<NaiveTime>,
}

impl SpecialHours {
    /// Early close on `date`.
    #[must_use]
    pub const fn early_close(date: NaiveDate, close: NaiveTime) -> Self {
        Self {
            date,
            open: None,
            close: Some(close),
        }
    }

    /// Late open on `date`.
    #[must_use]
    pub const fn late_open(date: NaiveDate, open: NaiveTime) -> Self {
        Self {
            date,
            open: Some(open),
            close: None,
        }
    }
}

impl TradingHours {
    /// Session without a break.
    #[must_use]
    pub const fn new(timezone: Tz, open: NaiveTime, close: NaiveTime) -> Self {
        Self {
            timezone,
            open,
            close,
            lunch: None,
        }
    }

    /// Attach a midday break.
    #[must_use]
    pub const fn with_lunch(mut self, start: NaiveTime, end: NaiveTime) -> Self {
        self.lunch = Some((start, end));
        self
    }

    /// UTC session of local day `day`, with `special` overriding open or close.
    ///
    /// A break that no longer fits inside an early close is dropped.
    ///
    /// # Errors
    /// Returns `BoardError::Data` if a session bound does not exist in local time.
    pub fn session_on(
        &self,
        day: NaiveDate,
        special: Option<&SpecialHours>,
    ) -> Result<Session, BoardError> {
        let open_t = special.and_then(|s| s.open).unwrap_or(self.open);
        let close_t = special.and_then(|s| s.close).unwrap_or(self.close);

        let open = self.to_utc(day, open_t)?;
        let close_day = if close_t <= open_t {
            day + TimeDelta::days(1)
        } else {
            day
        };
        let close = self.to_utc(close_day, close_t)?;

        let session = Session::new(open, close);
        match self.lunch {
            Some((start, end)) if start > open_t && end < close_t => Ok(session
                .with_break(self.to_utc(day, start)?, self.to_utc(day, end)?)),
            _ => Ok(session),
        }
    }

    fn to_utc(&self, day: NaiveDate, time: NaiveTime) -> Result<DateTime<Utc>, BoardError> {
        self.timezone
            .from_local_datetime(&day.and_time(time))
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
            .ok_or_else(|| {
                BoardError::Data(format!(
                    "{day} {time} does not exist in {}",
                    self.timezone.name()
                ))
            })
    }
}

/// Shorthand for a wall-clock time; the arguments are compile-time constants.
pub(crate) const fn hm(hour: u32, minute: u32) -> NaiveTime {
    match NaiveTime::from_hms_opt(hour, minute, 0) {
        Some(t) => t,
        None => NaiveTime::MIN,
    }
}
