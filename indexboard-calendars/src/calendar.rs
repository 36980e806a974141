use std::collections::{BTreeSet, HashMap};
use std::ops::RangeInclusive;

use chrono::{Datelike, NaiveDate};
use chrono_tz::Tz;

use indexboard_core::{BoardError, SessionSchedule, TradingCalendar};

use crate::exchanges::ExchangeRules;
use crate::holidays::is_weekend;
use crate::hours::{SpecialHours, TradingHours};

/// Years every built-in calendar can produce schedules for.
pub const SUPPORTED_YEARS: RangeInclusive<i32> = 1990..=2099;

/// Trading calendar evaluated from static holiday and hour rules.
#[derive(Debug, Clone, Copy)]
pub struct RuleCalendar {
    rules: ExchangeRules,
}

impl RuleCalendar {
    /// Wrap a rule set.
    #[must_use]
    pub const fn new(rules: ExchangeRules) -> Self {
        Self { rules }
    }

    /// Alternative identifiers accepted for this calendar.
    #[must_use]
    pub const fn aliases(&self) -> &'static [&'static str] {
        self.rules.aliases
    }

    /// Hours in force on `date`, before early closes or late opens.
    #[must_use]
    pub fn hours_on(&self, date: NaiveDate) -> TradingHours {
        (self.rules.hours)(date)
    }

    /// Full-day closures of `year`, sorted and deduplicated.
    ///
    /// # Errors
    /// Returns `BoardError::OutOfRange` for years outside [`SUPPORTED_YEARS`].
    pub fn holidays(&self, year: i32) -> Result<Vec<NaiveDate>, BoardError> {
        check_year(year)?;
        let set: BTreeSet<NaiveDate> = (self.rules.holidays)(year).into_iter().collect();
        Ok(set.into_iter().collect())
    }

    /// True when `date` is a regular or shortened trading day.
    ///
    /// # Errors
    /// Returns `BoardError::OutOfRange` for years outside [`SUPPORTED_YEARS`].
    pub fn is_session(&self, date: NaiveDate) -> Result<bool, BoardError> {
        let holidays = self.holidays(date.year())?;
        Ok(self.trades_on(date, &holidays))
    }

    fn trades_on(&self, date: NaiveDate, holidays: &[NaiveDate]) -> bool {
        (self.rules.trades_weekends || !is_weekend(date)) && holidays.binary_search(&date).is_err()
    }
}

fn check_year(year: i32) -> Result<(), BoardError> {
    if SUPPORTED_YEARS.contains(&year) {
        Ok(())
    } else {
        Err(BoardError::out_of_range(format!(
            "year {year} outside supported range {}..={}",
            SUPPORTED_YEARS.start(),
            SUPPORTED_YEARS.end()
        )))
    }
}

impl TradingCalendar for RuleCalendar {
    fn id(&self) -> &str {
        self.rules.id
    }

    fn timezone(&self) -> Tz {
        self.hours_on(NaiveDate::MIN).timezone
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "indexboard::calendars",
            level = "trace",
            skip(self),
            fields(calendar = self.rules.id),
        )
    )]
    fn schedule(&self, start: NaiveDate, end: NaiveDate) -> Result<SessionSchedule, BoardError> {
        if end < start {
            return Err(BoardError::InvalidArg(format!(
                "schedule end {end} precedes start {start}"
            )));
        }
        check_year(start.year())?;
        check_year(end.year())?;

        let mut holidays = Vec::new();
        let mut special: HashMap<NaiveDate, SpecialHours> = HashMap::new();
        for year in start.year()..=end.year() {
            holidays.extend((self.rules.holidays)(year));
            special.extend((self.rules.special_hours)(year).into_iter().map(|s| (s.date, s)));
        }
        holidays.sort_unstable();
        holidays.dedup();

        let mut sessions = Vec::new();
        for date in start.iter_days().take_while(|d| *d <= end) {
            if !self.trades_on(date, &holidays) {
                continue;
            }
            sessions.push(self.hours_on(date).session_on(date, special.get(&date))?);
        }
        Ok(SessionSchedule::new(self.rules.id, sessions))
    }
}
