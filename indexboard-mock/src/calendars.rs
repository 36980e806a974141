use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use chrono_tz::Tz;

use indexboard_core::{
    BoardError, CalendarProvider, Session, SessionSchedule, TradingCalendar,
};

/// Calendar with an explicit list of sessions.
///
/// `schedule(start, end)` returns the sessions whose open falls on a UTC date in
/// `[start, end]`, or the configured failure.
#[derive(Debug, Clone)]
pub struct MockCalendar {
    id: String,
    sessions: Vec<Session>,
    failure: Option<BoardError>,
}

impl MockCalendar {
    /// Calendar serving `sessions`.
    pub fn new(id: impl Into<String>, sessions: Vec<Session>) -> Self {
        Self {
            id: id.into(),
            sessions,
            failure: None,
        }
    }

    /// Calendar whose `schedule` always fails with `err`.
    pub fn failing(id: impl Into<String>, err: BoardError) -> Self {
        Self {
            id: id.into(),
            sessions: Vec::new(),
            failure: Some(err),
        }
    }
}

impl TradingCalendar for MockCalendar {
    fn id(&self) -> &str {
        &self.id
    }

    fn timezone(&self) -> Tz {
        chrono_tz::UTC
    }

    fn schedule(&self, start: NaiveDate, end: NaiveDate) -> Result<SessionSchedule, BoardError> {
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        let sessions = self
            .sessions
            .iter()
            .filter(|s| {
                let d = s.open.date_naive();
                d >= start && d <= end
            })
            .copied()
            .collect();
        Ok(SessionSchedule::new(self.id.clone(), sessions))
    }
}

/// Registry of mock calendars keyed by exact identifier.
#[derive(Default, Clone)]
pub struct MockCalendars {
    calendars: HashMap<String, Arc<MockCalendar>>,
}

impl MockCalendars {
    /// Empty registry; every lookup fails with `UnknownCalendar`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a calendar serving `sessions` under `id`.
    #[must_use]
    pub fn with_sessions(mut self, id: &str, sessions: Vec<Session>) -> Self {
        self.calendars
            .insert(id.to_string(), Arc::new(MockCalendar::new(id, sessions)));
        self
    }

    /// Register a calendar under `id` whose schedule always fails with `err`.
    #[must_use]
    pub fn with_failure(mut self, id: &str, err: BoardError) -> Self {
        self.calendars
            .insert(id.to_string(), Arc::new(MockCalendar::failing(id, err)));
        self
    }
}

impl CalendarProvider for MockCalendars {
    fn get_calendar(&self, id: &str) -> Result<Arc<dyn TradingCalendar>, BoardError> {
        self.calendars
            .get(id)
            .map(|c| Arc::clone(c) as Arc<dyn TradingCalendar>)
            .ok_or_else(|| BoardError::unknown_calendar(id))
    }

    fn calendar_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.calendars.keys().cloned().collect();
        ids.sort();
        ids
    }
}
