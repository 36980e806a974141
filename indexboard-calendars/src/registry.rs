use std::sync::Arc;

use indexboard_core::{BoardError, CalendarProvider, TradingCalendar};

use crate::calendar::RuleCalendar;
use crate::exchanges;

/// Registry of the built-in exchange calendars.
///
/// Lookups are case-insensitive and accept canonical ids as well as aliases
/// (`"nyse"`, `"XNYS"`).
#[derive(Clone)]
pub struct ExchangeCalendars {
    calendars: Vec<Arc<RuleCalendar>>,
}

impl Default for ExchangeCalendars {
    fn default() -> Self {
        Self::new()
    }
}

impl ExchangeCalendars {
    /// Registry holding every built-in calendar.
    #[must_use]
    pub fn new() -> Self {
        Self {
            calendars: exchanges::builtin()
                .into_iter()
                .map(|rules| Arc::new(RuleCalendar::new(rules)))
                .collect(),
        }
    }

    /// Concrete calendar for `id`, if known.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<Arc<RuleCalendar>> {
        let id = id.trim();
        self.calendars
            .iter()
            .find(|c| {
                c.id().eq_ignore_ascii_case(id)
                    || c.aliases().iter().any(|a| a.eq_ignore_ascii_case(id))
            })
            .cloned()
    }
}

impl CalendarProvider for ExchangeCalendars {
    fn get_calendar(&self, id: &str) -> Result<Arc<dyn TradingCalendar>, BoardError> {
        self.find(id)
            .map(|c| c as Arc<dyn TradingCalendar>)
            .ok_or_else(|| BoardError::unknown_calendar(id))
    }

    fn calendar_ids(&self) -> Vec<String> {
        self.calendars.iter().map(|c| c.id().to_string()).collect()
    }
}
