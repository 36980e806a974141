//! indexboard-calendars
//!
//! Rule-based trading calendars for the exchanges shown on the board.
//!
//! Every calendar is computed from holiday rules (fixed dates with weekend
//! observance, nth-weekday rules, Easter offsets, equinox formulas and a small
//! lunar table) and regular hours in the exchange timezone, so no network
//! access or data files are needed.
//!
//! ```no_run
//! use indexboard_calendars::ExchangeCalendars;
//! use indexboard_core::CalendarProvider;
//!
//! let calendars = ExchangeCalendars::new();
//! let nyse = calendars.get_calendar("NYSE").unwrap();
//! # let _ = nyse;
//! ```
#![warn(missing_docs)]

mod calendar;
/// Static rule sets of the built-in exchanges.
pub mod exchanges;
/// Holiday date arithmetic.
pub mod holidays;
mod hours;
mod registry;

pub use calendar::{RuleCalendar, SUPPORTED_YEARS};
pub use exchanges::ExchangeRules;
pub use hours::{SpecialHours, TradingHours};
pub use registry::ExchangeCalendars;
