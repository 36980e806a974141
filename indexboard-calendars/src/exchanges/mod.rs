//! Holiday and trading-hour rules of the built-in exchanges.
//!
//! Rules cover the regular calendar of each venue. One-off closures (days of
//! mourning, weather events, system outages) are listed only where they are
//! well known; anything else trades as a regular day.

use chrono::NaiveDate;

use crate::hours::{SpecialHours, TradingHours};

mod always_open;
mod australia;
mod brazil;
mod china;
mod germany;
mod japan;
mod uk;
mod us;

/// Static description of one exchange calendar.
#[derive(Debug, Clone, Copy)]
pub struct ExchangeRules {
    /// Canonical identifier, e.g. "NYSE".
    pub id: &'static str,
    /// Other accepted identifiers, e.g. the MIC "XNYS".
    pub aliases: &'static [&'static str],
    /// Hours for `date` (some venues changed their hours over time).
    pub hours: fn(NaiveDate) -> TradingHours,
    /// Whether Saturday and Sunday are regular trading days.
    pub trades_weekends: bool,
    /// Full-day closures falling in `year`.
    pub holidays: fn(i32) -> Vec<NaiveDate>,
    /// Early closes and late opens falling in `year`.
    pub special_hours: fn(i32) -> Vec<SpecialHours>,
}

fn no_holidays(_year: i32) -> Vec<NaiveDate> {
    Vec::new()
}

fn no_special_hours(_year: i32) -> Vec<SpecialHours> {
    Vec::new()
}

/// Every built-in exchange, in registration order.
#[must_use]
pub fn builtin() -> Vec<ExchangeRules> {
    vec![
        us::nyse(),
        us::nasdaq(),
        uk::lse(),
        germany::xetr(),
        japan::jpx(),
        australia::asx(),
        brazil::b3(),
        china::sse(),
        always_open::always_open(),
    ]
}
