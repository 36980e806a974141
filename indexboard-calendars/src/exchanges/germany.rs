use chrono::NaiveDate;
use chrono_tz::Europe::Berlin;

use super::{ExchangeRules, no_special_hours};
use crate::holidays::{easter_offset, ymd};
use crate::hours::{TradingHours, hm};

/// Xetra electronic trading.
pub(super) fn xetr() -> ExchangeRules {
    ExchangeRules {
        id: "XETR",
        aliases: &["XETRA", "FWB"],
        hours: |_| TradingHours::new(Berlin, hm(9, 0), hm(17, 30)),
        trades_weekends: false,
        holidays: xetra_holidays,
        special_hours: no_special_hours,
    }
}

fn xetra_holidays(year: i32) -> Vec<NaiveDate> {
    [
        ymd(year, 1, 1),
        easter_offset(year, -2),
        easter_offset(year, 1),
        ymd(year, 5, 1),
        ymd(year, 12, 24),
        ymd(year, 12, 25),
        ymd(year, 12, 26),
        ymd(year, 12, 31),
    ]
    .into_iter()
    .flatten()
    .collect()
}
