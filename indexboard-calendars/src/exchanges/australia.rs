use chrono::{NaiveDate, Weekday};
use chrono_tz::Australia::Sydney;

use super::ExchangeRules;
use crate::holidays::{
    christmas_and_boxing_day, easter_offset, is_weekend, nth_weekday, weekend_to_monday, ymd,
};
use crate::hours::{SpecialHours, TradingHours, hm};

pub(super) fn asx() -> ExchangeRules {
    ExchangeRules {
        id: "ASX",
        aliases: &["XASX"],
        hours: |_| TradingHours::new(Sydney, hm(10, 0), hm(16, 0)),
        trades_weekends: false,
        holidays: asx_holidays,
        special_hours: asx_early_closes,
    }
}

fn asx_holidays(year: i32) -> Vec<NaiveDate> {
    let mut out = Vec::new();
    out.extend(ymd(year, 1, 1).map(weekend_to_monday));
    out.extend(ymd(year, 1, 26).map(weekend_to_monday));
    out.extend(easter_offset(year, -2));
    out.extend(easter_offset(year, 1));
    // Anzac Day is not moved off weekends
    out.extend(ymd(year, 4, 25));
    out.extend(nth_weekday(year, 6, Weekday::Mon, 2));
    out.extend(christmas_and_boxing_day(year));
    out
}

/// 14:10 closes on Christmas Eve and New Year's Eve.
fn asx_early_closes(year: i32) -> Vec<SpecialHours> {
    [ymd(year, 12, 24), ymd(year, 12, 31)]
        .into_iter()
        .flatten()
        .filter(|d| !is_weekend(*d))
        .map(|d| SpecialHours::early_close(d, hm(14, 10)))
        .collect()
}
