use chrono::{NaiveDate, Weekday};
use chrono_tz::Europe::London;

use super::ExchangeRules;
use crate::holidays::{
    christmas_and_boxing_day, easter_offset, is_weekend, last_weekday, nth_weekday,
    weekend_to_monday, ymd,
};
use crate::hours::{SpecialHours, TradingHours, hm};

pub(super) fn lse() -> ExchangeRules {
    ExchangeRules {
        id: "LSE",
        aliases: &["XLON"],
        hours: |_| TradingHours::new(London, hm(8, 0), hm(16, 30)),
        trades_weekends: false,
        holidays: lse_holidays,
        special_hours: lse_half_days,
    }
}

fn lse_holidays(year: i32) -> Vec<NaiveDate> {
    let mut out = Vec::new();
    out.extend(ymd(year, 1, 1).map(weekend_to_monday));
    out.extend(easter_offset(year, -2));
    out.extend(easter_offset(year, 1));

    // Early May bank holiday, moved for VE day anniversaries
    match year {
        1995 | 2020 => out.extend(ymd(year, 5, 8)),
        _ => out.extend(nth_weekday(year, 5, Weekday::Mon, 1)),
    }
    // Spring bank holiday, moved for royal jubilees
    match year {
        2002 => out.extend([ymd(2002, 6, 3), ymd(2002, 6, 4)].into_iter().flatten()),
        2012 => out.extend([ymd(2012, 6, 4), ymd(2012, 6, 5)].into_iter().flatten()),
        2022 => out.extend([ymd(2022, 6, 2), ymd(2022, 6, 3)].into_iter().flatten()),
        _ => out.extend(last_weekday(year, 5, Weekday::Mon)),
    }
    out.extend(last_weekday(year, 8, Weekday::Mon));
    out.extend(christmas_and_boxing_day(year));

    match year {
        1999 => out.extend(ymd(1999, 12, 31)),
        2011 => out.extend(ymd(2011, 4, 29)),
        2022 => out.extend(ymd(2022, 9, 19)),
        2023 => out.extend(ymd(2023, 5, 8)),
        _ => {}
    }
    out
}

/// 12:30 closes on Christmas Eve and New Year's Eve.
fn lse_half_days(year: i32) -> Vec<SpecialHours> {
    [ymd(year, 12, 24), ymd(year, 12, 31)]
        .into_iter()
        .flatten()
        .filter(|d| !is_weekend(*d))
        .map(|d| SpecialHours::early_close(d, hm(12, 30)))
        .collect()
}
