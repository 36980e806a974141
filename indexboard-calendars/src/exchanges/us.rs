use chrono::{Datelike, NaiveDate, TimeDelta, Weekday};
use chrono_tz::America::New_York;

use super::ExchangeRules;
use crate::holidays::{
    easter_offset, is_weekend, last_weekday, nearest_workday, nth_weekday, sunday_to_monday, ymd,
};
use crate::hours::{SpecialHours, TradingHours, hm};

pub(super) fn nyse() -> ExchangeRules {
    ExchangeRules {
        id: "NYSE",
        aliases: &["XNYS"],
        hours: regular_hours,
        trades_weekends: false,
        holidays: us_equity_holidays,
        special_hours: us_equity_early_closes,
    }
}

pub(super) fn nasdaq() -> ExchangeRules {
    ExchangeRules {
        id: "NASDAQ",
        aliases: &["XNAS"],
        ..nyse()
    }
}

fn regular_hours(_date: NaiveDate) -> TradingHours {
    TradingHours::new(New_York, hm(9, 30), hm(16, 0))
}

fn us_equity_holidays(year: i32) -> Vec<NaiveDate> {
    let mut out = Vec::new();
    out.extend(ymd(year, 1, 1).and_then(sunday_to_monday));
    if year >= 1998 {
        out.extend(nth_weekday(year, 1, Weekday::Mon, 3));
    }
    out.extend(nth_weekday(year, 2, Weekday::Mon, 3));
    out.extend(easter_offset(year, -2));
    out.extend(last_weekday(year, 5, Weekday::Mon));
    if year >= 2022 {
        out.extend(ymd(year, 6, 19).map(nearest_workday));
    }
    out.extend(ymd(year, 7, 4).map(nearest_workday));
    out.extend(nth_weekday(year, 9, Weekday::Mon, 1));
    out.extend(nth_weekday(year, 11, Weekday::Thu, 4));
    out.extend(ymd(year, 12, 25).map(nearest_workday));
    out.extend(one_off_closures(year));
    out
}

fn one_off_closures(year: i32) -> Vec<NaiveDate> {
    let mut out = Vec::new();
    match year {
        2001 => {
            for d in 11..=14 {
                out.extend(ymd(2001, 9, d));
            }
        }
        2004 => out.extend(ymd(2004, 6, 11)),
        2007 => out.extend(ymd(2007, 1, 2)),
        2012 => {
            out.extend(ymd(2012, 10, 29));
            out.extend(ymd(2012, 10, 30));
        }
        2018 => out.extend(ymd(2018, 12, 5)),
        2025 => out.extend(ymd(2025, 1, 9)),
        _ => {}
    }
    out
}

/// 13:00 closes around Independence Day, Thanksgiving and Christmas.
fn us_equity_early_closes(year: i32) -> Vec<SpecialHours> {
    let one_pm = hm(13, 0);
    let mut out = Vec::new();

    // July 3rd, when the 4th falls Tuesday through Friday
    if let Some(jul3) = ymd(year, 7, 3) {
        if matches!(
            jul3.weekday(),
            Weekday::Mon | Weekday::Tue | Weekday::Wed | Weekday::Thu
        ) {
            out.push(SpecialHours::early_close(jul3, one_pm));
        }
    }
    if let Some(thanksgiving) = nth_weekday(year, 11, Weekday::Thu, 4) {
        out.push(SpecialHours::early_close(
            thanksgiving + TimeDelta::days(1),
            one_pm,
        ));
    }
    if let Some(dec24) = ymd(year, 12, 24) {
        if !is_weekend(dec24) && dec24.weekday() != Weekday::Fri {
            out.push(SpecialHours::early_close(dec24, one_pm));
        }
    }
    out
}
