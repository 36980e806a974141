use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, TimeDelta, Weekday};
use chrono_tz::Asia::Tokyo;

use super::{ExchangeRules, no_special_hours};
use crate::holidays::{nth_weekday, span, ymd};
use crate::hours::{TradingHours, hm};

/// Tokyo Stock Exchange (Japan Exchange Group).
pub(super) fn jpx() -> ExchangeRules {
    ExchangeRules {
        id: "JPX",
        aliases: &["XTKS", "TSE"],
        hours: jpx_hours,
        trades_weekends: false,
        holidays: jpx_holidays,
        special_hours: no_special_hours,
    }
}

/// The afternoon session was extended to 15:30 on 2024-11-05.
fn jpx_hours(date: NaiveDate) -> TradingHours {
    let extended = NaiveDate::from_ymd_opt(2024, 11, 5).is_some_and(|d| date >= d);
    let close = if extended { hm(15, 30) } else { hm(15, 0) };
    TradingHours::new(Tokyo, hm(9, 0), close).with_lunch(hm(11, 30), hm(12, 30))
}

/// Day of March of the vernal equinox, valid for 1980..=2099.
fn vernal_equinox(year: i32) -> Option<NaiveDate> {
    let y = f64::from(year - 1980);
    let day = (20.8431 + 0.242_194 * y - (y / 4.0).floor()).floor();
    ymd(year, 3, day as u32)
}

/// Day of September of the autumnal equinox, valid for 1980..=2099.
fn autumnal_equinox(year: i32) -> Option<NaiveDate> {
    let y = f64::from(year - 1980);
    let day = (23.2488 + 0.242_194 * y - (y / 4.0).floor()).floor();
    ymd(year, 9, day as u32)
}

/// National holidays as enacted, before substitute-day handling.
fn national_holidays(year: i32) -> BTreeSet<NaiveDate> {
    let mut out = BTreeSet::new();
    out.extend(ymd(year, 1, 1));
    if year >= 2000 {
        out.extend(nth_weekday(year, 1, Weekday::Mon, 2));
    } else {
        out.extend(ymd(year, 1, 15));
    }
    out.extend(ymd(year, 2, 11));
    if year >= 2020 {
        out.extend(ymd(year, 2, 23));
    } else if year <= 2018 {
        out.extend(ymd(year, 12, 23));
    }
    out.extend(vernal_equinox(year));
    out.extend(ymd(year, 4, 29));
    out.extend(ymd(year, 5, 3));
    out.extend(ymd(year, 5, 4));
    out.extend(ymd(year, 5, 5));
    match year {
        2020 => out.extend(ymd(2020, 7, 23)),
        2021 => out.extend(ymd(2021, 7, 22)),
        y if y >= 2003 => out.extend(nth_weekday(y, 7, Weekday::Mon, 3)),
        y if y >= 1996 => out.extend(ymd(y, 7, 20)),
        _ => {}
    }
    match year {
        2020 => out.extend(ymd(2020, 8, 10)),
        2021 => out.extend(ymd(2021, 8, 8)),
        y if y >= 2016 => out.extend(ymd(y, 8, 11)),
        _ => {}
    }
    if year >= 2003 {
        out.extend(nth_weekday(year, 9, Weekday::Mon, 3));
    } else {
        out.extend(ymd(year, 9, 15));
    }
    out.extend(autumnal_equinox(year));
    match year {
        2020 => out.extend(ymd(2020, 7, 24)),
        2021 => out.extend(ymd(2021, 7, 23)),
        y if y >= 2000 => out.extend(nth_weekday(y, 10, Weekday::Mon, 2)),
        y => out.extend(ymd(y, 10, 10)),
    }
    out.extend(ymd(year, 11, 3));
    out.extend(ymd(year, 11, 23));
    if year == 2019 {
        out.extend([ymd(2019, 4, 30), ymd(2019, 5, 1), ymd(2019, 5, 2)].into_iter().flatten());
        out.extend(ymd(2019, 10, 22));
    }
    out
}

/// Exchange closures: national holidays plus substitute days, citizens' holidays
/// and the year-end break (Dec 31 through Jan 3).
fn jpx_holidays(year: i32) -> Vec<NaiveDate> {
    let mut days = national_holidays(year);

    // A weekday squeezed between two holidays is itself a holiday.
    let sandwiched: Vec<NaiveDate> = days
        .iter()
        .filter_map(|d| {
            let mid = *d + TimeDelta::days(1);
            let next = *d + TimeDelta::days(2);
            (days.contains(&next) && !days.contains(&mid) && mid.weekday() != Weekday::Sun)
                .then_some(mid)
        })
        .collect();
    days.extend(sandwiched);

    // A holiday on Sunday moves to the next day that is not already a holiday.
    let substitutes: Vec<NaiveDate> = days
        .iter()
        .filter(|d| d.weekday() == Weekday::Sun)
        .filter_map(|d| {
            let mut sub = *d + TimeDelta::days(1);
            while days.contains(&sub) {
                sub += TimeDelta::days(1);
            }
            (sub.year() == year).then_some(sub)
        })
        .collect();
    days.extend(substitutes);

    if let Some(jan1) = ymd(year, 1, 1) {
        days.extend(span(jan1, 3));
    }
    days.extend(ymd(year, 12, 31));
    days.into_iter().collect()
}
