use chrono::{NaiveDate, TimeDelta};
use chrono_tz::Asia::Shanghai;

use super::{ExchangeRules, no_special_hours};
use crate::holidays::{span, ymd};
use crate::hours::{TradingHours, hm};

/// Shanghai Stock Exchange.
///
/// Lunar holidays (Spring Festival, Dragon Boat, Mid-Autumn) are tabulated for
/// 2020..=2030 only; other years keep just the solar holidays.
pub(super) fn sse() -> ExchangeRules {
    ExchangeRules {
        id: "SSE",
        aliases: &["XSHG", "SHSE"],
        hours: |_| {
            TradingHours::new(Shanghai, hm(9, 30), hm(15, 0)).with_lunch(hm(11, 30), hm(13, 0))
        },
        trades_weekends: false,
        holidays: sse_holidays,
        special_hours: no_special_hours,
    }
}

/// (year, month, day) of Chinese New Year, Dragon Boat and Mid-Autumn.
const LUNAR: &[(i32, (u32, u32), (u32, u32), (u32, u32))] = &[
    (2020, (1, 25), (6, 25), (10, 1)),
    (2021, (2, 12), (6, 14), (9, 21)),
    (2022, (2, 1), (6, 3), (9, 10)),
    (2023, (1, 22), (6, 22), (9, 29)),
    (2024, (2, 10), (6, 10), (9, 17)),
    (2025, (1, 29), (5, 31), (10, 6)),
    (2026, (2, 17), (6, 19), (9, 25)),
    (2027, (2, 6), (6, 9), (9, 15)),
    (2028, (1, 26), (5, 28), (10, 3)),
    (2029, (2, 13), (6, 16), (9, 22)),
    (2030, (2, 3), (6, 5), (9, 12)),
];

/// Qingming falls on April 4 or 5.
fn qingming(year: i32) -> Option<NaiveDate> {
    let y = year % 100;
    let c = if year >= 2000 { 4.81 } else { 5.59 };
    let day = (f64::from(y) * 0.2422 + c).floor() as i32 - y / 4;
    ymd(year, 4, u32::try_from(day).ok()?)
}

fn sse_holidays(year: i32) -> Vec<NaiveDate> {
    let mut out = Vec::new();
    out.extend(ymd(year, 1, 1));
    out.extend(qingming(year));
    if let Some(may1) = ymd(year, 5, 1) {
        out.extend(span(may1, 5));
    }
    if let Some(oct1) = ymd(year, 10, 1) {
        out.extend(span(oct1, 7));
    }
    if let Some(&(_, cny, dragon, autumn)) = LUNAR.iter().find(|row| row.0 == year) {
        // New Year's Eve through the fifth day of the first month
        if let Some(new_year) = ymd(year, cny.0, cny.1) {
            out.extend(span(new_year - TimeDelta::days(1), 7));
        }
        out.extend(ymd(year, dragon.0, dragon.1));
        out.extend(ymd(year, autumn.0, autumn.1));
    }
    out
}
