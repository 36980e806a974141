//! Date arithmetic for holiday rules.

use chrono::{Datelike, NaiveDate, TimeDelta, Weekday};

/// `NaiveDate` from parts; `None` for impossible dates.
pub(crate) fn ymd(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}

/// True on Saturday and Sunday.
#[must_use]
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// The `n`-th (1-based) `weekday` of `month`.
#[must_use]
pub fn nth_weekday(year: i32, month: u32, weekday: Weekday, n: u8) -> Option<NaiveDate> {
    NaiveDate::from_weekday_of_month_opt(year, month, weekday, n)
}

/// The last `weekday` of `month`.
#[must_use]
pub fn last_weekday(year: i32, month: u32, weekday: Weekday) -> Option<NaiveDate> {
    let first_next = if month == 12 {
        ymd(year + 1, 1, 1)?
    } else {
        ymd(year, month + 1, 1)?
    };
    let mut d = first_next - TimeDelta::days(1);
    while d.weekday() != weekday {
        d = d.pred_opt()?;
    }
    Some(d)
}

/// Western Easter Sunday (anonymous Gregorian algorithm).
#[must_use]
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    ymd(year, u32::try_from(month).ok()?, u32::try_from(day).ok()?)
}

/// Date `days` away from Easter Sunday.
#[must_use]
pub fn easter_offset(year: i32, days: i64) -> Option<NaiveDate> {
    easter_sunday(year).map(|e| e + TimeDelta::days(days))
}

/// Saturday moves to Friday and Sunday to Monday.
#[must_use]
pub fn nearest_workday(date: NaiveDate) -> NaiveDate {
    match date.weekday() {
        Weekday::Sat => date - TimeDelta::days(1),
        Weekday::Sun => date + TimeDelta::days(1),
        _ => date,
    }
}

/// Sunday moves to Monday; Saturday is not observed.
#[must_use]
pub fn sunday_to_monday(date: NaiveDate) -> Option<NaiveDate> {
    match date.weekday() {
        Weekday::Sat => None,
        Weekday::Sun => Some(date + TimeDelta::days(1)),
        _ => Some(date),
    }
}

/// Saturday and Sunday both move to the following Monday.
#[must_use]
pub fn weekend_to_monday(date: NaiveDate) -> NaiveDate {
    match date.weekday() {
        Weekday::Sat => date + TimeDelta::days(2),
        Weekday::Sun => date + TimeDelta::days(1),
        _ => date,
    }
}

/// Observed Christmas and Boxing Day for calendars that shift both off weekends.
#[must_use]
pub fn christmas_and_boxing_day(year: i32) -> Vec<NaiveDate> {
    let (Some(christmas), Some(boxing)) = (ymd(year, 12, 25), ymd(year, 12, 26)) else {
        return Vec::new();
    };
    let christmas = if is_weekend(christmas) {
        christmas + TimeDelta::days(2)
    } else {
        christmas
    };
    let boxing = if is_weekend(boxing) {
        boxing + TimeDelta::days(2)
    } else {
        boxing
    };
    vec![christmas, boxing]
}

/// Dates from `start` spanning `days` consecutive days.
pub(crate) fn span(start: NaiveDate, days: i64) -> impl Iterator<Item = NaiveDate> {
    (0..days).map(move |i| start + TimeDelta::days(i))
}
