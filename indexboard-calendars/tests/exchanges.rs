use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use indexboard_calendars::ExchangeCalendars;
use indexboard_core::{BoardError, CalendarProvider, TradingCalendar};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
}

fn open_at(id: &str, ts: DateTime<Utc>) -> Result<bool, BoardError> {
    let cal = ExchangeCalendars::new().get_calendar(id)?;
    let d = ts.date_naive();
    let week = chrono::TimeDelta::days(7);
    let sched = cal.schedule(d - week, d + week)?;
    cal.open_at_time(&sched, ts)
}

#[test]
fn lookup_is_case_insensitive_and_accepts_aliases() {
    let cals = ExchangeCalendars::new();
    for id in ["NYSE", "nyse", "XNYS", " xnys ", "jpx", "XTKS", "24/7", "sse", "xshg"] {
        assert!(cals.get_calendar(id).is_ok(), "{id} should resolve");
    }
    assert_eq!(cals.get_calendar("xnas").unwrap().id(), "NASDAQ");
    let err = cals.get_calendar("MOON").err().unwrap();
    assert_eq!(err, BoardError::unknown_calendar("MOON"));
    assert_eq!(
        cals.calendar_ids(),
        vec!["NYSE", "NASDAQ", "LSE", "XETR", "JPX", "ASX", "B3", "SSE", "24/7"]
    );
}

#[test]
fn nyse_regular_day_bounds() {
    // 2024-03-14 is a Thursday in EDT: 13:30..20:00 UTC
    assert!(!open_at("NYSE", utc(2024, 3, 14, 13, 29)).unwrap());
    assert!(open_at("NYSE", utc(2024, 3, 14, 13, 30)).unwrap());
    assert!(open_at("NYSE", utc(2024, 3, 14, 19, 59)).unwrap());
    assert!(!open_at("NYSE", utc(2024, 3, 14, 20, 0)).unwrap());
}

#[test]
fn nyse_thanksgiving_and_the_day_after() {
    let cal = ExchangeCalendars::new().get_calendar("NYSE").unwrap();
    let sched = cal.schedule(day(2024, 11, 27), day(2024, 11, 29)).unwrap();
    assert_eq!(sched.sessions().len(), 2);

    assert!(!cal.open_at_time(&sched, utc(2024, 11, 28, 16, 0)).unwrap());
    // 13:00 EST early close the day after
    assert!(cal.open_at_time(&sched, utc(2024, 11, 29, 17, 59)).unwrap());
    assert!(!cal.open_at_time(&sched, utc(2024, 11, 29, 18, 0)).unwrap());
}

#[test]
fn nyse_holidays_2024() {
    let cal = ExchangeCalendars::new().find("NYSE").unwrap();
    let expected = vec![
        day(2024, 1, 1),
        day(2024, 1, 15),
        day(2024, 2, 19),
        day(2024, 3, 29),
        day(2024, 5, 27),
        day(2024, 6, 19),
        day(2024, 7, 4),
        day(2024, 9, 2),
        day(2024, 11, 28),
        day(2024, 12, 25),
    ];
    assert_eq!(cal.holidays(2024).unwrap(), expected);
    assert!(!cal.is_session(day(2024, 3, 29)).unwrap());
    assert!(!cal.is_session(day(2024, 3, 30)).unwrap());
    assert!(cal.is_session(day(2024, 3, 28)).unwrap());
}

#[test]
fn weekend_schedule_is_empty() {
    let cal = ExchangeCalendars::new().get_calendar("NYSE").unwrap();
    let sched = cal.schedule(day(2024, 3, 16), day(2024, 3, 17)).unwrap();
    assert!(sched.is_empty());
    assert!(matches!(
        cal.open_at_time(&sched, utc(2024, 3, 16, 15, 0)),
        Err(BoardError::OutOfRange(_))
    ));
}

#[test]
fn jpx_lunch_break_and_extended_close() {
    // 09:00-11:30 and 12:30-15:00 JST = 00:00-02:30 and 03:30-06:00 UTC
    assert!(open_at("JPX", utc(2024, 3, 14, 1, 0)).unwrap());
    assert!(!open_at("JPX", utc(2024, 3, 14, 3, 0)).unwrap());
    assert!(open_at("JPX", utc(2024, 3, 14, 3, 30)).unwrap());
    assert!(!open_at("JPX", utc(2024, 3, 14, 6, 15)).unwrap());
    // from 2024-11-05 the close is 15:30 JST
    assert!(open_at("JPX", utc(2024, 11, 6, 6, 15)).unwrap());
    assert!(!open_at("JPX", utc(2024, 11, 6, 6, 30)).unwrap());
}

#[test]
fn jpx_year_end_break() {
    let cal = ExchangeCalendars::new().find("JPX").unwrap();
    for d in [day(2024, 12, 31), day(2025, 1, 2), day(2025, 1, 3)] {
        assert!(!cal.is_session(d).unwrap(), "{d} should be closed");
    }
    assert!(cal.is_session(day(2025, 1, 6)).unwrap());
}

#[test]
fn lse_christmas_eve_half_day() {
    assert!(open_at("LSE", utc(2024, 12, 24, 12, 0)).unwrap());
    assert!(!open_at("LSE", utc(2024, 12, 24, 13, 0)).unwrap());
    let cal = ExchangeCalendars::new().find("XLON").unwrap();
    assert!(!cal.is_session(day(2024, 12, 26)).unwrap());
    assert!(!cal.is_session(day(2024, 8, 26)).unwrap());
}

#[test]
fn xetra_asx_b3_and_sse_closures() {
    let cals = ExchangeCalendars::new();
    let closed = [
        ("XETR", day(2024, 12, 24)),
        ("XETR", day(2024, 5, 1)),
        ("ASX", day(2024, 4, 25)),
        ("ASX", day(2024, 6, 10)),
        ("B3", day(2024, 2, 12)),
        ("B3", day(2024, 2, 13)),
        ("B3", day(2024, 11, 20)),
        ("SSE", day(2024, 2, 12)),
        ("SSE", day(2024, 10, 3)),
        ("SSE", day(2024, 4, 4)),
    ];
    for (id, d) in closed {
        assert!(!cals.find(id).unwrap().is_session(d).unwrap(), "{id} {d}");
    }
    assert!(cals.find("SSE").unwrap().is_session(day(2024, 2, 19)).unwrap());
}

#[test]
fn b3_ash_wednesday_opens_late() {
    // 13:00 in São Paulo (UTC-3)
    assert!(!open_at("B3", utc(2024, 2, 14, 15, 0)).unwrap());
    assert!(open_at("B3", utc(2024, 2, 14, 16, 0)).unwrap());
}

#[test]
fn always_open_trades_on_weekends() {
    assert!(open_at("24/7", utc(2024, 3, 16, 0, 0)).unwrap());
    assert!(open_at("24/7", utc(2024, 3, 17, 23, 59)).unwrap());
}

#[test]
fn out_of_range_years_and_reversed_windows() {
    let cal = ExchangeCalendars::new().get_calendar("NYSE").unwrap();
    assert!(matches!(
        cal.schedule(day(1989, 12, 30), day(1990, 1, 2)),
        Err(BoardError::OutOfRange(_))
    ));
    assert!(matches!(
        cal.schedule(day(2099, 12, 30), day(2100, 1, 2)),
        Err(BoardError::OutOfRange(_))
    ));
    assert!(matches!(
        cal.schedule(day(2024, 3, 2), day(2024, 3, 1)),
        Err(BoardError::InvalidArg(_))
    ));
}
