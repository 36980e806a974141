// Shared fixtures for the board integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use indexboard::{FixedClock, PriceTable, Session};
use indexboard_mock::MockCalendars;

pub const GSPC: &str = "^GSPC";
pub const N225: &str = "^N225";

/// Construct a UTC `DateTime` from components for readability in tests.
pub fn dt(y: i32, m: u32, d: u32, hh: u32, mm: u32, ss: u32) -> DateTime<Utc> {
    let date = chrono::NaiveDate::from_ymd_opt(y, m, d).expect("invalid date");
    date.and_hms_opt(hh, mm, ss)
        .expect("invalid time components")
        .and_utc()
}

pub fn clock_at(now: DateTime<Utc>) -> Arc<FixedClock> {
    Arc::new(FixedClock::new(now))
}

/// UTC-stamped table with one close column.
pub fn closes(rows: &[(DateTime<Utc>, f64)]) -> PriceTable {
    PriceTable::from_closes(None, rows.iter().map(|&(ts, v)| (ts, Some(v))))
}

/// `n` bars every `step` starting at `start`, priced `base + i`.
pub fn bars(start: DateTime<Utc>, step: TimeDelta, n: usize, base: f64) -> PriceTable {
    let rows: Vec<(DateTime<Utc>, f64)> = (0..n)
        .map(|i| (start + step * i as i32, base + i as f64))
        .collect();
    closes(&rows)
}

/// NYSE-like regular session on the given UTC date: 14:30..21:00.
pub fn us_session(y: i32, m: u32, d: u32) -> Session {
    Session::new(dt(y, m, d, 14, 30, 0), dt(y, m, d, 21, 0, 0))
}

pub fn one_calendar(id: &str, sessions: Vec<Session>) -> Arc<MockCalendars> {
    Arc::new(MockCalendars::new().with_sessions(id, sessions))
}
