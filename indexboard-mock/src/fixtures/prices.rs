use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeDelta, Utc, Weekday};
use chrono_tz::Tz;

use indexboard_core::{Interval, Lookback, PriceTable};

/// Shape of the synthetic data served for one ticker.
pub struct Fixture {
    pub base: f64,
    pub timezone: Tz,
    /// Regular session in UTC, as (hour, minute) pairs.
    pub open_utc: (u32, u32),
    pub close_utc: (u32, u32),
    pub intraday: &'static [Interval],
    pub daily: bool,
    /// Serve nothing for a one-day daily window while the five-day window
    /// still has data (a provider that has not published today's bar yet).
    pub one_day_gap: bool,
}

const ONE_AND_FIVE: &[Interval] = &[Interval::OneMinute, Interval::FiveMinutes];
const FIVE_ONLY: &[Interval] = &[Interval::FiveMinutes];
const NONE: &[Interval] = &[];

pub fn by_ticker(ticker: &str) -> Option<Fixture> {
    use chrono_tz::{America, Asia, Australia, Europe};
    let f = |base, timezone, open_utc, close_utc, intraday, daily, one_day_gap| Fixture {
        base,
        timezone,
        open_utc,
        close_utc,
        intraday,
        daily,
        one_day_gap,
    };
    Some(match ticker {
        "^GSPC" => f(5200.0, America::New_York, (13, 30), (20, 0), ONE_AND_FIVE, true, false),
        "^IXIC" => f(16300.0, America::New_York, (13, 30), (20, 0), FIVE_ONLY, true, false),
        "^FTSE" => f(7900.0, Europe::London, (8, 0), (16, 30), NONE, true, false),
        "^GDAXI" => f(18000.0, Europe::Berlin, (8, 0), (16, 30), ONE_AND_FIVE, true, false),
        "^N225" => f(39000.0, Asia::Tokyo, (0, 0), (6, 0), NONE, true, true),
        "^AXJO" => f(7700.0, Australia::Sydney, (0, 0), (6, 0), ONE_AND_FIVE, true, false),
        "^BVSP" => f(127_000.0, America::Sao_Paulo, (13, 0), (20, 0), FIVE_ONLY, true, false),
        "000300.SS" => f(3500.0, Asia::Shanghai, (1, 30), (7, 0), ONE_AND_FIVE, true, false),
        "000852.SS" => f(5600.0, Asia::Shanghai, (1, 30), (7, 0), NONE, false, false),
        _ => return None,
    })
}

/// Deterministic wiggle around `base`, within +/- 0.5%.
fn price(base: f64, step: i64) -> f64 {
    let bucket = (step * 7919).rem_euclid(200) as f64;
    let raw = base * (1.0 + (bucket - 100.0) / 20_000.0);
    (raw * 100.0).round() / 100.0
}

fn is_weekday(d: NaiveDate) -> bool {
    !matches!(d.weekday(), Weekday::Sat | Weekday::Sun)
}

fn at(day: NaiveDate, (h, m): (u32, u32)) -> DateTime<Utc> {
    day.and_time(NaiveTime::from_hms_opt(h, m, 0).unwrap_or(NaiveTime::MIN))
        .and_utc()
}

impl Fixture {
    /// Table the fixture serves at `now`.
    pub fn table(&self, interval: Interval, lookback: Lookback, now: DateTime<Utc>) -> PriceTable {
        match interval.minutes() {
            Some(step) if self.intraday.contains(&interval) => self.intraday_table(step, lookback, now),
            Some(_) => PriceTable::empty(),
            None => self.daily_table(lookback, now),
        }
    }

    fn intraday_table(&self, step: i64, lookback: Lookback, now: DateTime<Utc>) -> PriceTable {
        let today = now.date_naive();
        let mut rows = Vec::new();
        for back in (0..lookback.days()).rev() {
            let day = today - TimeDelta::days(back);
            if !is_weekday(day) {
                continue;
            }
            let mut ts = at(day, self.open_utc);
            let close = at(day, self.close_utc);
            while ts < close && ts <= now {
                let n = ts.timestamp() / 60;
                rows.push((ts, Some(price(self.base, n))));
                ts += TimeDelta::minutes(step);
            }
        }
        PriceTable::from_closes(Some(self.timezone), rows)
    }

    /// One bar per trading day, stamped at the session open. Like Yahoo, an
    /// `n`-day window returns the last `n` trading days rather than calendar days.
    fn daily_table(&self, lookback: Lookback, now: DateTime<Utc>) -> PriceTable {
        if !self.daily || (self.one_day_gap && lookback == Lookback::OneDay) {
            return PriceTable::empty();
        }
        let mut day = now.date_naive();
        let mut rows = Vec::new();
        while rows.len() < lookback.days() as usize {
            let open = at(day, self.open_utc);
            if is_weekday(day) && open <= now {
                let n = i64::from(day.num_days_from_ce());
                rows.push((open, Some(price(self.base, n))));
            }
            day -= TimeDelta::days(1);
        }
        rows.reverse();
        PriceTable::from_closes(Some(self.timezone), rows)
    }
}
