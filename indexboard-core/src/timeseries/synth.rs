use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, Utc};

use crate::types::{PriceSeries, SeriesSource};

/// Flat series holding `value` every minute from `day` 00:00 UTC up to `now`.
///
/// The last point is the latest whole-minute step not after `now`. Returns the
/// empty series when `now` precedes the start of `day` or `value` is not finite.
#[must_use]
pub fn flat_minute_series(
    source: SeriesSource,
    value: f64,
    day: NaiveDate,
    now: DateTime<Utc>,
) -> PriceSeries {
    let start = day.and_time(NaiveTime::MIN).and_utc();
    PriceSeries::flat(source, value, start, now, TimeDelta::minutes(1))
}
