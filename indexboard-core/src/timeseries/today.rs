use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::types::PricePoint;

/// Keep the rows whose calendar date, read in `tz`, equals `day`.
///
/// Missing and non-finite values are dropped. The result is sorted by timestamp
/// with duplicate timestamps collapsed to their last observation, so it always
/// satisfies the `PriceSeries` ordering invariant. `tz = None` reads dates in UTC.
#[must_use]
pub fn points_on_day(
    rows: &[(DateTime<Utc>, Option<f64>)],
    tz: Option<Tz>,
    day: NaiveDate,
) -> Vec<PricePoint> {
    let tz = tz.unwrap_or(chrono_tz::UTC);
    let mut out: Vec<PricePoint> = rows
        .iter()
        .filter(|(ts, _)| ts.with_timezone(&tz).date_naive() == day)
        .filter_map(|&(ts, v)| v.filter(|x| x.is_finite()).map(|x| PricePoint::new(ts, x)))
        .collect();
    out.sort_by_key(|p| p.ts);
    // dedup_by keeps the first of a run; walk backwards to keep the last instead
    out.reverse();
    out.dedup_by_key(|p| p.ts);
    out.reverse();
    out
}
