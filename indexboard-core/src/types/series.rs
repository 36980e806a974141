use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};

use indexboard_types::{BoardError, Interval};

/// A single observation of a price series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    /// Observation time (UTC).
    pub ts: DateTime<Utc>,
    /// Observed price, or percent change for derived series.
    pub price: f64,
}

impl PricePoint {
    /// Build a point.
    #[must_use]
    pub const fn new(ts: DateTime<Utc>, price: f64) -> Self {
        Self { ts, price }
    }
}

/// Which step of the granularity cascade produced a series.
///
/// Anything other than `Intraday` is a degraded, synthetic flat line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeriesSource {
    /// Real intraday bars for today at the given interval.
    Intraday(Interval),
    /// Flat line built from the latest daily close.
    DailyToday,
    /// Flat line built from the last close of the trailing five days.
    StaleDaily,
    /// No data at any granularity.
    Empty,
}

impl SeriesSource {
    /// True for synthetic flat series.
    #[must_use]
    pub const fn is_degraded(self) -> bool {
        matches!(self, Self::DailyToday | Self::StaleDaily)
    }
}

impl fmt::Display for SeriesSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Intraday(iv) => write!(f, "intraday {iv}"),
            Self::DailyToday => f.write_str("daily close"),
            Self::StaleDaily => f.write_str("last daily close"),
            Self::Empty => f.write_str("no data"),
        }
    }
}

/// Ordered, UTC-indexed price series for today.
///
/// Invariants: timestamps strictly increasing, prices finite, and an empty series
/// always carries `SeriesSource::Empty`.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    source: SeriesSource,
    points: Vec<PricePoint>,
}

impl Default for PriceSeries {
    fn default() -> Self {
        Self::empty()
    }
}

impl PriceSeries {
    /// The "no data" series.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            source: SeriesSource::Empty,
            points: Vec::new(),
        }
    }

    /// Build a series after checking its invariants.
    ///
    /// An empty `points` vector yields [`PriceSeries::empty`] whatever the source.
    ///
    /// # Errors
    /// Returns `BoardError::Data` if timestamps are not strictly increasing or a
    /// price is not finite.
    pub fn try_new(source: SeriesSource, points: Vec<PricePoint>) -> Result<Self, BoardError> {
        if points.is_empty() {
            return Ok(Self::empty());
        }
        if let Some(p) = points.iter().find(|p| !p.price.is_finite()) {
            return Err(BoardError::Data(format!("non-finite price at {}", p.ts)));
        }
        if let Some(w) = points.windows(2).find(|w| w[1].ts <= w[0].ts) {
            return Err(BoardError::Data(format!(
                "timestamps not strictly increasing at {}",
                w[1].ts
            )));
        }
        Ok(Self { source, points })
    }

    /// Constant series from `start` to `end` (both inclusive when aligned) every `step`.
    ///
    /// Returns the empty series when `end < start`, `step` is not positive or
    /// `value` is not finite.
    #[must_use]
    pub fn flat(
        source: SeriesSource,
        value: f64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        step: TimeDelta,
    ) -> Self {
        if end < start || step <= TimeDelta::zero() || !value.is_finite() {
            return Self::empty();
        }
        let mut points = Vec::new();
        let mut ts = start;
        while ts <= end {
            points.push(PricePoint::new(ts, value));
            ts += step;
        }
        Self { source, points }
    }

    /// Step of the cascade that produced this series.
    #[must_use]
    pub const fn source(&self) -> SeriesSource {
        self.source
    }

    /// All points in time order.
    #[must_use]
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when there is no data.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// True for synthetic flat series.
    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        self.source.is_degraded()
    }

    /// Today's opening observation.
    #[must_use]
    pub fn first(&self) -> Option<PricePoint> {
        self.points.first().copied()
    }

    /// Most recent observation.
    #[must_use]
    pub fn last(&self) -> Option<PricePoint> {
        self.points.last().copied()
    }

    /// Prices in time order.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.price)
    }

    /// Percent change of every point relative to the opening observation.
    ///
    /// A zero opening price yields a flat zero series.
    #[must_use]
    pub fn pct_change_from_open(&self) -> Vec<PricePoint> {
        let Some(open) = self.first().map(|p| p.price) else {
            return Vec::new();
        };
        self.points
            .iter()
            .map(|p| {
                let pct = if open == 0.0 {
                    0.0
                } else {
                    (p.price - open) / open * 100.0
                };
                PricePoint::new(p.ts, pct)
            })
            .collect()
    }
}
