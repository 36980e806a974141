use std::sync::Arc;

use chrono::NaiveDate;
use indexboard_core::{
    Clock, Interval, Lookback, PriceFeed, PriceSeries, PriceTable, SeriesSource,
    flat_minute_series, points_on_day,
};

/// Intraday granularities tried when no cascade is configured.
pub const DEFAULT_CASCADE: &[Interval] = &[Interval::OneMinute, Interval::FiveMinutes];

/// Resolves "today's" price series for a ticker, degrading gracefully.
///
/// The cascade, stopping at the first step that yields data:
/// 1. each configured intraday interval over a seven-day window, filtered to
///    rows dated today in the table's own timezone;
/// 2. the first close of a one-day daily window, as a flat one-minute line from
///    00:00 UTC to now;
/// 3. the last close of a five-day daily window, same flat shape;
/// 4. the empty series.
///
/// Every step makes at most one provider call. Provider errors are logged and
/// treated as "no data" for that step.
pub struct SeriesResolver {
    feed: Arc<dyn PriceFeed>,
    clock: Arc<dyn Clock>,
    cascade: Vec<Interval>,
}

impl SeriesResolver {
    /// Resolver over `feed`, reading "now" from `clock`, with the default cascade.
    #[must_use]
    pub fn new(feed: Arc<dyn PriceFeed>, clock: Arc<dyn Clock>) -> Self {
        Self {
            feed,
            clock,
            cascade: DEFAULT_CASCADE.to_vec(),
        }
    }

    /// Replace the intraday cascade. Daily intervals are ignored.
    #[must_use]
    pub fn with_cascade(mut self, cascade: &[Interval]) -> Self {
        self.cascade = cascade
            .iter()
            .copied()
            .filter(|iv| iv.is_intraday())
            .collect();
        self
    }

    /// Intraday intervals tried, finest first.
    #[must_use]
    pub fn cascade(&self) -> &[Interval] {
        &self.cascade
    }

    /// Today's series for `ticker`. Never fails; "no data" is the empty series.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "indexboard::series::resolve",
            skip(self),
            fields(feed = self.feed.name()),
        )
    )]
    pub async fn resolve(&self, ticker: &str) -> PriceSeries {
        let now = self.clock.now();
        let today = now.date_naive();
        let supported = self.feed.supported_intervals();

        for &interval in &self.cascade {
            if !supported.contains(&interval) {
                #[cfg(feature = "tracing")]
                tracing::debug!(%interval, "interval not served by feed; skipping");
                continue;
            }
            if let Some(series) = self.intraday(ticker, interval, today).await {
                return series;
            }
        }

        if let Some(close) = self
            .daily(ticker, Lookback::OneDay)
            .await
            .and_then(|closes| closes.first().copied())
        {
            #[cfg(feature = "tracing")]
            tracing::debug!(close, "no intraday data; using today's daily close");
            return flat_minute_series(SeriesSource::DailyToday, close, today, now);
        }

        if let Some(close) = self
            .daily(ticker, Lookback::FiveDays)
            .await
            .and_then(|closes| closes.last().copied())
        {
            #[cfg(feature = "tracing")]
            tracing::debug!(close, "no data for today; using the last close of the past five days");
            return flat_minute_series(SeriesSource::StaleDaily, close, today, now);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!("no data at any granularity");
        PriceSeries::empty()
    }

    async fn intraday(
        &self,
        ticker: &str,
        interval: Interval,
        today: NaiveDate,
    ) -> Option<PriceSeries> {
        let table = self.fetch(ticker, interval, Lookback::SevenDays).await?;
        let rows = table.first_close()?;
        let points = points_on_day(&rows, table.timezone(), today);
        if points.is_empty() {
            #[cfg(feature = "tracing")]
            tracing::debug!(%interval, rows = rows.len(), "no intraday rows for today");
            return None;
        }
        match PriceSeries::try_new(SeriesSource::Intraday(interval), points) {
            Ok(series) => Some(series),
            #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(%interval, error = %err, "discarding malformed intraday series");
                None
            }
        }
    }

    async fn daily(&self, ticker: &str, lookback: Lookback) -> Option<Vec<f64>> {
        let closes = self
            .fetch(ticker, Interval::OneDay, lookback)
            .await?
            .valid_closes();
        (!closes.is_empty()).then_some(closes)
    }

    async fn fetch(&self, ticker: &str, interval: Interval, lookback: Lookback) -> Option<PriceTable> {
        match self.feed.download(ticker, interval, lookback).await {
            Ok(table) => Some(table),
            #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    %interval,
                    %lookback,
                    error = %err,
                    "download failed; treating as no data"
                );
                None
            }
        }
    }
}
