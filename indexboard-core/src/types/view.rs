use chrono::{DateTime, Utc};

use indexboard_types::MarketConfig;

use super::series::{PricePoint, PriceSeries, SeriesSource};
use super::session::SessionStatus;

/// Per-market view model handed to the presentation layer for one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewRecord {
    /// Display name.
    pub name: String,
    /// Price-feed identifier.
    pub ticker: String,
    /// Country code.
    pub country: String,
    /// Flag image URL.
    pub flag_url: String,
    /// Most recent price.
    pub last_price: f64,
    /// Percent change of the most recent price against today's open.
    pub delta_pct: f64,
    /// Percent change of every point against today's open.
    pub pct_series: Vec<PricePoint>,
    /// Typed market status.
    pub status: SessionStatus,
    /// `status.is_open()`, kept as a plain flag for renderers.
    pub is_open: bool,
    /// Timestamp of the most recent observation.
    pub last_ts: DateTime<Utc>,
    /// Cascade step that produced the series.
    pub source: SeriesSource,
}

impl ViewRecord {
    /// Combine a resolved series and status; `None` for an empty series.
    #[must_use]
    pub fn build(market: &MarketConfig, series: &PriceSeries, status: SessionStatus) -> Option<Self> {
        let last = series.last()?;
        let pct_series = series.pct_change_from_open();
        let delta_pct = pct_series.last().map_or(0.0, |p| p.price);
        Some(Self {
            name: market.name.clone(),
            ticker: market.ticker.clone(),
            country: market.country.clone(),
            flag_url: market.flag_url(),
            last_price: last.price,
            delta_pct,
            pct_series,
            status,
            is_open: status.is_open(),
            last_ts: last.ts,
            source: series.source(),
        })
    }

    /// Label shown under the metric.
    #[must_use]
    pub const fn status_label(&self) -> &'static str {
        if self.is_open { "Open" } else { "Closed" }
    }
}
