use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use indexboard_calendars::ExchangeCalendars;
use indexboard_core::{
    BoardConfig, BoardError, CalendarProvider, Clock, FetchStrategy, Interval, Layout,
    MarketConfig, PriceFeed, PriceSeries, SessionStatus, SystemClock, ViewRecord,
};
use indexboard_middleware::FeedBuilder;

use crate::series::SeriesResolver;
use crate::session::SessionStatusResolver;
use crate::snapshot::BoardSnapshot;

/// Dashboard orchestrator: resolves every configured market once per tick.
pub struct Board {
    series: SeriesResolver,
    sessions: SessionStatusResolver,
    clock: Arc<dyn Clock>,
    cfg: BoardConfig,
}

/// Builder for constructing a [`Board`].
pub struct BoardBuilder {
    feed: Option<Arc<dyn PriceFeed>>,
    calendars: Option<Arc<dyn CalendarProvider>>,
    clock: Arc<dyn Clock>,
    cache_downloads: bool,
    cfg: BoardConfig,
}

impl Default for BoardBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardBuilder {
    /// Create a new builder with default configuration.
    ///
    /// Behavior and trade-offs:
    /// - Starts with no price feed; register one via [`BoardBuilder::with_feed`].
    /// - Calendars default to the built-in exchange rules and the clock to the
    ///   system clock.
    /// - Downloads are not memoized unless [`BoardBuilder::cache_downloads`] is set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            feed: None,
            calendars: None,
            clock: Arc::new(SystemClock),
            cache_downloads: false,
            cfg: BoardConfig::default(),
        }
    }

    /// Register the price feed.
    #[must_use]
    pub fn with_feed(mut self, feed: Arc<dyn PriceFeed>) -> Self {
        self.feed = Some(feed);
        self
    }

    /// Replace the calendar provider.
    #[must_use]
    pub fn with_calendars(mut self, calendars: Arc<dyn CalendarProvider>) -> Self {
        self.calendars = Some(calendars);
        self
    }

    /// Replace the clock both resolvers read "now" from.
    #[must_use]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: BoardConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Markets shown on the board, in display order.
    #[must_use]
    pub fn markets(mut self, markets: Vec<MarketConfig>) -> Self {
        self.cfg.markets = markets;
        self
    }

    /// Period between refresh ticks; also the TTL of memoized downloads.
    #[must_use]
    pub const fn refresh_every(mut self, every: Duration) -> Self {
        self.cfg.refresh_every = every;
        self
    }

    /// Half-width, in days, of the schedule window around "now".
    ///
    /// Wider windows cost more calendar work per tick but survive sessions
    /// that straddle midnight UTC by more than a day.
    #[must_use]
    pub const fn schedule_window_days(mut self, days: u32) -> Self {
        self.cfg.schedule_window_days = days;
        self
    }

    /// Intraday granularities tried before falling back to daily data.
    #[must_use]
    pub fn intraday_cascade(mut self, cascade: &[Interval]) -> Self {
        self.cfg.intraday_cascade = cascade.to_vec();
        self
    }

    /// Section arrangement of snapshots.
    #[must_use]
    pub const fn layout(mut self, layout: Layout) -> Self {
        self.cfg.layout = layout;
        self
    }

    /// Select sequential or concurrent resolution of markets.
    ///
    /// Behavior and trade-offs:
    /// - `Sequential`: one market at a time; gentle on provider rate limits.
    /// - `Concurrent`: all markets at once; a tick takes as long as the slowest
    ///   market. Record order still follows the configuration.
    #[must_use]
    pub const fn fetch_strategy(mut self, strategy: FetchStrategy) -> Self {
        self.cfg.fetch_strategy = strategy;
        self
    }

    /// Memoize downloads for `refresh_every`, so a tick never repeats a call
    /// made by the previous one within the TTL.
    #[must_use]
    pub const fn cache_downloads(mut self, yes: bool) -> Self {
        self.cache_downloads = yes;
        self
    }

    /// Build the `Board`.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no feed has been registered via
    /// [`BoardBuilder::with_feed`] or the refresh period is zero.
    pub fn build(self) -> Result<Board, BoardError> {
        let Some(raw) = self.feed else {
            return Err(BoardError::InvalidArg(
                "no price feed registered; add one via with_feed(...)".to_string(),
            ));
        };
        if self.cfg.refresh_every.is_zero() {
            return Err(BoardError::InvalidArg(
                "refresh_every must be positive".to_string(),
            ));
        }

        let feed = if self.cache_downloads {
            FeedBuilder::new(raw).with_cache(&self.cfg.cache()).build()
        } else {
            raw
        };
        let calendars: Arc<dyn CalendarProvider> = match self.calendars {
            Some(c) => c,
            None => Arc::new(ExchangeCalendars::new()),
        };

        let series = SeriesResolver::new(feed, Arc::clone(&self.clock))
            .with_cascade(&self.cfg.intraday_cascade);
        let sessions = SessionStatusResolver::new(calendars, Arc::clone(&self.clock))
            .with_window_days(self.cfg.schedule_window_days);

        Ok(Board {
            series,
            sessions,
            clock: self.clock,
            cfg: self.cfg,
        })
    }
}

impl Board {
    /// Start building a new `Board`.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use indexboard::{Board, Layout};
    /// use indexboard_yfinance::YfFeed;
    ///
    /// let board = Board::builder()
    ///     .with_feed(Arc::new(YfFeed::try_new_default()?))
    ///     .layout(Layout::Flat)
    ///     .cache_downloads(true)
    ///     .build()?;
    /// let snapshot = board.refresh().await;
    /// ```
    #[must_use]
    pub fn builder() -> BoardBuilder {
        BoardBuilder::new()
    }

    /// Effective configuration.
    #[must_use]
    pub const fn config(&self) -> &BoardConfig {
        &self.cfg
    }

    /// The series resolver used for every market.
    #[must_use]
    pub const fn series_resolver(&self) -> &SeriesResolver {
        &self.series
    }

    /// The status resolver used for every market.
    #[must_use]
    pub const fn session_resolver(&self) -> &SessionStatusResolver {
        &self.sessions
    }

    /// Today's series for `ticker`; see [`SeriesResolver::resolve`].
    pub async fn resolve_series(&self, ticker: &str) -> PriceSeries {
        self.series.resolve(ticker).await
    }

    /// Current status of `calendar_id`; see [`SessionStatusResolver::status`].
    pub fn status(&self, calendar_id: &str) -> SessionStatus {
        self.sessions.status(calendar_id)
    }

    /// View record for one market, or `None` when it has no data at all.
    pub async fn view(&self, market: &MarketConfig) -> Option<ViewRecord> {
        let series = self.series.resolve(&market.ticker).await;
        if series.is_empty() {
            return None;
        }
        let status = self.sessions.status(&market.calendar);
        ViewRecord::build(market, &series, status)
    }

    /// Resolve every configured market once.
    ///
    /// Markets without data are listed in `missing` rather than failing the
    /// tick. Records keep the configured order under both fetch strategies.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "indexboard::board::refresh",
            skip(self),
            fields(markets = self.cfg.markets.len(), strategy = ?self.cfg.fetch_strategy),
        )
    )]
    pub async fn refresh(&self) -> BoardSnapshot {
        let generated_at = self.clock.now();
        let markets = &self.cfg.markets;

        let views: Vec<Option<ViewRecord>> = match self.cfg.fetch_strategy {
            FetchStrategy::Concurrent => join_all(markets.iter().map(|m| self.view(m))).await,
            _ => {
                let mut out = Vec::with_capacity(markets.len());
                for m in markets {
                    out.push(self.view(m).await);
                }
                out
            }
        };

        let mut records = Vec::with_capacity(views.len());
        let mut missing = Vec::new();
        for (market, view) in markets.iter().zip(views) {
            match view {
                Some(record) => records.push(record),
                None => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(ticker = %market.ticker, "no data found; market skipped");
                    missing.push(market.ticker.clone());
                }
            }
        }

        BoardSnapshot {
            generated_at,
            layout: self.cfg.layout,
            records,
            missing,
        }
    }
}
