mod helpers;

use std::sync::Arc;

use chrono::TimeDelta;
use helpers::{GSPC, bars, clock_at, closes, dt, one_calendar, us_session};
use indexboard::{
    Board, BoardError, CLOSED_SECTION, FetchStrategy, Interval, Layout, Lookback, MarketConfig,
    OPEN_SECTION, SeriesSource, SessionStatus, world_indices,
};
use indexboard_mock::{DynamicMockFeed, MockFeed};

fn thursday() -> chrono::DateTime<chrono::Utc> {
    dt(2024, 3, 14, 15, 0, 0)
}

fn mock_board(now: chrono::DateTime<chrono::Utc>, layout: Layout, strategy: FetchStrategy) -> Board {
    let clock = clock_at(now);
    Board::builder()
        .with_feed(Arc::new(MockFeed::with_clock(clock.clone())))
        .clock(clock)
        .layout(layout)
        .fetch_strategy(strategy)
        .build()
        .unwrap()
}

fn names<'a>(records: impl IntoIterator<Item = &'a indexboard::ViewRecord>) -> Vec<&'a str> {
    records.into_iter().map(|r| r.name.as_str()).collect()
}

#[test]
fn build_requires_a_feed() {
    let err = Board::builder().build().err().unwrap();
    assert!(matches!(err, BoardError::InvalidArg(_)));
}

#[test]
fn build_rejects_a_zero_refresh_period() {
    let (feed, _ctl) = DynamicMockFeed::new_with_controller("dyn");
    let err = Board::builder()
        .with_feed(feed)
        .refresh_every(std::time::Duration::ZERO)
        .build()
        .err()
        .unwrap();
    assert!(matches!(err, BoardError::InvalidArg(_)));
}

#[test]
fn builder_settings_reach_the_resolvers() {
    let (feed, _ctl) = DynamicMockFeed::new_with_controller("dyn");
    let board = Board::builder()
        .with_feed(feed)
        .schedule_window_days(3)
        .intraday_cascade(&[Interval::FiveMinutes])
        .build()
        .unwrap();
    assert_eq!(board.session_resolver().window_days(), 3);
    assert_eq!(board.series_resolver().cascade(), &[Interval::FiveMinutes]);
    assert_eq!(board.config().markets, world_indices());
}

#[tokio::test]
async fn grouped_snapshot_splits_open_and_closed_markets() {
    let board = mock_board(thursday(), Layout::Grouped, FetchStrategy::Sequential);
    let snap = board.refresh().await;

    assert_eq!(snap.generated_at, thursday());
    assert_eq!(snap.missing, vec!["000852.SS".to_string()]);
    assert_eq!(snap.records.len(), 8);

    let groups = snap.groups();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].title, Some(OPEN_SECTION));
    assert_eq!(
        names(groups[0].records.iter().copied()),
        vec!["S&P 500", "NASDAQ", "FTSE 100", "DAX", "IBOVESPA"]
    );
    assert_eq!(groups[1].title, Some(CLOSED_SECTION));
    assert_eq!(
        names(groups[1].records.iter().copied()),
        vec!["Nikkei 225", "S&P/ASX 200", "CSI 300"]
    );

    let ftse = snap.records.iter().find(|r| r.ticker == "^FTSE").unwrap();
    assert_eq!(ftse.source, SeriesSource::DailyToday);
    assert_eq!(ftse.delta_pct, 0.0);
    assert!(ftse.pct_series.iter().all(|p| p.price == 0.0));
    assert_eq!(ftse.flag_url, "https://flagcdn.com/20x15/gb.png");
    assert_eq!(ftse.status_label(), "Open");
}

#[tokio::test]
async fn flat_layout_is_a_single_untitled_section() {
    let board = mock_board(thursday(), Layout::Flat, FetchStrategy::Sequential);
    let snap = board.refresh().await;
    let groups = snap.groups();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].title, None);
    assert_eq!(groups[0].records.len(), snap.records.len());
}

#[tokio::test]
async fn concurrent_refresh_keeps_configuration_order() {
    let sequential = mock_board(thursday(), Layout::Grouped, FetchStrategy::Sequential)
        .refresh()
        .await;
    let concurrent = mock_board(thursday(), Layout::Grouped, FetchStrategy::Concurrent)
        .refresh()
        .await;
    assert_eq!(sequential, concurrent);
}

#[tokio::test]
async fn weekend_board_has_only_a_closed_section() {
    let board = mock_board(dt(2024, 3, 16, 12, 0, 0), Layout::Grouped, FetchStrategy::Sequential);
    let snap = board.refresh().await;
    let groups = snap.groups();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].title, Some(CLOSED_SECTION));
    assert_eq!(snap.open_markets().count(), 0);
    assert!(snap.records.iter().all(|r| r.source.is_degraded()));
}

#[tokio::test]
async fn percent_change_is_relative_to_the_first_observation() {
    let (feed, ctl) = DynamicMockFeed::new_with_controller("dyn");
    ctl.set_table(
        GSPC,
        Interval::OneMinute,
        Lookback::SevenDays,
        closes(&[
            (dt(2024, 3, 14, 13, 30, 0), 100.0),
            (dt(2024, 3, 14, 13, 31, 0), 105.0),
            (dt(2024, 3, 14, 13, 32, 0), 95.0),
        ]),
    )
    .await;

    let board = Board::builder()
        .with_feed(feed)
        .with_calendars(one_calendar("NYSE", vec![us_session(2024, 3, 14)]))
        .clock(clock_at(thursday()))
        .markets(vec![MarketConfig::new("S&P 500", GSPC, "NYSE", "us")])
        .build()
        .unwrap();
    let snap = board.refresh().await;
    let rec = &snap.records[0];

    let pct: Vec<f64> = rec.pct_series.iter().map(|p| p.price).collect();
    assert_eq!(pct, vec![0.0, 5.0, -5.0]);
    assert_eq!(rec.delta_pct, -5.0);
    assert_eq!(rec.last_price, 95.0);
    assert_eq!(rec.last_ts, dt(2024, 3, 14, 13, 32, 0));
    assert_eq!(rec.status, SessionStatus::Open);
    assert!(rec.is_open);
}

#[tokio::test]
async fn unknown_calendar_shows_as_closed_with_unknown_status() {
    let clock = clock_at(thursday());
    let board = Board::builder()
        .with_feed(Arc::new(MockFeed::with_clock(clock.clone())))
        .clock(clock)
        .markets(vec![MarketConfig::new("S&P 500", GSPC, "NOWHERE", "us")])
        .build()
        .unwrap();
    let snap = board.refresh().await;
    assert_eq!(snap.records[0].status, SessionStatus::Unknown);
    assert!(!snap.records[0].is_open);
    assert_eq!(snap.closed_markets().count(), 1);
}

#[tokio::test]
async fn cached_downloads_are_not_repeated_within_the_refresh_period() {
    let (feed, ctl) = DynamicMockFeed::new_with_controller("dyn");
    ctl.set_table(
        GSPC,
        Interval::OneMinute,
        Lookback::SevenDays,
        bars(dt(2024, 3, 14, 13, 30, 0), TimeDelta::minutes(1), 10, 5000.0),
    )
    .await;

    let board = Board::builder()
        .with_feed(feed)
        .with_calendars(one_calendar("NYSE", vec![us_session(2024, 3, 14)]))
        .clock(clock_at(thursday()))
        .markets(vec![MarketConfig::new("S&P 500", GSPC, "NYSE", "us")])
        .cache_downloads(true)
        .build()
        .unwrap();

    let first = board.refresh().await;
    let second = board.refresh().await;
    assert_eq!(first, second);
    assert_eq!(ctl.call_count().await, 1);
}
