mod helpers;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::TimeDelta;
use helpers::{GSPC, N225, bars, clock_at, closes, dt};
use indexboard::{
    BoardError, Interval, Lookback, PriceFeed, PriceTable, SeriesResolver, SeriesSource,
};
use indexboard_mock::{DynamicMockFeed, MockBehavior, MockFeed};

fn thursday() -> chrono::DateTime<chrono::Utc> {
    dt(2024, 3, 14, 15, 0, 0)
}

#[tokio::test]
async fn one_minute_bars_for_today_are_returned_unmodified() {
    let (feed, ctl) = DynamicMockFeed::new_with_controller("dyn");
    let mut rows: Vec<_> = (0..10)
        .map(|i| (dt(2024, 3, 13, 19, 0, 0) + TimeDelta::minutes(i), 1.0))
        .collect();
    let today = bars(dt(2024, 3, 14, 13, 30, 0), TimeDelta::minutes(1), 30, 5000.0);
    rows.extend(
        today
            .first_close()
            .unwrap()
            .into_iter()
            .map(|(ts, v)| (ts, v.unwrap())),
    );
    ctl.set_table(GSPC, Interval::OneMinute, Lookback::SevenDays, closes(&rows))
        .await;

    let resolver = SeriesResolver::new(feed, clock_at(thursday()));
    let series = resolver.resolve(GSPC).await;

    assert_eq!(series.source(), SeriesSource::Intraday(Interval::OneMinute));
    assert_eq!(series.len(), 30);
    assert_eq!(series.first().unwrap().ts, dt(2024, 3, 14, 13, 30, 0));
    assert_eq!(series.first().unwrap().price, 5000.0);
    assert_eq!(series.last().unwrap().price, 5029.0);
    assert_eq!(
        ctl.calls().await,
        vec![(GSPC.to_string(), Interval::OneMinute, Lookback::SevenDays)]
    );
}

#[tokio::test]
async fn five_minutes_used_when_one_minute_is_empty() {
    let (feed, ctl) = DynamicMockFeed::new_with_controller("dyn");
    ctl.set_table(GSPC, Interval::OneMinute, Lookback::SevenDays, PriceTable::empty())
        .await;
    ctl.set_table(
        GSPC,
        Interval::FiveMinutes,
        Lookback::SevenDays,
        bars(dt(2024, 3, 14, 13, 30, 0), TimeDelta::minutes(5), 12, 100.0),
    )
    .await;

    let series = SeriesResolver::new(feed, clock_at(thursday()))
        .resolve(GSPC)
        .await;

    assert_eq!(series.source(), SeriesSource::Intraday(Interval::FiveMinutes));
    assert_eq!(series.len(), 12);
    assert_eq!(ctl.call_count().await, 2);
}

#[tokio::test]
async fn provider_errors_count_as_no_data() {
    let (feed, ctl) = DynamicMockFeed::new_with_controller("dyn");
    ctl.set_behavior(
        GSPC,
        Interval::OneMinute,
        Lookback::SevenDays,
        MockBehavior::Fail(BoardError::connector("dyn", "rate limited")),
    )
    .await;
    ctl.set_table(
        GSPC,
        Interval::FiveMinutes,
        Lookback::SevenDays,
        bars(dt(2024, 3, 14, 14, 0, 0), TimeDelta::minutes(5), 3, 100.0),
    )
    .await;

    let series = SeriesResolver::new(feed, clock_at(thursday()))
        .resolve(GSPC)
        .await;
    assert_eq!(series.source(), SeriesSource::Intraday(Interval::FiveMinutes));
}

#[tokio::test]
async fn bars_from_earlier_days_do_not_count_as_today() {
    let (feed, ctl) = DynamicMockFeed::new_with_controller("dyn");
    let yesterday = bars(dt(2024, 3, 13, 13, 30, 0), TimeDelta::minutes(1), 60, 1.0);
    ctl.set_table(GSPC, Interval::OneMinute, Lookback::SevenDays, yesterday.clone())
        .await;
    ctl.set_table(GSPC, Interval::FiveMinutes, Lookback::SevenDays, yesterday)
        .await;
    ctl.set_table(
        GSPC,
        Interval::OneDay,
        Lookback::OneDay,
        closes(&[(dt(2024, 3, 14, 13, 30, 0), 5100.0)]),
    )
    .await;

    let series = SeriesResolver::new(feed, clock_at(thursday()))
        .resolve(GSPC)
        .await;

    assert_eq!(series.source(), SeriesSource::DailyToday);
    assert_eq!(series.first().unwrap().ts, dt(2024, 3, 14, 0, 0, 0));
    assert_eq!(series.last().unwrap().ts, thursday());
    assert_eq!(series.len(), 15 * 60 + 1);
    assert!(series.values().all(|v| v == 5100.0));
    assert!(series.is_degraded());
}

#[tokio::test]
async fn stale_daily_uses_the_last_valid_close() {
    let (feed, ctl) = DynamicMockFeed::new_with_controller("dyn");
    ctl.set_table(N225, Interval::OneDay, Lookback::OneDay, PriceTable::empty())
        .await;
    let five = PriceTable::from_closes(
        None,
        vec![
            (dt(2024, 3, 11, 0, 0, 0), Some(38_800.0)),
            (dt(2024, 3, 12, 0, 0, 0), Some(38_900.0)),
            (dt(2024, 3, 13, 0, 0, 0), None),
        ],
    );
    ctl.set_table(N225, Interval::OneDay, Lookback::FiveDays, five)
        .await;

    let now = dt(2024, 3, 14, 0, 10, 30);
    let series = SeriesResolver::new(feed, clock_at(now)).resolve(N225).await;

    assert_eq!(series.source(), SeriesSource::StaleDaily);
    assert_eq!(series.len(), 11);
    assert!(series.values().all(|v| v == 38_900.0));
    assert_eq!(series.last().unwrap().ts, dt(2024, 3, 14, 0, 10, 0));
}

#[tokio::test]
async fn nothing_anywhere_yields_the_empty_series_after_four_calls() {
    let (feed, ctl) = DynamicMockFeed::new_with_controller("dyn");
    let series = SeriesResolver::new(feed, clock_at(thursday()))
        .resolve("000852.SS")
        .await;

    assert!(series.is_empty());
    assert_eq!(series.source(), SeriesSource::Empty);
    let calls: Vec<_> = ctl
        .calls()
        .await
        .into_iter()
        .map(|(_, iv, lb)| (iv, lb))
        .collect();
    assert_eq!(
        calls,
        vec![
            (Interval::OneMinute, Lookback::SevenDays),
            (Interval::FiveMinutes, Lookback::SevenDays),
            (Interval::OneDay, Lookback::OneDay),
            (Interval::OneDay, Lookback::FiveDays),
        ]
    );
}

#[tokio::test]
async fn weekend_shows_a_flat_line_at_the_daily_close() {
    let (feed, ctl) = DynamicMockFeed::new_with_controller("dyn");
    let friday = bars(dt(2024, 3, 15, 13, 30, 0), TimeDelta::minutes(1), 390, 4400.0);
    ctl.set_table(GSPC, Interval::OneMinute, Lookback::SevenDays, friday.clone())
        .await;
    ctl.set_table(GSPC, Interval::FiveMinutes, Lookback::SevenDays, friday)
        .await;
    ctl.set_table(
        GSPC,
        Interval::OneDay,
        Lookback::OneDay,
        closes(&[(dt(2024, 3, 15, 13, 30, 0), 4500.0)]),
    )
    .await;

    let saturday_noon = dt(2024, 3, 16, 12, 0, 0);
    let series = SeriesResolver::new(feed, clock_at(saturday_noon))
        .resolve(GSPC)
        .await;

    assert_eq!(series.source(), SeriesSource::DailyToday);
    assert_eq!(series.first().unwrap().ts, dt(2024, 3, 16, 0, 0, 0));
    assert_eq!(series.last().unwrap().ts, saturday_noon);
    assert_eq!(series.len(), 12 * 60 + 1);
    assert!(series.values().all(|v| v == 4500.0));
}

#[tokio::test]
async fn rows_are_dated_in_the_table_timezone() {
    let (feed, ctl) = DynamicMockFeed::new_with_controller("dyn");
    // 2024-03-13 23:00 UTC is already the 14th in Tokyo.
    let rows = vec![
        (dt(2024, 3, 13, 14, 0, 0), Some(1.0)),
        (dt(2024, 3, 13, 23, 0, 0), Some(2.0)),
        (dt(2024, 3, 14, 1, 0, 0), Some(3.0)),
    ];
    ctl.set_table(
        N225,
        Interval::OneMinute,
        Lookback::SevenDays,
        PriceTable::from_closes(Some(chrono_tz::Asia::Tokyo), rows),
    )
    .await;

    let series = SeriesResolver::new(feed, clock_at(thursday()))
        .resolve(N225)
        .await;
    assert_eq!(series.values().collect::<Vec<_>>(), vec![2.0, 3.0]);
}

#[tokio::test]
async fn resolving_twice_gives_the_same_series() {
    let clock = clock_at(thursday());
    let feed = Arc::new(MockFeed::with_clock(clock.clone()));
    let resolver = SeriesResolver::new(feed, clock);
    for ticker in [GSPC, "^IXIC", "^FTSE", N225, "000852.SS"] {
        let a = resolver.resolve(ticker).await;
        let b = resolver.resolve(ticker).await;
        assert_eq!(a, b, "{ticker}");
    }
}

#[tokio::test]
async fn fixture_markets_land_on_the_expected_steps() {
    let clock = clock_at(thursday());
    let resolver = SeriesResolver::new(Arc::new(MockFeed::with_clock(clock.clone())), clock);

    let cases = [
        (GSPC, SeriesSource::Intraday(Interval::OneMinute)),
        ("^IXIC", SeriesSource::Intraday(Interval::FiveMinutes)),
        ("^FTSE", SeriesSource::DailyToday),
        (N225, SeriesSource::StaleDaily),
        ("000852.SS", SeriesSource::Empty),
        ("FAIL", SeriesSource::Empty),
        ("NOPE", SeriesSource::Empty),
    ];
    for (ticker, expected) in cases {
        assert_eq!(resolver.resolve(ticker).await.source(), expected, "{ticker}");
    }
}

#[tokio::test]
async fn today_follows_the_clock_between_calls() {
    let (feed, ctl) = DynamicMockFeed::new_with_controller("dyn");
    ctl.set_table(
        GSPC,
        Interval::OneMinute,
        Lookback::SevenDays,
        bars(dt(2024, 3, 14, 13, 30, 0), TimeDelta::minutes(1), 5, 10.0),
    )
    .await;
    ctl.set_table(
        GSPC,
        Interval::OneDay,
        Lookback::OneDay,
        closes(&[(dt(2024, 3, 14, 13, 30, 0), 14.0)]),
    )
    .await;

    let clock = clock_at(thursday());
    let resolver = SeriesResolver::new(feed, clock.clone());
    assert!(!resolver.resolve(GSPC).await.is_degraded());

    clock.set(dt(2024, 3, 15, 0, 30, 0));
    let series = resolver.resolve(GSPC).await;
    assert_eq!(series.source(), SeriesSource::DailyToday);
    assert_eq!(series.len(), 31);
}

#[tokio::test]
async fn custom_cascade_drops_daily_entries_and_skips_finer_steps() {
    let (feed, ctl) = DynamicMockFeed::new_with_controller("dyn");
    let resolver = SeriesResolver::new(feed, clock_at(thursday()))
        .with_cascade(&[Interval::FiveMinutes, Interval::OneDay]);
    assert_eq!(resolver.cascade(), &[Interval::FiveMinutes]);

    let _ = resolver.resolve(GSPC).await;
    let calls = ctl.calls().await;
    assert!(calls.iter().all(|(_, iv, _)| *iv != Interval::OneMinute));
    assert_eq!(calls.len(), 3);
}

struct NoOneMinute(Arc<dyn PriceFeed>);

#[async_trait]
impl PriceFeed for NoOneMinute {
    fn name(&self) -> &'static str {
        "no-1m"
    }

    async fn download(
        &self,
        ticker: &str,
        interval: Interval,
        lookback: Lookback,
    ) -> Result<PriceTable, BoardError> {
        self.0.download(ticker, interval, lookback).await
    }

    fn supported_intervals(&self) -> &'static [Interval] {
        &[Interval::FiveMinutes, Interval::OneDay]
    }
}

#[tokio::test]
async fn intervals_the_feed_cannot_serve_are_not_requested() {
    let (inner, ctl) = DynamicMockFeed::new_with_controller("dyn");
    ctl.set_table(
        GSPC,
        Interval::FiveMinutes,
        Lookback::SevenDays,
        bars(dt(2024, 3, 14, 13, 30, 0), TimeDelta::minutes(5), 4, 10.0),
    )
    .await;

    let series = SeriesResolver::new(Arc::new(NoOneMinute(inner)), clock_at(thursday()))
        .resolve(GSPC)
        .await;
    assert_eq!(series.source(), SeriesSource::Intraday(Interval::FiveMinutes));
    assert_eq!(ctl.call_count().await, 1);
}
