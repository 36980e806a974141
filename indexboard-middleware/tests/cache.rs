use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use indexboard_core::{BoardError, Interval, Lookback, PriceFeed, PriceTable};
use indexboard_middleware::{CachingFeed, FeedBuilder};
use indexboard_mock::{DynamicMockFeed, MockBehavior};
use indexboard_types::CacheConfig;

fn table(v: f64) -> PriceTable {
    let ts = Utc.with_ymd_and_hms(2024, 3, 14, 14, 30, 0).unwrap();
    PriceTable::from_closes(None, vec![(ts, Some(v))])
}

fn cfg(ttl: Duration) -> CacheConfig {
    CacheConfig {
        ttl,
        max_entries: 64,
    }
}

#[tokio::test]
async fn hit_within_ttl_does_not_call_the_provider_again() {
    let (raw, ctl) = DynamicMockFeed::new_with_controller("dyn");
    ctl.set_table("^GSPC", Interval::OneMinute, Lookback::SevenDays, table(1.0))
        .await;
    let feed = CachingFeed::new(raw, &cfg(Duration::from_secs(60)));

    let a = feed
        .download("^GSPC", Interval::OneMinute, Lookback::SevenDays)
        .await
        .unwrap();
    ctl.set_table("^GSPC", Interval::OneMinute, Lookback::SevenDays, table(2.0))
        .await;
    let b = feed
        .download("^GSPC", Interval::OneMinute, Lookback::SevenDays)
        .await
        .unwrap();

    assert_eq!(a, b);
    assert_eq!(ctl.call_count().await, 1);
}

#[tokio::test]
async fn keys_include_interval_and_lookback() {
    let (raw, ctl) = DynamicMockFeed::new_with_controller("dyn");
    ctl.set_table("^GSPC", Interval::OneDay, Lookback::OneDay, table(1.0))
        .await;
    ctl.set_table("^GSPC", Interval::OneDay, Lookback::FiveDays, table(5.0))
        .await;
    let feed = CachingFeed::new(raw, &cfg(Duration::from_secs(60)));

    let one = feed
        .download("^GSPC", Interval::OneDay, Lookback::OneDay)
        .await
        .unwrap();
    let five = feed
        .download("^GSPC", Interval::OneDay, Lookback::FiveDays)
        .await
        .unwrap();
    assert_eq!(one.valid_closes(), vec![1.0]);
    assert_eq!(five.valid_closes(), vec![5.0]);
    assert_eq!(ctl.call_count().await, 2);
}

#[tokio::test]
async fn expired_entries_are_fetched_again() {
    let (raw, ctl) = DynamicMockFeed::new_with_controller("dyn");
    ctl.set_table("^FTSE", Interval::OneDay, Lookback::OneDay, table(1.0))
        .await;
    let feed = CachingFeed::new(raw, &cfg(Duration::from_millis(50)));

    let _ = feed
        .download("^FTSE", Interval::OneDay, Lookback::OneDay)
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(120)).await;
    let _ = feed
        .download("^FTSE", Interval::OneDay, Lookback::OneDay)
        .await
        .unwrap();
    assert_eq!(ctl.call_count().await, 2);
}

#[tokio::test]
async fn errors_are_not_cached() {
    let (raw, ctl) = DynamicMockFeed::new_with_controller("dyn");
    ctl.set_behavior(
        "^N225",
        Interval::OneDay,
        Lookback::FiveDays,
        MockBehavior::Fail(BoardError::connector("dyn", "timeout")),
    )
    .await;
    let feed = CachingFeed::new(raw, &cfg(Duration::from_secs(60)));

    assert!(
        feed.download("^N225", Interval::OneDay, Lookback::FiveDays)
            .await
            .is_err()
    );
    ctl.set_table("^N225", Interval::OneDay, Lookback::FiveDays, table(3.0))
        .await;
    let t = feed
        .download("^N225", Interval::OneDay, Lookback::FiveDays)
        .await
        .unwrap();
    assert_eq!(t.valid_closes(), vec![3.0]);
    assert_eq!(ctl.call_count().await, 2);
}

#[tokio::test]
async fn zero_ttl_is_a_pass_through() {
    let (raw, ctl) = DynamicMockFeed::new_with_controller("dyn");
    ctl.set_table("^GSPC", Interval::OneDay, Lookback::OneDay, table(1.0))
        .await;
    let feed = CachingFeed::new(raw, &cfg(Duration::ZERO));
    for _ in 0..3 {
        let _ = feed
            .download("^GSPC", Interval::OneDay, Lookback::OneDay)
            .await
            .unwrap();
    }
    assert_eq!(ctl.call_count().await, 3);
}

#[tokio::test]
async fn invalidate_all_forces_a_refetch() {
    let (raw, ctl) = DynamicMockFeed::new_with_controller("dyn");
    ctl.set_table("^GSPC", Interval::OneDay, Lookback::OneDay, table(1.0))
        .await;
    let feed = CachingFeed::new(raw, &cfg(Duration::from_secs(60)));
    let _ = feed
        .download("^GSPC", Interval::OneDay, Lookback::OneDay)
        .await
        .unwrap();
    feed.invalidate_all();
    let _ = feed
        .download("^GSPC", Interval::OneDay, Lookback::OneDay)
        .await
        .unwrap();
    assert_eq!(ctl.call_count().await, 2);
}

#[tokio::test]
async fn builder_wraps_and_describes_the_stack() {
    let (raw, ctl) = DynamicMockFeed::new_with_controller("dyn");
    ctl.set_table("^GSPC", Interval::OneDay, Lookback::OneDay, table(1.0))
        .await;

    let builder = FeedBuilder::new(Arc::clone(&raw)).cache_ttl(Duration::from_secs(30));
    assert_eq!(builder.layer_names(), vec!["CachingFeed"]);
    let json = builder.to_json();
    assert_eq!(json["layers"][0]["name"], "CachingFeed");
    assert_eq!(json["layers"][0]["config"]["ttl_ms"], 30_000);
    assert_eq!(json["layers"][1]["name"], "RawFeed");
    assert_eq!(json["layers"][1]["config"]["name"], "dyn");

    let feed: Arc<dyn PriceFeed> = builder.build();
    assert_eq!(feed.name(), "dyn");
    for _ in 0..2 {
        let _ = feed
            .download("^GSPC", Interval::OneDay, Lookback::OneDay)
            .await
            .unwrap();
    }
    assert_eq!(ctl.call_count().await, 1);

    let bare = FeedBuilder::new(raw)
        .cache_ttl(Duration::from_secs(30))
        .without_cache();
    assert!(bare.layer_names().is_empty());
}
