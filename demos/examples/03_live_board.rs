use indexboard::Board;
use indexboard_demos::common::{get_feed, load_config, using_mock};
use indexboard_demos::render::render;

/// Number of refresh ticks before exiting; unbounded against the live feed.
const TICKS_ENV: &str = "INDEXBOARD_TICKS";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = load_config()?;
    let ticks: Option<u64> = match std::env::var(TICKS_ENV) {
        Ok(v) => Some(v.parse()?),
        Err(_) if using_mock() => Some(1),
        Err(_) => None,
    };

    let board = Board::builder()
        .with_feed(get_feed(&cfg))
        .config(cfg)
        .build()?;

    let mut interval = tokio::time::interval(board.config().refresh_every);
    let mut done = 0u64;
    while ticks.is_none_or(|n| done < n) {
        interval.tick().await;
        let snapshot = board.refresh().await;
        println!("{}", render(&snapshot));
        done += 1;
    }
    Ok(())
}
