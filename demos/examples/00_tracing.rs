use indexboard::Board;
use indexboard_demos::common::{get_feed, load_config};
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize a human-friendly tracing subscriber with env-based filtering.
    // Suggested: RUST_LOG=info,indexboard=debug,indexboard_yfinance=trace
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
        .try_init();

    let cfg = load_config()?;
    let board = Board::builder()
        .with_feed(get_feed(&cfg))
        .config(cfg)
        .build()?;

    // One tick: every cascade step and absorbed error shows up as an event.
    let snapshot = board.refresh().await;
    tracing::info!(
        records = snapshot.records.len(),
        missing = snapshot.missing.len(),
        "refresh done"
    );
    Ok(())
}
