use std::sync::Arc;

use indexboard::{SeriesResolver, SystemClock};
use indexboard_demos::common::{get_feed, load_config};
use indexboard_demos::render::{format_delta, format_price};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = load_config()?;
    let resolver = SeriesResolver::new(get_feed(&cfg), Arc::new(SystemClock))
        .with_cascade(&cfg.intraday_cascade);

    for market in &cfg.markets {
        let series = resolver.resolve(&market.ticker).await;
        let Some(last) = series.last() else {
            println!("{:<12} no data found", market.name);
            continue;
        };
        let delta = series.pct_change_from_open().last().map_or(0.0, |p| p.price);
        println!(
            "{:<12} {:>6} points  last {} at {}  {}  ({})",
            market.name,
            series.len(),
            format_price(last.price),
            last.ts.format("%H:%M"),
            format_delta(delta),
            series.source(),
        );
    }
    Ok(())
}
