use std::sync::Arc;

use indexboard::{CalendarProvider, SessionStatusResolver, SystemClock};
use indexboard_calendars::ExchangeCalendars;
use indexboard_demos::common::load_config;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = load_config()?;
    let calendars = Arc::new(ExchangeCalendars::new());
    println!("Known calendars: {}", calendars.calendar_ids().join(", "));

    let resolver = SessionStatusResolver::new(calendars, Arc::new(SystemClock))
        .with_window_days(cfg.schedule_window_days);

    for market in &cfg.markets {
        println!(
            "{:<12} {:<7} {}",
            market.name,
            market.calendar,
            resolver.status(&market.calendar).label()
        );
    }
    Ok(())
}
