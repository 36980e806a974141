use super::{ExchangeRules, no_holidays, no_special_hours};
use crate::hours::{TradingHours, hm};

/// Round-the-clock venue (crypto and similar): one 24 hour UTC session per day.
pub(super) fn always_open() -> ExchangeRules {
    ExchangeRules {
        id: "24/7",
        aliases: &["ALWAYS_OPEN", "24x7"],
        hours: |_| TradingHours::new(chrono_tz::UTC, hm(0, 0), hm(0, 0)),
        trades_weekends: true,
        holidays: no_holidays,
        special_hours: no_special_hours,
    }
}
