use chrono::NaiveDate;
use chrono_tz::America::Sao_Paulo;

use super::ExchangeRules;
use crate::holidays::{easter_offset, ymd};
use crate::hours::{SpecialHours, TradingHours, hm};

/// B3 (Brasil, Bolsa, Balcão) cash equities.
pub(super) fn b3() -> ExchangeRules {
    ExchangeRules {
        id: "B3",
        aliases: &["BVMF", "BOVESPA"],
        hours: |_| TradingHours::new(Sao_Paulo, hm(10, 0), hm(17, 0)),
        trades_weekends: false,
        holidays: b3_holidays,
        special_hours: b3_late_opens,
    }
}

fn b3_holidays(year: i32) -> Vec<NaiveDate> {
    let mut out: Vec<NaiveDate> = [
        ymd(year, 1, 1),
        // Carnival Monday and Tuesday
        easter_offset(year, -48),
        easter_offset(year, -47),
        easter_offset(year, -2),
        ymd(year, 4, 21),
        ymd(year, 5, 1),
        // Corpus Christi
        easter_offset(year, 60),
        ymd(year, 9, 7),
        ymd(year, 10, 12),
        ymd(year, 11, 2),
        ymd(year, 11, 15),
        ymd(year, 12, 24),
        ymd(year, 12, 25),
        ymd(year, 12, 31),
    ]
    .into_iter()
    .flatten()
    .collect();
    // São Paulo city holidays, observed until 2021
    if year <= 2021 {
        out.extend(ymd(year, 1, 25));
        out.extend(ymd(year, 7, 9));
    }
    if year >= 2024 {
        out.extend(ymd(year, 11, 20));
    }
    out
}

/// Ash Wednesday opens at 13:00.
fn b3_late_opens(year: i32) -> Vec<SpecialHours> {
    easter_offset(year, -46)
        .map(|d| SpecialHours::late_open(d, hm(13, 0)))
        .into_iter()
        .collect()
}
