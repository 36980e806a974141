use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use indexboard::{BoardSnapshot, ViewRecord};

/// Price with thousands separators and two decimals, e.g. `39,098.68`.
#[must_use]
pub fn format_price(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let fixed = format!("{:.2}", value.abs());
    let (int, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let mut grouped = String::with_capacity(int.len() + int.len() / 3);
    for (i, c) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}{grouped}.{frac}")
}

/// Signed percent change with two decimals, e.g. `+0.42%`.
#[must_use]
pub fn format_delta(pct: f64) -> String {
    // avoid "-0.00%"
    let pct = if pct.abs() < 0.005 { 0.0 } else { pct };
    format!("{pct:+.2}%")
}

/// Caption shown above the board.
#[must_use]
pub fn caption(at: DateTime<Utc>) -> String {
    format!("Last update: {} UTC", at.format("%H:%M"))
}

/// One line per market, stamped with the time of its latest observation.
#[must_use]
pub fn format_record(r: &ViewRecord) -> String {
    let degraded = if r.source.is_degraded() { " *" } else { "" };
    format!(
        "[{}] {:<12} {:>12} {:>8}  {:<6} {} UTC {}{}",
        r.country,
        r.name,
        format_price(r.last_price),
        format_delta(r.delta_pct),
        r.status_label(),
        r.last_ts.format("%H:%M"),
        r.flag_url,
        degraded,
    )
}

/// Text rendering of a snapshot, section by section.
#[must_use]
pub fn render(snapshot: &BoardSnapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", caption(snapshot.generated_at));
    for section in snapshot.groups() {
        if let Some(title) = section.title {
            let _ = writeln!(out, "== {title} ==");
        }
        for r in section.records {
            let _ = writeln!(out, "{}", format_record(r));
        }
    }
    if !snapshot.missing.is_empty() {
        let _ = writeln!(out, "No data found for: {}", snapshot.missing.join(", "));
    }
    out
}
