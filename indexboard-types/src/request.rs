//! Granularities and trailing windows the board asks price feeds for.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Sampling interval of a price download.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interval {
    /// One-minute bars.
    #[serde(rename = "1m")]
    OneMinute,
    /// Five-minute bars.
    #[serde(rename = "5m")]
    FiveMinutes,
    /// Daily bars.
    #[serde(rename = "1d")]
    OneDay,
}

impl Interval {
    /// Provider-style code, e.g. `"1m"`.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::OneMinute => "1m",
            Self::FiveMinutes => "5m",
            Self::OneDay => "1d",
        }
    }

    /// Bar length in minutes for intraday intervals, `None` for daily.
    #[must_use]
    pub const fn minutes(self) -> Option<i64> {
        match self {
            Self::OneMinute => Some(1),
            Self::FiveMinutes => Some(5),
            Self::OneDay => None,
        }
    }

    /// True for sub-daily intervals.
    #[must_use]
    pub const fn is_intraday(self) -> bool {
        self.minutes().is_some()
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Trailing window of a price download, counted back from the provider's "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lookback {
    /// The latest trading day.
    #[serde(rename = "1d")]
    OneDay,
    /// Five trailing days.
    #[serde(rename = "5d")]
    FiveDays,
    /// Seven trailing days.
    #[serde(rename = "7d")]
    SevenDays,
}

impl Lookback {
    /// Provider-style code, e.g. `"7d"`.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::OneDay => "1d",
            Self::FiveDays => "5d",
            Self::SevenDays => "7d",
        }
    }

    /// Window length in days.
    #[must_use]
    pub const fn days(self) -> i64 {
        match self {
            Self::OneDay => 1,
            Self::FiveDays => 5,
            Self::SevenDays => 7,
        }
    }
}

impl fmt::Display for Lookback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
