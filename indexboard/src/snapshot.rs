use chrono::{DateTime, Utc};
use indexboard_core::{Layout, ViewRecord};

/// Title of the section holding markets that are trading.
pub const OPEN_SECTION: &str = "Open Markets";
/// Title of the section holding every other market.
pub const CLOSED_SECTION: &str = "Closed Markets";

/// View records produced by one refresh tick.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardSnapshot {
    /// Instant the tick started.
    pub generated_at: DateTime<Utc>,
    /// Section arrangement requested by the configuration.
    pub layout: Layout,
    /// One record per market that had data, in configuration order.
    pub records: Vec<ViewRecord>,
    /// Tickers skipped because no data was found at any granularity.
    pub missing: Vec<String>,
}

/// A titled group of records; `title` is `None` for the flat layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Section<'a> {
    /// Section heading.
    pub title: Option<&'static str>,
    /// Records in configuration order.
    pub records: Vec<&'a ViewRecord>,
}

impl BoardSnapshot {
    /// Records whose market is open.
    pub fn open_markets(&self) -> impl Iterator<Item = &ViewRecord> {
        self.records.iter().filter(|r| r.is_open)
    }

    /// Records whose market is closed or whose status is unknown.
    pub fn closed_markets(&self) -> impl Iterator<Item = &ViewRecord> {
        self.records.iter().filter(|r| !r.is_open)
    }

    /// Sections to render, following `layout`.
    ///
    /// `Grouped` yields the open section then the closed one, omitting empty
    /// sections. `Flat` yields a single untitled section, even when empty.
    #[must_use]
    pub fn groups(&self) -> Vec<Section<'_>> {
        match self.layout {
            Layout::Flat => vec![Section {
                title: None,
                records: self.records.iter().collect(),
            }],
            _ => [
                (OPEN_SECTION, self.open_markets().collect::<Vec<_>>()),
                (CLOSED_SECTION, self.closed_markets().collect()),
            ]
            .into_iter()
            .filter(|(_, records)| !records.is_empty())
            .map(|(title, records)| Section {
                title: Some(title),
                records,
            })
            .collect(),
        }
    }
}
