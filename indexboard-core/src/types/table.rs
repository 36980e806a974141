use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use indexboard_types::BoardError;

/// One close-price column of a provider table.
///
/// Some providers answer with several close columns (one per requested ticker or
/// per adjustment flavour); consumers take the first one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CloseColumn {
    /// Column label as reported by the provider, e.g. "Close".
    pub label: String,
    /// One value per index row; `None` marks a missing observation.
    pub values: Vec<Option<f64>>,
}

impl CloseColumn {
    /// Build a column from a label and values.
    pub fn new(label: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            label: label.into(),
            values,
        }
    }
}

/// Tabular download returned by a `PriceFeed`.
///
/// Rows are indexed by UTC timestamps; `timezone` is the exchange timezone the
/// provider reported for the series, used to decide which calendar day a row
/// belongs to.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PriceTable {
    timezone: Option<Tz>,
    index: Vec<DateTime<Utc>>,
    close: Vec<CloseColumn>,
}

impl PriceTable {
    /// A table with no rows and no columns.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            timezone: None,
            index: Vec::new(),
            close: Vec::new(),
        }
    }

    /// Build a table from an index and close columns.
    ///
    /// # Errors
    /// Returns `BoardError::Data` if any column length differs from the index length.
    pub fn try_new(
        timezone: Option<Tz>,
        index: Vec<DateTime<Utc>>,
        close: Vec<CloseColumn>,
    ) -> Result<Self, BoardError> {
        if let Some(bad) = close.iter().find(|c| c.values.len() != index.len()) {
            return Err(BoardError::Data(format!(
                "close column '{}' has {} values for {} rows",
                bad.label,
                bad.values.len(),
                index.len()
            )));
        }
        Ok(Self {
            timezone,
            index,
            close,
        })
    }

    /// Build a single-column table from `(timestamp, close)` rows.
    pub fn from_closes(
        timezone: Option<Tz>,
        rows: impl IntoIterator<Item = (DateTime<Utc>, Option<f64>)>,
    ) -> Self {
        let (index, values): (Vec<_>, Vec<_>) = rows.into_iter().unzip();
        Self {
            timezone,
            index,
            close: vec![CloseColumn::new("Close", values)],
        }
    }

    /// Timezone reported by the provider, if any.
    #[must_use]
    pub const fn timezone(&self) -> Option<Tz> {
        self.timezone
    }

    /// Row timestamps.
    #[must_use]
    pub fn index(&self) -> &[DateTime<Utc>] {
        &self.index
    }

    /// All close columns.
    #[must_use]
    pub fn columns(&self) -> &[CloseColumn] {
        &self.close
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// True when the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Rows of the first close column, or `None` when the table has no close column.
    #[must_use]
    pub fn first_close(&self) -> Option<Vec<(DateTime<Utc>, Option<f64>)>> {
        let col = self.close.first()?;
        Some(
            self.index
                .iter()
                .copied()
                .zip(col.values.iter().copied())
                .collect(),
        )
    }

    /// Finite values of the first close column, in row order.
    #[must_use]
    pub fn valid_closes(&self) -> Vec<f64> {
        self.close
            .first()
            .map(|c| {
                c.values
                    .iter()
                    .filter_map(|v| v.filter(|x| x.is_finite()))
                    .collect()
            })
            .unwrap_or_default()
    }
}
