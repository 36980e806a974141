use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the indexboard workspace.
///
/// Provider and calendar layers return it; the resolvers absorb it into
/// sentinel values (empty series, closed/unknown status).
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BoardError {
    /// Issues with the returned or expected data (ragged columns, etc.).
    #[error("data issue: {0}")]
    Data(String),

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// An individual provider returned an error.
    #[error("{connector} failed: {msg}")]
    Connector {
        /// Provider name that failed.
        connector: String,
        /// Human-readable error message.
        msg: String,
    },

    /// A ticker or resource could not be found.
    #[error("not found: {what}")]
    NotFound {
        /// Description of missing resource, e.g. "history for ^GSPC".
        what: String,
    },

    /// No trading calendar is registered under the requested identifier.
    #[error("unknown trading calendar: {id}")]
    UnknownCalendar {
        /// The identifier that was looked up.
        id: String,
    },

    /// A date or timestamp falls outside what a calendar or schedule covers.
    #[error("out of range: {0}")]
    OutOfRange(String),

    /// Unknown/opaque error.
    #[error("unknown error: {0}")]
    Other(String),
}

impl BoardError {
    /// Helper: build a `Connector` error with the provider name and message.
    pub fn connector(connector: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Connector {
            connector: connector.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `NotFound` error for a description of the missing resource.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Helper: build an `UnknownCalendar` error.
    pub fn unknown_calendar(id: impl Into<String>) -> Self {
        Self::UnknownCalendar { id: id.into() }
    }

    /// Helper: build an `OutOfRange` error.
    pub fn out_of_range(msg: impl Into<String>) -> Self {
        Self::OutOfRange(msg.into())
    }

    /// Returns true for errors meaning "the provider has nothing for this request".
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
