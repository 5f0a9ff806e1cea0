//! Analytics error types.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised while computing analytics.
///
/// Missing forecast history is not an error; see [`super::Forecast::Unavailable`].
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// Invalid date range.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },

    /// The query interface failed; passed through unchanged.
    #[error("Analytics source error: {0}")]
    Source(String),
}

impl AnalyticsError {
    /// Create a source error.
    #[must_use]
    pub fn from_source(msg: impl Into<String>) -> Self {
        Self::Source(msg.into())
    }
}
