//! Reporting windows.

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use super::error::AnalyticsError;

/// Named reporting period offered on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PeriodName {
    /// Trailing 7 days.
    #[serde(rename = "7_days")]
    SevenDays,
    /// Trailing 30 days.
    #[default]
    #[serde(rename = "30_days")]
    ThirtyDays,
    /// Trailing 90 days.
    #[serde(rename = "90_days")]
    NinetyDays,
    /// First of this month through today.
    #[serde(rename = "current_month")]
    CurrentMonth,
    /// January 1st through today.
    #[serde(rename = "current_year")]
    CurrentYear,
}

impl PeriodName {
    /// All named periods, in menu order.
    pub const ALL: [Self; 5] = [
        Self::SevenDays,
        Self::ThirtyDays,
        Self::NinetyDays,
        Self::CurrentMonth,
        Self::CurrentYear,
    ];

    /// Wire value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SevenDays => "7_days",
            Self::ThirtyDays => "30_days",
            Self::NinetyDays => "90_days",
            Self::CurrentMonth => "current_month",
            Self::CurrentYear => "current_year",
        }
    }

    /// Parse a wire value.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == s)
    }

    /// Parse a wire value, falling back to 30 days for anything unknown.
    #[must_use]
    pub fn parse_or_default(s: &str) -> Self {
        Self::parse(s).unwrap_or_default()
    }

    /// Maps the period to absolute bounds ending on `today`.
    #[must_use]
    pub fn resolve(self, today: NaiveDate) -> DateRange {
        let start = match self {
            Self::SevenDays => today - Duration::days(7),
            Self::ThirtyDays => today - Duration::days(30),
            Self::NinetyDays => today - Duration::days(90),
            Self::CurrentMonth => today.with_day(1).unwrap_or(today),
            Self::CurrentYear => today.with_ordinal(1).unwrap_or(today),
        };
        DateRange { start, end: today }
    }
}

impl std::fmt::Display for PeriodName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive date window. `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Creates a window.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::InvalidDateRange`] if `end` is before `start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, AnalyticsError> {
        if end < start {
            return Err(AnalyticsError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Window covering the trailing `months` calendar months through `today`.
    #[must_use]
    pub fn trailing_months(today: NaiveDate, months: u32) -> Self {
        let start = today
            .checked_sub_months(Months::new(months))
            .unwrap_or(NaiveDate::MIN);
        Self { start, end: today }
    }

    /// First day (inclusive).
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day (inclusive).
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Length as `end - start` in whole days.
    #[must_use]
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Whether `date` falls inside the window.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// The window of the same length ending the day before this one starts.
    #[must_use]
    pub fn previous(&self) -> Self {
        let end = self.start - Duration::days(1);
        let start = end - Duration::days(self.days());
        Self { start, end }
    }

    /// Widened to cover the full calendar months of both ends.
    #[must_use]
    pub fn whole_months(&self) -> Self {
        let start = self.start.with_day(1).unwrap_or(self.start);
        let end = self
            .end
            .with_day(1)
            .and_then(|first| first.checked_add_months(Months::new(1)))
            .and_then(|next| next.pred_opt())
            .unwrap_or(self.end);
        Self { start, end }
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}
