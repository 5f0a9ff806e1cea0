//! Financial analytics for the studio dashboard.
//!
//! Everything here is arithmetic over rows handed in by an [`AnalyticsSource`]:
//! - Period resolution and previous-window comparison
//! - Revenue, expense and investment totals with margin and ROI
//! - Monthly revenue series and a least-squares trend growth rate
//! - A compounding revenue/expense forecast
//! - Threshold-based insights
//! - Profitability, expense, client, payment-method and cash-flow breakdowns

pub mod breakdown;
pub mod error;
pub mod insights;
pub mod metrics;
pub mod period;
pub mod records;
pub mod service;
pub mod source;
pub mod trend;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::AnalyticsError;
pub use insights::generate_insights;
pub use metrics::calculate_growth;
pub use period::{DateRange, PeriodName};
pub use records::{Client, Expense, LedgerEntry, LedgerEntryType, Payment, Project, ProjectStatus};
pub use service::FinancialAnalytics;
pub use source::{AnalyticsSource, LedgerQuery};
pub use trend::{bucket_revenue_series, project_forecast, series_trends, trend_growth_rate};
pub use types::*;
