//! Analytics output types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use studio_shared::types::{ClientId, ProjectId};

use super::period::DateRange;
use super::records::ProjectStatus;

/// Totals for one reporting window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PeriodMetrics {
    /// Sum of payments received.
    pub total_revenue: Decimal,
    /// Sum of expenses incurred.
    pub total_expenses: Decimal,
    /// Sum of ledger investment entries.
    pub total_investments: Decimal,
    /// Revenue minus expenses.
    pub profit: Decimal,
    /// Profit as a percentage of revenue.
    pub profit_margin: Decimal,
    /// Profit as a percentage of investments.
    pub roi: Decimal,
}

/// Percentage change of every [`PeriodMetrics`] field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MetricsGrowth {
    /// Revenue growth.
    pub total_revenue: Decimal,
    /// Expense growth.
    pub total_expenses: Decimal,
    /// Investment growth.
    pub total_investments: Decimal,
    /// Profit growth.
    pub profit: Decimal,
    /// Margin growth.
    pub profit_margin: Decimal,
    /// ROI growth.
    pub roi: Decimal,
}

/// Current window against the one before it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardMetrics {
    /// Resolved current window.
    pub period: DateRange,
    /// Metrics for `period`.
    pub current: PeriodMetrics,
    /// Metrics for the previous window of the same length.
    pub previous: PeriodMetrics,
    /// `current` relative to `previous`.
    pub growth: MetricsGrowth,
}

/// One calendar month of revenue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenuePoint {
    /// `YYYY-MM`.
    pub month: String,
    /// Payments received in the month.
    pub revenue: Decimal,
    /// Number of payments.
    pub transaction_count: u64,
    /// `revenue / transaction_count`.
    pub avg_transaction: Decimal,
    /// Ledger debits booked in the month.
    pub expenses: Decimal,
}

/// Series field a trend can be computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendField {
    /// [`RevenuePoint::revenue`].
    Revenue,
    /// [`RevenuePoint::expenses`].
    Expenses,
    /// [`RevenuePoint::transaction_count`].
    TransactionCount,
    /// [`RevenuePoint::avg_transaction`].
    AvgTransaction,
}

impl TrendField {
    /// Reads this field from a point.
    #[must_use]
    pub fn value(self, point: &RevenuePoint) -> Decimal {
        match self {
            Self::Revenue => point.revenue,
            Self::Expenses => point.expenses,
            Self::TransactionCount => Decimal::from(point.transaction_count),
            Self::AvgTransaction => point.avg_transaction,
        }
    }
}

/// Trend growth rate of each series field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SeriesTrends {
    /// Revenue trend (% per month).
    pub revenue: Decimal,
    /// Expense trend.
    pub expenses: Decimal,
    /// Transaction count trend.
    pub transaction_count: Decimal,
    /// Average transaction trend.
    pub avg_transaction: Decimal,
}

/// One projected month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// `YYYY-MM`.
    pub month: String,
    /// Projected revenue.
    pub forecast_revenue: Decimal,
    /// Projected expenses.
    pub forecast_expenses: Decimal,
    /// `forecast_revenue - forecast_expenses`.
    pub forecast_profit: Decimal,
}

/// Result of a forecast request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Forecast {
    /// Months following today, in order.
    #[serde(rename = "forecast")]
    Projected(Vec<ForecastPoint>),
    /// Not enough history; carries the reason.
    #[serde(rename = "error")]
    Unavailable(String),
}

impl Forecast {
    /// Reason given when history has fewer than three months.
    pub const INSUFFICIENT_HISTORY: &'static str = "Insufficient historical data for forecasting";

    /// Projected points, if any.
    #[must_use]
    pub fn points(&self) -> Option<&[ForecastPoint]> {
        match self {
            Self::Projected(points) => Some(points),
            Self::Unavailable(_) => None,
        }
    }
}

/// Tone of an insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightType {
    /// Good news.
    Positive,
    /// Needs attention.
    Warning,
}

/// A human-readable observation about the metrics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    /// Tone.
    #[serde(rename = "type")]
    pub insight_type: InsightType,
    /// Short heading.
    pub title: String,
    /// Full sentence.
    pub message: String,
}

/// Revenue against costs for one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectProfitability {
    /// Project.
    pub project_id: ProjectId,
    /// Service sold.
    pub project_name: String,
    /// Owning client, when known.
    pub client_name: Option<String>,
    /// Project status.
    pub status: ProjectStatus,
    /// All payments from the project's client.
    pub total_revenue: Decimal,
    /// Ledger debits linked to the project.
    pub total_expenses: Decimal,
    /// Revenue minus expenses.
    pub profit: Decimal,
    /// Profit as a percentage of revenue.
    pub profit_margin: Decimal,
}

/// Expenses of one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpenseCategory {
    /// Category name.
    pub category: String,
    /// Number of expenses.
    pub transaction_count: u64,
    /// Sum of amounts.
    pub total_amount: Decimal,
    /// `total_amount / transaction_count`.
    pub avg_amount: Decimal,
}

/// Lifetime figures for one client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientSummary {
    /// Client.
    pub client_id: ClientId,
    /// Display name.
    pub client_name: String,
    /// Projects owned by the client.
    pub total_projects: u64,
    /// Projects in `completed` status.
    pub completed_projects: u64,
    /// Payments received from the client.
    pub total_revenue: Decimal,
    /// Ledger debits linked to the client's projects.
    pub total_expenses: Decimal,
    /// Revenue minus expenses.
    pub profit: Decimal,
    /// Revenue per project.
    pub average_project_value: Decimal,
    /// Completed projects as a percentage of all projects.
    pub completion_rate: Decimal,
}

/// Share of revenue taken through one payment method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentMethodShare {
    /// Stored method key.
    pub payment_method: String,
    /// Display label.
    pub method_display: String,
    /// Number of payments.
    pub transaction_count: u64,
    /// Sum of amounts.
    pub total_amount: Decimal,
    /// Percentage of the window's revenue.
    pub percentage: Decimal,
}

/// Money in and out for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CashFlowPoint {
    /// `YYYY-MM`.
    pub month: String,
    /// Payments and ledger credits.
    pub cash_in: Decimal,
    /// Expenses and other ledger rows.
    pub cash_out: Decimal,
    /// `cash_in - cash_out`.
    pub net_flow: Decimal,
}
