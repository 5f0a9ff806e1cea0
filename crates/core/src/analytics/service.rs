//! Analytics engine over an [`AnalyticsSource`].

use std::sync::Arc;

use chrono::NaiveDate;

use super::breakdown;
use super::error::AnalyticsError;
use super::insights::generate_insights;
use super::metrics::calculate_growth;
use super::period::{DateRange, PeriodName};
use super::records::LedgerEntryType;
use super::source::{AnalyticsSource, LedgerQuery};
use super::trend::{bucket_revenue_series, project_forecast};
use super::types::{
    CashFlowPoint, ClientSummary, DashboardMetrics, ExpenseCategory, Forecast, Insight,
    PaymentMethodShare, PeriodMetrics, ProjectProfitability, RevenuePoint,
};

/// Months of history a forecast is built from.
pub const FORECAST_HISTORY_MONTHS: u32 = 12;

/// Financial analytics anchored at a fixed `today`.
///
/// Holds no mutable state; build one per request.
pub struct FinancialAnalytics<S: AnalyticsSource> {
    source: Arc<S>,
    today: NaiveDate,
}

impl<S: AnalyticsSource> FinancialAnalytics<S> {
    /// Create an engine reading from `source`.
    #[must_use]
    pub fn new(source: Arc<S>, today: NaiveDate) -> Self {
        Self { source, today }
    }

    /// The anchor date.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Absolute bounds of a named period.
    #[must_use]
    pub fn resolve_period(&self, period: PeriodName) -> DateRange {
        period.resolve(self.today)
    }

    /// Totals, margin and ROI for one window.
    pub async fn metrics_for_period(
        &self,
        range: DateRange,
    ) -> Result<PeriodMetrics, AnalyticsError> {
        let payments = self.source.payments(Some(range)).await?;
        let expenses = self.source.expenses(Some(range)).await?;
        let investments = self
            .source
            .ledger_entries(LedgerQuery::of_type(LedgerEntryType::Investment).within(range))
            .await?;

        Ok(PeriodMetrics::from_rows(&payments, &expenses, &investments))
    }

    /// Metrics of `period` against the window before it.
    pub async fn dashboard_metrics(
        &self,
        period: PeriodName,
    ) -> Result<DashboardMetrics, AnalyticsError> {
        let range = self.resolve_period(period);
        let current = self.metrics_for_period(range).await?;
        let previous = self.metrics_for_period(range.previous()).await?;

        Ok(DashboardMetrics {
            period: range,
            growth: calculate_growth(&current, &previous),
            current,
            previous,
        })
    }

    /// Dashboard metrics together with their insights.
    pub async fn dashboard_with_insights(
        &self,
        period: PeriodName,
    ) -> Result<(DashboardMetrics, Vec<Insight>), AnalyticsError> {
        let metrics = self.dashboard_metrics(period).await?;
        let insights = generate_insights(&metrics);
        Ok((metrics, insights))
    }

    /// Monthly revenue over the trailing `months` months.
    pub async fn revenue_series(&self, months: u32) -> Result<Vec<RevenuePoint>, AnalyticsError> {
        let window = DateRange::trailing_months(self.today, months);
        let payments = self.source.payments(Some(window)).await?;
        let debits = self
            .source
            .ledger_entries(LedgerQuery::of_type(LedgerEntryType::Debit).within(window.whole_months()))
            .await?;

        Ok(bucket_revenue_series(&payments, &debits))
    }

    /// Projects revenue and expenses `months` ahead from the last year of history.
    pub async fn forecast(&self, months: u32) -> Result<Forecast, AnalyticsError> {
        let history = self.revenue_series(FORECAST_HISTORY_MONTHS).await?;
        Ok(project_forecast(&history, months, self.today))
    }

    /// Profitability of every project.
    pub async fn project_profitability(
        &self,
    ) -> Result<Vec<ProjectProfitability>, AnalyticsError> {
        let projects = self.source.projects().await?;
        let clients = self.source.clients().await?;
        let payments = self.source.payments(None).await?;
        let debits = self
            .source
            .ledger_entries(LedgerQuery::of_type(LedgerEntryType::Debit))
            .await?;

        Ok(breakdown::project_profitability(
            &projects, &clients, &payments, &debits,
        ))
    }

    /// Expenses of `period` by category.
    pub async fn expense_breakdown(
        &self,
        period: PeriodName,
    ) -> Result<Vec<ExpenseCategory>, AnalyticsError> {
        let expenses = self
            .source
            .expenses(Some(self.resolve_period(period)))
            .await?;
        Ok(breakdown::expense_breakdown(&expenses))
    }

    /// Lifetime summary of paying clients.
    pub async fn client_analysis(&self) -> Result<Vec<ClientSummary>, AnalyticsError> {
        let clients = self.source.clients().await?;
        let projects = self.source.projects().await?;
        let payments = self.source.payments(None).await?;
        let debits = self
            .source
            .ledger_entries(LedgerQuery::of_type(LedgerEntryType::Debit))
            .await?;

        Ok(breakdown::client_analysis(
            &clients, &projects, &payments, &debits,
        ))
    }

    /// Revenue of `period` by payment method.
    pub async fn payment_method_analysis(
        &self,
        period: PeriodName,
    ) -> Result<Vec<PaymentMethodShare>, AnalyticsError> {
        let payments = self
            .source
            .payments(Some(self.resolve_period(period)))
            .await?;
        Ok(breakdown::payment_method_analysis(&payments))
    }

    /// Monthly cash in and out over the trailing `months` months.
    pub async fn cash_flow(&self, months: u32) -> Result<Vec<CashFlowPoint>, AnalyticsError> {
        let window = DateRange::trailing_months(self.today, months);
        let payments = self.source.payments(Some(window)).await?;
        let expenses = self.source.expenses(Some(window)).await?;
        let ledger = self
            .source
            .ledger_entries(LedgerQuery::default().within(window))
            .await?;

        Ok(breakdown::cash_flow(&payments, &expenses, &ledger))
    }
}
