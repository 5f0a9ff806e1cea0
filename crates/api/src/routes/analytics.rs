//! Financial analytics routes.
//!
//! Every handler builds a fresh engine over the shared connection pool,
//! anchored at the current UTC date.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use studio_core::analytics::{
    CashFlowPoint, ClientSummary, DashboardMetrics, ExpenseCategory, FinancialAnalytics, Forecast,
    Insight, PaymentMethodShare, PeriodName, ProjectProfitability, RevenuePoint, SeriesTrends,
    series_trends,
};
use studio_db::AnalyticsRepository;

use crate::{AppState, error::ApiError};

const DEFAULT_REVENUE_MONTHS: u32 = 12;
const DEFAULT_FORECAST_MONTHS: u32 = 3;
const DEFAULT_CASH_FLOW_MONTHS: u32 = 6;
const MAX_MONTHS: u32 = 60;

/// Creates the analytics routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/analytics/dashboard", get(dashboard))
        .route("/analytics/revenue", get(revenue))
        .route("/analytics/forecast", get(forecast))
        .route("/analytics/projects", get(projects))
        .route("/analytics/expenses", get(expenses))
        .route("/analytics/clients", get(clients))
        .route("/analytics/payment-methods", get(payment_methods))
        .route("/analytics/cash-flow", get(cash_flow))
}

// ============================================================================
// Query Parameters
// ============================================================================

/// `?period=` for period-based views.
#[derive(Debug, Default, Deserialize)]
pub struct PeriodQuery {
    /// Period name; unknown or missing names mean `30_days`.
    pub period: Option<String>,
}

impl PeriodQuery {
    fn period(&self) -> PeriodName {
        self.period
            .as_deref()
            .map(PeriodName::parse_or_default)
            .unwrap_or_default()
    }
}

/// `?months=` for monthly series.
#[derive(Debug, Default, Deserialize)]
pub struct MonthsQuery {
    /// Number of months, clamped to `1..=60`.
    pub months: Option<u32>,
}

impl MonthsQuery {
    fn months_or(&self, default: u32) -> u32 {
        self.months.unwrap_or(default).clamp(1, MAX_MONTHS)
    }
}

// ============================================================================
// Response Types
// ============================================================================

/// Dashboard metrics with their insights.
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    /// Period, current, previous and growth.
    #[serde(flatten)]
    pub metrics: DashboardMetrics,
    /// Observations on the current period.
    pub insights: Vec<Insight>,
}

/// Monthly revenue with trend rates.
#[derive(Debug, Serialize)]
pub struct RevenueResponse {
    /// One point per month with payments.
    pub series: Vec<RevenuePoint>,
    /// Least-squares growth rate per field.
    pub trends: SeriesTrends,
}

// ============================================================================
// Route Handlers
// ============================================================================

fn engine(state: &AppState) -> FinancialAnalytics<AnalyticsRepository> {
    let repo = AnalyticsRepository::new((*state.db).clone());
    FinancialAnalytics::new(Arc::new(repo), Utc::now().date_naive())
}

/// GET `/analytics/dashboard`
async fn dashboard(
    State(state): State<AppState>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<DashboardResponse>, ApiError> {
    let (metrics, insights) = engine(&state)
        .dashboard_with_insights(query.period())
        .await?;
    Ok(Json(DashboardResponse { metrics, insights }))
}

/// GET `/analytics/revenue`
async fn revenue(
    State(state): State<AppState>,
    Query(query): Query<MonthsQuery>,
) -> Result<Json<RevenueResponse>, ApiError> {
    let series = engine(&state)
        .revenue_series(query.months_or(DEFAULT_REVENUE_MONTHS))
        .await?;
    let trends = series_trends(&series);
    Ok(Json(RevenueResponse { series, trends }))
}

/// GET `/analytics/forecast`
async fn forecast(
    State(state): State<AppState>,
    Query(query): Query<MonthsQuery>,
) -> Result<Json<Forecast>, ApiError> {
    let forecast = engine(&state)
        .forecast(query.months_or(DEFAULT_FORECAST_MONTHS))
        .await?;
    Ok(Json(forecast))
}

/// GET `/analytics/projects`
async fn projects(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProjectProfitability>>, ApiError> {
    Ok(Json(engine(&state).project_profitability().await?))
}

/// GET `/analytics/expenses`
async fn expenses(
    State(state): State<AppState>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<Vec<ExpenseCategory>>, ApiError> {
    Ok(Json(engine(&state).expense_breakdown(query.period()).await?))
}

/// GET `/analytics/clients`
async fn clients(State(state): State<AppState>) -> Result<Json<Vec<ClientSummary>>, ApiError> {
    Ok(Json(engine(&state).client_analysis().await?))
}

/// GET `/analytics/payment-methods`
async fn payment_methods(
    State(state): State<AppState>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<Vec<PaymentMethodShare>>, ApiError> {
    Ok(Json(
        engine(&state)
            .payment_method_analysis(query.period())
            .await?,
    ))
}

/// GET `/analytics/cash-flow`
async fn cash_flow(
    State(state): State<AppState>,
    Query(query): Query<MonthsQuery>,
) -> Result<Json<Vec<CashFlowPoint>>, ApiError> {
    Ok(Json(
        engine(&state)
            .cash_flow(query.months_or(DEFAULT_CASH_FLOW_MONTHS))
            .await?,
    ))
}
