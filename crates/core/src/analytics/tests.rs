//! Engine tests over an in-memory source, plus properties of the pure parts.

use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use studio_shared::types::{ClientId, ExpenseId, LedgerEntryId, PaymentId, ProjectId};

use super::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn today() -> NaiveDate {
    date(2026, 3, 15)
}

#[derive(Default)]
struct MemorySource {
    payments: Vec<Payment>,
    expenses: Vec<Expense>,
    ledger: Vec<LedgerEntry>,
    projects: Vec<Project>,
    clients: Vec<Client>,
    fail: bool,
}

impl MemorySource {
    fn check(&self) -> Result<(), AnalyticsError> {
        if self.fail {
            Err(AnalyticsError::from_source("connection reset"))
        } else {
            Ok(())
        }
    }

    fn pay(mut self, client_id: ClientId, amount: Decimal, method: &str, on: NaiveDate) -> Self {
        self.payments.push(Payment {
            id: PaymentId::new(),
            client_id,
            amount,
            payment_method: method.to_string(),
            payment_date: on,
        });
        self
    }

    fn spend(mut self, category: &str, amount: Decimal, on: NaiveDate) -> Self {
        self.expenses.push(Expense {
            id: ExpenseId::new(),
            category: category.to_string(),
            amount,
            expense_date: on,
            description: None,
        });
        self
    }

    fn book(
        mut self,
        entry_type: LedgerEntryType,
        amount: Decimal,
        on: NaiveDate,
        project: Option<ProjectId>,
    ) -> Self {
        self.ledger.push(LedgerEntry {
            id: LedgerEntryId::new(),
            entry_type,
            amount,
            entry_date: on,
            linked_project_id: project,
            description: None,
        });
        self
    }
}

impl AnalyticsSource for MemorySource {
    async fn payments(&self, range: Option<DateRange>) -> Result<Vec<Payment>, AnalyticsError> {
        self.check()?;
        Ok(self
            .payments
            .iter()
            .filter(|p| range.is_none_or(|r| r.contains(p.payment_date)))
            .cloned()
            .collect())
    }

    async fn expenses(&self, range: Option<DateRange>) -> Result<Vec<Expense>, AnalyticsError> {
        self.check()?;
        Ok(self
            .expenses
            .iter()
            .filter(|e| range.is_none_or(|r| r.contains(e.expense_date)))
            .cloned()
            .collect())
    }

    async fn ledger_entries(&self, query: LedgerQuery) -> Result<Vec<LedgerEntry>, AnalyticsError> {
        self.check()?;
        Ok(self
            .ledger
            .iter()
            .filter(|e| query.matches(e))
            .cloned()
            .collect())
    }

    async fn projects(&self) -> Result<Vec<Project>, AnalyticsError> {
        self.check()?;
        Ok(self.projects.clone())
    }

    async fn clients(&self) -> Result<Vec<Client>, AnalyticsError> {
        self.check()?;
        Ok(self.clients.clone())
    }
}

fn engine(source: MemorySource) -> FinancialAnalytics<MemorySource> {
    FinancialAnalytics::new(Arc::new(source), today())
}

fn three_month_history() -> MemorySource {
    let client = ClientId::new();
    MemorySource::default()
        .pay(client, dec!(500), "cash", date(2025, 1, 1))
        .pay(client, dec!(1000), "card", date(2026, 1, 10))
        .pay(client, dec!(1100), "card", date(2026, 2, 10))
        .pay(client, dec!(1200), "card", date(2026, 3, 10))
        .book(LedgerEntryType::Debit, dec!(100), date(2026, 2, 5), None)
        .book(LedgerEntryType::Debit, dec!(50), date(2026, 3, 31), None)
        .book(LedgerEntryType::Credit, dec!(999), date(2026, 3, 1), None)
}

#[tokio::test]
async fn test_dashboard_compares_with_previous_window() {
    let client = ClientId::new();
    let source = MemorySource::default()
        .pay(client, dec!(1500), "card", date(2026, 3, 5))
        .pay(client, dec!(1000), "card", date(2026, 2, 20))
        .pay(client, dec!(400), "card", date(2026, 2, 10))
        .spend("software", dec!(600), date(2026, 3, 6))
        .spend("rent", dec!(800), date(2026, 2, 21))
        .book(LedgerEntryType::Investment, dec!(3000), date(2026, 3, 2), None)
        .book(LedgerEntryType::Debit, dec!(7777), date(2026, 3, 3), None);

    let dashboard = engine(source)
        .dashboard_metrics(PeriodName::CurrentMonth)
        .await
        .unwrap();

    assert_eq!(dashboard.period.start(), date(2026, 3, 1));
    assert_eq!(dashboard.period.end(), today());

    assert_eq!(dashboard.current.total_revenue, dec!(1500));
    assert_eq!(dashboard.current.total_expenses, dec!(600));
    assert_eq!(dashboard.current.total_investments, dec!(3000));
    assert_eq!(dashboard.current.profit, dec!(900));
    assert_eq!(dashboard.current.profit_margin, dec!(60));
    assert_eq!(dashboard.current.roi, dec!(30));

    // Previous window is 2026-02-14..=2026-02-28.
    assert_eq!(dashboard.previous.total_revenue, dec!(1000));
    assert_eq!(dashboard.previous.total_expenses, dec!(800));
    assert_eq!(dashboard.previous.roi, Decimal::ZERO);

    assert_eq!(dashboard.growth.total_revenue, dec!(50));
    assert_eq!(dashboard.growth.total_investments, dec!(100));

    let insights = generate_insights(&dashboard);
    assert_eq!(insights.len(), 3);
    assert_eq!(
        insights[0].message,
        "Revenue increased by 50% compared to the previous period."
    );
}

#[tokio::test]
async fn test_revenue_series_uses_ledger_debits_for_whole_month() {
    let series = engine(three_month_history())
        .revenue_series(12)
        .await
        .unwrap();

    let months: Vec<&str> = series.iter().map(|p| p.month.as_str()).collect();
    assert_eq!(months, ["2026-01", "2026-02", "2026-03"]);
    assert_eq!(series[0].expenses, Decimal::ZERO);
    assert_eq!(series[1].expenses, dec!(100));
    assert_eq!(series[2].expenses, dec!(50));
    assert_eq!(series[2].revenue, dec!(1200));
}

#[tokio::test]
async fn test_forecast_from_history() {
    let forecast = engine(three_month_history()).forecast(1).await.unwrap();
    let points = forecast.points().unwrap();

    assert_eq!(points.len(), 1);
    assert_eq!(points[0].month, "2026-04");
    assert_eq!(points[0].forecast_revenue.round_dp(1), dec!(1309.1));
    // Expenses 0, 100, 50 trend at +50% a month.
    assert_eq!(points[0].forecast_expenses, dec!(75));
    assert_eq!(
        points[0].forecast_profit,
        points[0].forecast_revenue - points[0].forecast_expenses
    );
}

#[tokio::test]
async fn test_forecast_without_history_is_unavailable() {
    let client = ClientId::new();
    let source = MemorySource::default()
        .pay(client, dec!(10), "cash", date(2026, 2, 1))
        .pay(client, dec!(20), "cash", date(2026, 3, 1));

    let forecast = engine(source).forecast(3).await.unwrap();
    assert_eq!(
        forecast,
        Forecast::Unavailable("Insufficient historical data for forecasting".to_string())
    );
    assert_eq!(
        serde_json::to_value(&forecast).unwrap(),
        serde_json::json!({ "error": "Insufficient historical data for forecasting" })
    );
}

#[tokio::test]
async fn test_source_failure_propagates() {
    let source = MemorySource {
        fail: true,
        ..MemorySource::default()
    };
    let analytics = engine(source);

    let err = analytics
        .dashboard_metrics(PeriodName::SevenDays)
        .await
        .unwrap_err();
    assert!(matches!(err, AnalyticsError::Source(ref m) if m == "connection reset"));
    assert!(analytics.forecast(3).await.is_err());
    assert!(analytics.client_analysis().await.is_err());
}

#[tokio::test]
async fn test_project_profitability_and_clients() {
    let acme = Client {
        id: ClientId::new(),
        name: "Acme".into(),
    };
    let quiet = Client {
        id: ClientId::new(),
        name: "Quiet Co".into(),
    };
    let logo = Project {
        id: ProjectId::new(),
        client_id: acme.id,
        service: "Logo design".into(),
        status: ProjectStatus::Completed,
        assigned_staff: Some("Sam".into()),
    };
    let site = Project {
        id: ProjectId::new(),
        client_id: acme.id,
        service: "Website".into(),
        status: ProjectStatus::InProgress,
        assigned_staff: None,
    };
    let idle = Project {
        id: ProjectId::new(),
        client_id: quiet.id,
        service: "Brochure".into(),
        status: ProjectStatus::Pending,
        assigned_staff: None,
    };

    let mut source = MemorySource::default()
        .pay(acme.id, dec!(2000), "card", date(2026, 1, 5))
        .book(LedgerEntryType::Debit, dec!(300), date(2026, 1, 6), Some(logo.id))
        .book(LedgerEntryType::Debit, dec!(1200), date(2026, 1, 7), Some(site.id))
        .book(LedgerEntryType::Credit, dec!(50), date(2026, 1, 8), Some(site.id));
    source.projects = vec![site.clone(), logo.clone(), idle.clone()];
    source.clients = vec![acme.clone(), quiet.clone()];
    let analytics = engine(source);

    let projects = analytics.project_profitability().await.unwrap();
    assert_eq!(projects.len(), 3);
    assert_eq!(projects[0].project_id, logo.id);
    assert_eq!(projects[0].profit, dec!(1700));
    assert_eq!(projects[0].profit_margin, dec!(85));
    assert_eq!(projects[0].client_name.as_deref(), Some("Acme"));
    assert_eq!(projects[1].project_id, site.id);
    assert_eq!(projects[1].total_expenses, dec!(1200));
    assert_eq!(projects[2].project_id, idle.id);
    assert_eq!(projects[2].profit_margin, Decimal::ZERO);

    let clients = analytics.client_analysis().await.unwrap();
    assert_eq!(clients.len(), 1);
    let summary = &clients[0];
    assert_eq!(summary.client_name, "Acme");
    assert_eq!(summary.total_projects, 2);
    assert_eq!(summary.completed_projects, 1);
    assert_eq!(summary.total_expenses, dec!(1500));
    assert_eq!(summary.profit, dec!(500));
    assert_eq!(summary.average_project_value, dec!(1000));
    assert_eq!(summary.completion_rate, dec!(50));
}

#[tokio::test]
async fn test_expense_and_payment_method_breakdowns() {
    let client = ClientId::new();
    let source = MemorySource::default()
        .spend("software", dec!(100), date(2026, 3, 1))
        .spend("software", dec!(50), date(2026, 3, 2))
        .spend("equipment", dec!(400), date(2026, 3, 3))
        .spend("equipment", dec!(9000), date(2025, 1, 1))
        .pay(client, dec!(300), "cash", date(2026, 3, 4))
        .pay(client, dec!(600), "bank_transfer", date(2026, 3, 5))
        .pay(client, dec!(100), "crypto", date(2026, 3, 6));
    let analytics = engine(source);

    let categories = analytics
        .expense_breakdown(PeriodName::ThirtyDays)
        .await
        .unwrap();
    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0].category, "equipment");
    assert_eq!(categories[0].total_amount, dec!(400));
    assert_eq!(categories[1].category, "software");
    assert_eq!(categories[1].transaction_count, 2);
    assert_eq!(categories[1].avg_amount, dec!(75));

    let methods = analytics
        .payment_method_analysis(PeriodName::ThirtyDays)
        .await
        .unwrap();
    let labels: Vec<&str> = methods.iter().map(|m| m.method_display.as_str()).collect();
    assert_eq!(labels, ["Bank Transfer", "Cash", "Other"]);
    assert_eq!(methods[0].percentage, dec!(60));
    assert_eq!(methods[2].percentage, dec!(10));
}

#[tokio::test]
async fn test_cash_flow_by_month() {
    let client = ClientId::new();
    let source = MemorySource::default()
        .pay(client, dec!(1000), "card", date(2026, 2, 3))
        .spend("rent", dec!(400), date(2026, 2, 4))
        .book(LedgerEntryType::Credit, dec!(200), date(2026, 2, 5), None)
        .book(LedgerEntryType::Investment, dec!(300), date(2026, 3, 1), None)
        .book(LedgerEntryType::Debit, dec!(50), date(2026, 3, 2), None)
        .pay(client, dec!(5000), "card", date(2025, 6, 1));

    let flow = engine(source).cash_flow(6).await.unwrap();

    assert_eq!(flow.len(), 2);
    assert_eq!(flow[0].month, "2026-02");
    assert_eq!(flow[0].cash_in, dec!(1200));
    assert_eq!(flow[0].cash_out, dec!(400));
    assert_eq!(flow[0].net_flow, dec!(800));
    assert_eq!(flow[1].month, "2026-03");
    assert_eq!(flow[1].cash_in, Decimal::ZERO);
    assert_eq!(flow[1].net_flow, dec!(-350));
}

#[test]
fn test_ledger_query_matches() {
    let project = ProjectId::new();
    let entry = LedgerEntry {
        id: LedgerEntryId::new(),
        entry_type: LedgerEntryType::Debit,
        amount: dec!(10),
        entry_date: date(2026, 3, 1),
        linked_project_id: Some(project),
        description: None,
    };
    let march = DateRange::new(date(2026, 3, 1), date(2026, 3, 31)).unwrap();

    assert!(LedgerQuery::default().matches(&entry));
    assert!(LedgerQuery::of_type(LedgerEntryType::Debit).within(march).matches(&entry));
    assert!(!LedgerQuery::of_type(LedgerEntryType::Credit).matches(&entry));
    let other_project = LedgerQuery {
        linked_project_id: Some(ProjectId::new()),
        ..LedgerQuery::default()
    };
    assert!(!other_project.matches(&entry));
}

fn period_strategy() -> impl Strategy<Value = PeriodName> {
    prop::sample::select(PeriodName::ALL.to_vec())
}

fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0i64..20_000).prop_map(|offset| date(1990, 1, 1) + Duration::days(offset))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Every named period ends today and never starts after it.
    #[test]
    fn prop_resolved_period_is_ordered(period in period_strategy(), today in date_strategy()) {
        let range = period.resolve(today);
        prop_assert!(range.start() <= range.end());
        prop_assert_eq!(range.end(), today);
    }

    /// The previous window has the same length and ends the day before.
    #[test]
    fn prop_previous_window(start in date_strategy(), length in 0i64..400) {
        let range = DateRange::new(start, start + Duration::days(length)).unwrap();
        let previous = range.previous();
        prop_assert_eq!(previous.days(), range.days());
        prop_assert_eq!(previous.end() + Duration::days(1), range.start());
    }

    /// Profit is exact and zero denominators give zero ratios.
    #[test]
    fn prop_profit_and_ratios(
        revenue in 0i64..1_000_000_000,
        expenses in 0i64..1_000_000_000,
        investments in 0i64..1_000_000_000,
    ) {
        let revenue = Decimal::new(revenue, 2);
        let expenses = Decimal::new(expenses, 2);
        let investments = Decimal::new(investments, 2);
        let m = PeriodMetrics::from_totals(revenue, expenses, investments);

        prop_assert_eq!(m.profit, revenue - expenses);
        if revenue.is_zero() {
            prop_assert_eq!(m.profit_margin, Decimal::ZERO);
        }
        if investments.is_zero() {
            prop_assert_eq!(m.roi, Decimal::ZERO);
        }
    }

    /// A zero baseline yields 100 for positive values and 0 otherwise.
    #[test]
    fn prop_growth_from_zero(current in -1_000_000i64..1_000_000) {
        let current = Decimal::from(current);
        let expected = if current > Decimal::ZERO { dec!(100) } else { Decimal::ZERO };
        prop_assert_eq!(metrics::growth_rate(current, Decimal::ZERO), expected);
    }

    /// A flat series has no trend.
    #[test]
    fn prop_flat_series_has_zero_trend(value in 1i64..1_000_000, n in 2usize..24) {
        let series: Vec<RevenuePoint> = (0..n)
            .map(|i| RevenuePoint {
                month: format!("2025-{:02}", i % 12 + 1),
                revenue: Decimal::from(value),
                transaction_count: 1,
                avg_transaction: Decimal::from(value),
                expenses: Decimal::ZERO,
            })
            .collect();
        prop_assert_eq!(trend_growth_rate(&series, TrendField::Revenue), Decimal::ZERO);
    }

    /// Forecast profit is always revenue minus expenses.
    #[test]
    fn prop_forecast_profit(
        revenues in prop::collection::vec(1i64..100_000, 3..12),
        months in 1u32..12,
    ) {
        let history: Vec<RevenuePoint> = revenues
            .iter()
            .enumerate()
            .map(|(i, r)| RevenuePoint {
                month: format!("2025-{:02}", i + 1),
                revenue: Decimal::from(*r),
                transaction_count: 1,
                avg_transaction: Decimal::from(*r),
                expenses: Decimal::from(*r) / dec!(2),
            })
            .collect();

        let forecast = project_forecast(&history, months, today());
        let points = forecast.points().unwrap();
        prop_assert_eq!(points.len(), months as usize);
        for point in points {
            prop_assert_eq!(point.forecast_profit, point.forecast_revenue - point.forecast_expenses);
        }
    }
}
