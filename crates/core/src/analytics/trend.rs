//! Monthly series, linear trend and forecast.

use std::collections::BTreeMap;

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;

use super::metrics::saturating_percent;
use super::records::{LedgerEntry, LedgerEntryType, Payment};
use super::types::{Forecast, ForecastPoint, RevenuePoint, SeriesTrends, TrendField};

/// Minimum number of historical months a forecast needs.
pub const MIN_FORECAST_HISTORY: usize = 3;

/// Longest horizon a forecast projects.
pub const MAX_FORECAST_MONTHS: u32 = 60;

/// `YYYY-MM` label of a date.
#[must_use]
pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Groups payments into calendar months, ascending.
///
/// Only months with at least one payment appear. Each month's `expenses` is
/// the sum of `debits` booked anywhere in that calendar month.
#[must_use]
pub fn bucket_revenue_series(payments: &[Payment], debits: &[LedgerEntry]) -> Vec<RevenuePoint> {
    let mut buckets: BTreeMap<String, (Decimal, u64)> = BTreeMap::new();
    for payment in payments {
        let bucket = buckets
            .entry(month_key(payment.payment_date))
            .or_insert((Decimal::ZERO, 0));
        bucket.0 += payment.amount;
        bucket.1 += 1;
    }

    let mut debit_totals: BTreeMap<String, Decimal> = BTreeMap::new();
    for entry in debits
        .iter()
        .filter(|e| e.entry_type == LedgerEntryType::Debit)
    {
        *debit_totals.entry(month_key(entry.entry_date)).or_default() += entry.amount;
    }

    buckets
        .into_iter()
        .map(|(month, (revenue, count))| {
            let expenses = debit_totals.get(&month).copied().unwrap_or_default();
            RevenuePoint {
                avg_transaction: revenue / Decimal::from(count),
                month,
                revenue,
                transaction_count: count,
                expenses,
            }
        })
        .collect()
}

/// Least-squares slope over `1..=n`, relative to the mean, in percent.
///
/// Returns zero for fewer than two points, a non-positive mean, or sums that
/// leave the `Decimal` range. Rates themselves saturate at the range bounds.
#[must_use]
pub fn trend_growth_rate(series: &[RevenuePoint], field: TrendField) -> Decimal {
    if series.len() < 2 {
        return Decimal::ZERO;
    }
    least_squares_rate(series, field).unwrap_or(Decimal::ZERO)
}

fn least_squares_rate(series: &[RevenuePoint], field: TrendField) -> Option<Decimal> {
    let count = Decimal::from(series.len());
    let mut sum_x = Decimal::ZERO;
    let mut sum_y = Decimal::ZERO;
    let mut sum_xy = Decimal::ZERO;
    let mut sum_x2 = Decimal::ZERO;
    for (x, point) in (1u64..).map(Decimal::from).zip(series) {
        let y = field.value(point);
        sum_x = sum_x.checked_add(x)?;
        sum_y = sum_y.checked_add(y)?;
        sum_xy = sum_xy.checked_add(x.checked_mul(y)?)?;
        sum_x2 = sum_x2.checked_add(x.checked_mul(x)?)?;
    }

    let mean = sum_y.checked_div(count)?;
    if mean <= Decimal::ZERO {
        return Some(Decimal::ZERO);
    }

    // Non-zero for n >= 2 since x values are distinct.
    let denominator = count.checked_mul(sum_x2)?.checked_sub(sum_x.checked_mul(sum_x)?)?;
    let numerator = count
        .checked_mul(sum_xy)?
        .checked_sub(sum_x.checked_mul(sum_y)?)?;
    let slope = numerator.checked_div(denominator)?;
    Some(saturating_percent(slope, mean))
}

/// Trend rates of every series field.
#[must_use]
pub fn series_trends(series: &[RevenuePoint]) -> SeriesTrends {
    SeriesTrends {
        revenue: trend_growth_rate(series, TrendField::Revenue),
        expenses: trend_growth_rate(series, TrendField::Expenses),
        transaction_count: trend_growth_rate(series, TrendField::TransactionCount),
        avg_transaction: trend_growth_rate(series, TrendField::AvgTransaction),
    }
}

/// Compounds the last month of `history` forward by its trend rates.
///
/// At most [`MAX_FORECAST_MONTHS`] points are produced. Projected values
/// saturate at `Decimal::MAX`/`MIN` instead of overflowing.
#[must_use]
pub fn project_forecast(history: &[RevenuePoint], months: u32, today: NaiveDate) -> Forecast {
    let Some(last) = history.last() else {
        return Forecast::Unavailable(Forecast::INSUFFICIENT_HISTORY.to_string());
    };
    if history.len() < MIN_FORECAST_HISTORY {
        return Forecast::Unavailable(Forecast::INSUFFICIENT_HISTORY.to_string());
    }

    let factor = |field| {
        Decimal::ONE.saturating_add(trend_growth_rate(history, field) / Decimal::ONE_HUNDRED)
    };
    let revenue_factor = factor(TrendField::Revenue);
    let expense_factor = factor(TrendField::Expenses);

    let mut revenue = last.revenue;
    let mut expenses = last.expenses;
    let points = (1..=months.min(MAX_FORECAST_MONTHS))
        .map(|i| {
            revenue = revenue.saturating_mul(revenue_factor);
            expenses = expenses.saturating_mul(expense_factor);
            let month = today.checked_add_months(Months::new(i)).unwrap_or(today);
            ForecastPoint {
                month: month_key(month),
                forecast_revenue: revenue,
                forecast_expenses: expenses,
                forecast_profit: revenue.saturating_sub(expenses),
            }
        })
        .collect();

    Forecast::Projected(points)
}
