//! Period totals and growth.

use rust_decimal::Decimal;

use super::records::{Expense, LedgerEntry, LedgerEntryType, Payment};
use super::types::{MetricsGrowth, PeriodMetrics};

/// `numerator / denominator * 100`, clamped to the `Decimal` range.
///
/// The caller rules out a zero denominator.
pub(crate) fn saturating_percent(numerator: Decimal, denominator: Decimal) -> Decimal {
    numerator
        .checked_div(denominator)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(if numerator.is_sign_negative() == denominator.is_sign_negative() {
            Decimal::MAX
        } else {
            Decimal::MIN
        })
}

/// `part / whole * 100`, or zero when `whole` is zero.
pub(crate) fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        Decimal::ZERO
    } else {
        saturating_percent(part, whole)
    }
}

/// Percentage change from `previous` to `current`.
///
/// A zero baseline yields 100 when anything was earned and 0 otherwise.
/// Changes beyond the `Decimal` range saturate at `Decimal::MAX`/`MIN`.
#[must_use]
pub fn growth_rate(current: Decimal, previous: Decimal) -> Decimal {
    if previous.is_zero() {
        if current > Decimal::ZERO {
            Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        }
    } else {
        saturating_percent(current.saturating_sub(previous), previous)
    }
}

/// Field-by-field growth of `current` over `previous`.
#[must_use]
pub fn calculate_growth(current: &PeriodMetrics, previous: &PeriodMetrics) -> MetricsGrowth {
    MetricsGrowth {
        total_revenue: growth_rate(current.total_revenue, previous.total_revenue),
        total_expenses: growth_rate(current.total_expenses, previous.total_expenses),
        total_investments: growth_rate(current.total_investments, previous.total_investments),
        profit: growth_rate(current.profit, previous.profit),
        profit_margin: growth_rate(current.profit_margin, previous.profit_margin),
        roi: growth_rate(current.roi, previous.roi),
    }
}

impl PeriodMetrics {
    /// Derives profit, margin and ROI from the three totals.
    #[must_use]
    pub fn from_totals(
        total_revenue: Decimal,
        total_expenses: Decimal,
        total_investments: Decimal,
    ) -> Self {
        let profit = total_revenue.saturating_sub(total_expenses);
        Self {
            total_revenue,
            total_expenses,
            total_investments,
            profit,
            profit_margin: percent_of(profit, total_revenue),
            roi: percent_of(profit, total_investments),
        }
    }

    /// Sums rows already restricted to one window.
    ///
    /// Only investment entries of `ledger` count.
    #[must_use]
    pub fn from_rows(payments: &[Payment], expenses: &[Expense], ledger: &[LedgerEntry]) -> Self {
        let revenue = payments.iter().map(|p| p.amount).sum();
        let spent = expenses.iter().map(|e| e.amount).sum();
        let invested = ledger
            .iter()
            .filter(|e| e.entry_type == LedgerEntryType::Investment)
            .map(|e| e.amount)
            .sum();
        Self::from_totals(revenue, spent, invested)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[test]
    fn test_from_totals() {
        let m = PeriodMetrics::from_totals(dec!(1000), dec!(600), dec!(2000));
        assert_eq!(m.profit, dec!(400));
        assert_eq!(m.profit_margin, dec!(40));
        assert_eq!(m.roi, dec!(20));
    }

    #[test]
    fn test_zero_denominators() {
        let m = PeriodMetrics::from_totals(Decimal::ZERO, dec!(250), Decimal::ZERO);
        assert_eq!(m.profit, dec!(-250));
        assert_eq!(m.profit_margin, Decimal::ZERO);
        assert_eq!(m.roi, Decimal::ZERO);
    }

    #[rstest]
    #[case(dec!(0), dec!(0), dec!(0))]
    #[case(dec!(50), dec!(0), dec!(100))]
    #[case(dec!(-50), dec!(0), dec!(0))]
    #[case(dec!(110), dec!(100), dec!(10))]
    #[case(dec!(50), dec!(100), dec!(-50))]
    #[case(dec!(-150), dec!(-100), dec!(50))]
    fn test_growth_rate(#[case] current: Decimal, #[case] previous: Decimal, #[case] expected: Decimal) {
        assert_eq!(growth_rate(current, previous), expected);
    }

    #[test]
    fn test_calculate_growth_per_field() {
        let current = PeriodMetrics::from_totals(dec!(1200), dec!(600), Decimal::ZERO);
        let previous = PeriodMetrics::from_totals(dec!(1000), dec!(600), Decimal::ZERO);
        let growth = calculate_growth(&current, &previous);
        assert_eq!(growth.total_revenue, dec!(20));
        assert_eq!(growth.total_expenses, Decimal::ZERO);
        assert_eq!(growth.profit, dec!(50));
        assert_eq!(growth.total_investments, Decimal::ZERO);
        assert_eq!(growth.roi, Decimal::ZERO);
    }

    #[test]
    fn test_growth_of_extreme_margins_saturates() {
        let current = PeriodMetrics::from_totals(dec!(0.01), dec!(9999999999999.99), Decimal::ZERO);
        let previous = PeriodMetrics::from_totals(
            dec!(9999999999999.99),
            dec!(9999999999999.98),
            Decimal::ZERO,
        );
        assert!(previous.profit_margin > Decimal::ZERO);

        let growth = calculate_growth(&current, &previous);

        assert_eq!(growth.profit_margin, Decimal::MIN);
        assert_eq!(growth.roi, Decimal::ZERO);
    }

    #[rstest]
    #[case(Decimal::MAX, dec!(0.5), Decimal::MAX)]
    #[case(Decimal::MIN, dec!(0.5), Decimal::MIN)]
    #[case(Decimal::MAX, dec!(-0.5), Decimal::MIN)]
    #[case(dec!(1), dec!(4), dec!(25))]
    fn test_saturating_percent(
        #[case] numerator: Decimal,
        #[case] denominator: Decimal,
        #[case] expected: Decimal,
    ) {
        assert_eq!(saturating_percent(numerator, denominator), expected);
    }
}
