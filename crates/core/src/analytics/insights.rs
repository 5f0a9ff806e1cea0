//! Threshold-based observations on dashboard metrics.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::types::{DashboardMetrics, Insight, InsightType};

const REVENUE_GROWTH_THRESHOLD: Decimal = dec!(10);
const HEALTHY_MARGIN: Decimal = dec!(30);
const LOW_MARGIN: Decimal = dec!(10);
const EXCELLENT_ROI: Decimal = dec!(20);

fn percent(value: Decimal) -> String {
    value.round_dp(2).normalize().to_string()
}

fn insight(insight_type: InsightType, title: &str, message: String) -> Insight {
    Insight {
        insight_type,
        title: title.to_string(),
        message,
    }
}

/// Produces at most one revenue, one margin and one ROI insight, in that order.
#[must_use]
pub fn generate_insights(metrics: &DashboardMetrics) -> Vec<Insight> {
    let mut insights = Vec::new();

    let revenue_growth = metrics.growth.total_revenue;
    if revenue_growth > REVENUE_GROWTH_THRESHOLD {
        insights.push(insight(
            InsightType::Positive,
            "Strong Revenue Growth",
            format!(
                "Revenue increased by {}% compared to the previous period.",
                percent(revenue_growth)
            ),
        ));
    } else if revenue_growth < -REVENUE_GROWTH_THRESHOLD {
        insights.push(insight(
            InsightType::Warning,
            "Revenue Decline",
            format!(
                "Revenue decreased by {}%. Consider reviewing pricing and marketing strategies.",
                percent(revenue_growth.abs())
            ),
        ));
    }

    let margin = metrics.current.profit_margin;
    if margin > HEALTHY_MARGIN {
        insights.push(insight(
            InsightType::Positive,
            "Healthy Profit Margin",
            format!(
                "Profit margin of {}% indicates strong operational efficiency.",
                percent(margin)
            ),
        ));
    } else if margin < LOW_MARGIN {
        insights.push(insight(
            InsightType::Warning,
            "Low Profit Margin",
            format!(
                "Profit margin of {}% is below optimal. Review expenses and pricing.",
                percent(margin)
            ),
        ));
    }

    let roi = metrics.current.roi;
    if roi > EXCELLENT_ROI {
        insights.push(insight(
            InsightType::Positive,
            "Excellent ROI",
            format!("ROI of {}% demonstrates strong investment returns.", percent(roi)),
        ));
    }

    insights
}
