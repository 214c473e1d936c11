//! Deterministic fallback projection
//!
//! Multiplier-based forecast from aggregates alone. Never fails, never calls
//! external services; every oracle problem eventually lands here.

use chrono::Utc;
use tracing::debug;

use crate::models::{Aggregate, Forecast, ForecastPeriod, ForecastSource, Trend};

/// Confidence assigned to every fallback forecast
pub const FALLBACK_CONFIDENCE: u8 = 60;

/// Project a forecast from an aggregate without consulting the oracle
///
/// Pure apart from the `generated_at` timestamp: identical inputs yield an
/// identical forecast otherwise. The fallback makes no trend claim beyond
/// STABLE since it has no comparative basis.
pub fn project(aggregate: &Aggregate, period: ForecastPeriod) -> Forecast {
    let multiplier = match period {
        ForecastPeriod::Week => 0.25,
        ForecastPeriod::Month => 1.0,
        ForecastPeriod::Year => 12.0,
    };

    let months_observed = aggregate
        .monthly_buckets
        .iter()
        .filter(|b| b.count > 0)
        .count()
        .max(1) as f64;
    let average_monthly =
        aggregate.monthly_buckets.iter().map(|b| b.total).sum::<f64>() / months_observed;

    let total_forecast = average_monthly * multiplier;
    let category_forecasts = aggregate
        .category_totals
        .iter()
        .map(|(category, amount)| (category.clone(), amount / months_observed * multiplier))
        .collect();

    let (recommendations, insights) = if aggregate.transaction_count == 0 {
        (
            vec!["Record expense transactions to unlock a personalized forecast".to_string()],
            vec!["Insufficient data: no expense activity in the analysis window".to_string()],
        )
    } else {
        let mut insights = vec![format!(
            "Average monthly spending is ${:.2}",
            average_monthly
        )];
        let mut recommendations = vec![format!(
            "Set a {} budget around ${:.2} based on your recent average",
            period.as_str().to_lowercase(),
            total_forecast
        )];
        if let Some(top) = aggregate.top_categories.first() {
            insights.push(format!(
                "Largest category is {} (${:.2}, {:.0}% of spending)",
                top.category, top.amount, top.percentage_of_total
            ));
            recommendations.push(format!(
                "Review {} spending for savings opportunities",
                top.category
            ));
        }
        (recommendations, insights)
    };

    debug!(
        period = period.as_str(),
        total = total_forecast,
        months_observed,
        "Fallback projection computed"
    );

    Forecast {
        period,
        total_forecast,
        category_forecasts,
        trend: Trend::Stable,
        confidence: FALLBACK_CONFIDENCE,
        recommendations,
        insights,
        generated_at: Utc::now(),
        source: ForecastSource::Fallback,
    }
}
