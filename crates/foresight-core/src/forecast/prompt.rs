//! Forecast prompt construction
//!
//! Renders an aggregate into a natural-language prompt for the oracle,
//! ending with an explicit JSON-schema instruction. Pure function: the same
//! aggregate and period always produce the same prompt. Length is bounded by
//! the aggregate's structure (≤5 top categories, 4 buckets).

use std::fmt::Write;

use crate::models::{Aggregate, ForecastPeriod, PeriodBucket};

/// Pick the bucket series matching the analysis granularity
fn buckets_for(aggregate: &Aggregate, period: ForecastPeriod) -> (&'static str, &[PeriodBucket]) {
    match period {
        ForecastPeriod::Week => ("7-day", &aggregate.weekly_buckets),
        ForecastPeriod::Month => ("30-day", &aggregate.monthly_buckets),
        ForecastPeriod::Year => ("90-day", &aggregate.quarterly_buckets),
    }
}

/// Build the oracle prompt for an aggregate
pub fn build_prompt(aggregate: &Aggregate, period: ForecastPeriod) -> String {
    let mut prompt = String::new();

    let _ = writeln!(
        prompt,
        "You are a personal finance assistant. Forecast spending for the next {}.",
        period.as_str()
    );
    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "Spending history summary:");
    let _ = writeln!(
        prompt,
        "- Total spent: ${:.2} across {} transactions (average ${:.2})",
        aggregate.total_amount, aggregate.transaction_count, aggregate.average_transaction
    );

    if !aggregate.top_categories.is_empty() {
        let _ = writeln!(prompt, "- Top categories:");
        for share in &aggregate.top_categories {
            let _ = writeln!(
                prompt,
                "  - {}: ${:.2} ({:.1}% of total)",
                share.category, share.amount, share.percentage_of_total
            );
        }
    }

    let (label, buckets) = buckets_for(aggregate, period);
    let _ = writeln!(prompt, "- Recent {} totals, most recent first:", label);
    for bucket in buckets {
        let _ = writeln!(
            prompt,
            "  - {} to {}: ${:.2} ({} transactions)",
            bucket.start_date, bucket.end_date, bucket.total, bucket.count
        );
    }

    let _ = writeln!(prompt);
    let _ = writeln!(
        prompt,
        "Respond with a single JSON object and nothing else, matching exactly:"
    );
    let _ = writeln!(
        prompt,
        r#"{{"totalForecast": <number >= 0>, "categoryForecasts": {{"<category>": <number>}}, "trend": "INCREASING" | "DECREASING" | "STABLE", "confidence": <integer 0-100>, "recommendations": [<strings>], "insights": [<strings>]}}"#
    );

    prompt
}
