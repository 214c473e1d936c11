//! Transaction aggregation
//!
//! Turns a flat transaction list into category totals and rolling period
//! buckets. Filtering is the caller's responsibility: this module assumes it
//! only receives transactions relevant to the analysis window (the service
//! pre-filters by expense kind and lookback).

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};

use crate::models::{Aggregate, CategoryShare, PeriodBucket, Transaction};

/// Buckets per granularity, counted backward from "now"
pub const BUCKET_COUNT: i64 = 4;

/// Entries kept in the top-category breakdown
pub const TOP_CATEGORY_LIMIT: usize = 5;

/// Aggregate a transaction set as of `today`
///
/// `today` is an explicit parameter rather than an ambient clock read, so
/// the same input always produces the same aggregate.
pub fn aggregate(transactions: &[Transaction], today: NaiveDate) -> Aggregate {
    let mut category_totals: BTreeMap<String, f64> = BTreeMap::new();
    let mut first_seen: Vec<String> = Vec::new();
    let mut total_amount = 0.0;

    for tx in transactions {
        total_amount += tx.amount;
        if !category_totals.contains_key(&tx.category) {
            first_seen.push(tx.category.clone());
        }
        *category_totals.entry(tx.category.clone()).or_insert(0.0) += tx.amount;
    }

    let transaction_count = transactions.len() as u32;
    let average_transaction = if transaction_count == 0 {
        0.0
    } else {
        total_amount / transaction_count as f64
    };

    // First-seen order in, stable sort by amount: ties keep first-seen order.
    let mut top_categories: Vec<CategoryShare> = first_seen
        .iter()
        .map(|category| {
            let amount = category_totals[category];
            CategoryShare {
                category: category.clone(),
                amount,
                percentage_of_total: if total_amount == 0.0 {
                    0.0
                } else {
                    amount / total_amount * 100.0
                },
            }
        })
        .collect();
    top_categories.sort_by(|a, b| b.amount.partial_cmp(&a.amount).unwrap_or(Ordering::Equal));
    top_categories.truncate(TOP_CATEGORY_LIMIT);

    Aggregate {
        total_amount,
        transaction_count,
        average_transaction,
        category_totals,
        top_categories,
        weekly_buckets: bucket(transactions, today, 7),
        monthly_buckets: bucket(transactions, today, 30),
        quarterly_buckets: bucket(transactions, today, 90),
    }
}

/// Build 4 contiguous, non-overlapping buckets of `bucket_days` each
///
/// Bucket `i` covers `[today - (i+1)*days, today - i*days)`; the end date is
/// exclusive. Returned most-recent first.
fn bucket(transactions: &[Transaction], today: NaiveDate, bucket_days: i64) -> Vec<PeriodBucket> {
    (0..BUCKET_COUNT)
        .map(|i| {
            let end_date = today - Duration::days(i * bucket_days);
            let start_date = end_date - Duration::days(bucket_days);

            let mut total = 0.0;
            let mut count = 0u32;
            for tx in transactions {
                if tx.occurred_on >= start_date && tx.occurred_on < end_date {
                    total += tx.amount;
                    count += 1;
                }
            }

            PeriodBucket {
                start_date,
                end_date,
                total,
                count,
                average: if count == 0 { 0.0 } else { total / count as f64 },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionKind;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()
    }

    fn expense(id: &str, amount: f64, category: &str, days_ago: i64) -> Transaction {
        Transaction {
            id: id.to_string(),
            amount,
            kind: TransactionKind::Expense,
            category: category.to_string(),
            occurred_on: today() - Duration::days(days_ago),
        }
    }

    #[test]
    fn test_empty_list() {
        let agg = aggregate(&[], today());
        assert_eq!(agg.total_amount, 0.0);
        assert_eq!(agg.transaction_count, 0);
        assert_eq!(agg.average_transaction, 0.0);
        assert!(agg.category_totals.is_empty());
        assert!(agg.top_categories.is_empty());
        assert_eq!(agg.weekly_buckets.len(), 4);
        assert!(agg.weekly_buckets.iter().all(|b| b.total == 0.0 && b.count == 0));
    }

    #[test]
    fn test_category_totals_and_shares() {
        let txs = vec![
            expense("1", 50.0, "Food", 3),
            expense("2", 30.0, "Food", 8),
            expense("3", 20.0, "Transport", 5),
        ];
        let agg = aggregate(&txs, today());

        assert_eq!(agg.total_amount, 100.0);
        assert_eq!(agg.transaction_count, 3);
        assert_eq!(agg.category_totals["Food"], 80.0);
        assert_eq!(agg.category_totals["Transport"], 20.0);

        assert_eq!(agg.top_categories.len(), 2);
        assert_eq!(agg.top_categories[0].category, "Food");
        assert_eq!(agg.top_categories[0].amount, 80.0);
        assert_eq!(agg.top_categories[0].percentage_of_total, 80.0);
        assert_eq!(agg.top_categories[1].category, "Transport");
        assert_eq!(agg.top_categories[1].percentage_of_total, 20.0);
    }

    #[test]
    fn test_category_totals_sum_to_total() {
        let txs = vec![
            expense("1", 12.25, "Food", 1),
            expense("2", 7.5, "Transport", 2),
            expense("3", 30.0, "Rent", 3),
            expense("4", 0.25, "Food", 4),
        ];
        let agg = aggregate(&txs, today());
        let sum: f64 = agg.category_totals.values().sum();
        assert_eq!(sum, agg.total_amount);
    }

    #[test]
    fn test_top_categories_limit_and_tie_break() {
        let mut txs: Vec<Transaction> = ["A", "B", "C", "D", "E", "F"]
            .iter()
            .enumerate()
            .map(|(i, c)| expense(&format!("{}", i), 10.0, c, 2))
            .collect();
        // make A the clear winner, leave B..F tied at 10
        txs.push(expense("boost", 5.0, "A", 2));

        let agg = aggregate(&txs, today());
        assert_eq!(agg.top_categories.len(), TOP_CATEGORY_LIMIT);
        assert_eq!(agg.top_categories[0].category, "A");
        // tied categories keep first-seen order
        let tied: Vec<&str> = agg.top_categories[1..]
            .iter()
            .map(|s| s.category.as_str())
            .collect();
        assert_eq!(tied, vec!["B", "C", "D", "E"]);
    }

    #[test]
    fn test_categories_are_case_sensitive() {
        let txs = vec![
            expense("1", 10.0, "food", 1),
            expense("2", 20.0, "Food", 1),
        ];
        let agg = aggregate(&txs, today());
        assert_eq!(agg.category_totals.len(), 2);
        assert_eq!(agg.category_totals["food"], 10.0);
        assert_eq!(agg.category_totals["Food"], 20.0);
    }

    #[test]
    fn test_buckets_are_contiguous_most_recent_first() {
        let agg = aggregate(&[], today());
        for buckets in [&agg.weekly_buckets, &agg.monthly_buckets, &agg.quarterly_buckets] {
            assert_eq!(buckets.len(), 4);
            assert_eq!(buckets[0].end_date, today());
            for i in 1..4 {
                assert_eq!(buckets[i].end_date, buckets[i - 1].start_date);
            }
        }
        assert_eq!(
            agg.weekly_buckets[0].start_date,
            today() - Duration::days(7)
        );
        assert_eq!(
            agg.quarterly_buckets[3].start_date,
            today() - Duration::days(360)
        );
    }

    #[test]
    fn test_bucket_boundaries_end_exclusive() {
        let txs = vec![
            // exactly on today: outside every bucket (end is exclusive)
            expense("on-today", 1.0, "Food", 0),
            // exactly on the 7-day boundary: first day of bucket 1
            expense("on-week-edge", 2.0, "Food", 7),
            expense("inside", 4.0, "Food", 3),
        ];
        let agg = aggregate(&txs, today());

        // bucket 0 covers [today-7, today): the 3-days-ago tx only
        assert_eq!(agg.weekly_buckets[0].total, 4.0);
        assert_eq!(agg.weekly_buckets[0].count, 1);
        // the boundary tx lands in bucket 1, [today-14, today-7)
        assert_eq!(agg.weekly_buckets[1].total, 2.0);
        // today's tx is in no weekly bucket, but still in the totals
        let bucketed: f64 = agg.weekly_buckets.iter().map(|b| b.total).sum();
        assert_eq!(bucketed, 6.0);
        assert_eq!(agg.total_amount, 7.0);
    }

    #[test]
    fn test_bucket_averages() {
        let txs = vec![
            expense("1", 10.0, "Food", 2),
            expense("2", 30.0, "Food", 4),
        ];
        let agg = aggregate(&txs, today());
        assert_eq!(agg.weekly_buckets[0].count, 2);
        assert_eq!(agg.weekly_buckets[0].average, 20.0);
        assert_eq!(agg.weekly_buckets[1].average, 0.0);
    }
}
