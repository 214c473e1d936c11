//! Aggregate command implementation

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;

use foresight_core::{aggregate, import, TransactionKind};

/// Summarize a transaction file without calling the oracle
pub fn cmd_aggregate(file: &Path, json: bool) -> Result<()> {
    let transactions = import::load_file(file)
        .with_context(|| format!("Failed to load {}", file.display()))?;
    let expenses: Vec<_> = transactions
        .into_iter()
        .filter(|tx| tx.kind == TransactionKind::Expense)
        .collect();

    let agg = aggregate(&expenses, Utc::now().date_naive());

    if json {
        println!("{}", serde_json::to_string_pretty(&agg)?);
        return Ok(());
    }

    println!(
        "💰 ${:.2} across {} expense transactions (average ${:.2})",
        agg.total_amount, agg.transaction_count, agg.average_transaction
    );

    if !agg.top_categories.is_empty() {
        println!("\nTop categories:");
        for share in &agg.top_categories {
            println!(
                "  {:<20} ${:>10.2}  {:>5.1}%",
                share.category, share.amount, share.percentage_of_total
            );
        }
    }

    println!("\nMonthly buckets (most recent first):");
    for bucket in &agg.monthly_buckets {
        println!(
            "  {} to {}  ${:>10.2}  ({} transactions)",
            bucket.start_date, bucket.end_date, bucket.total, bucket.count
        );
    }

    Ok(())
}
