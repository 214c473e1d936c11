//! Transaction file import
//!
//! Loads transaction ledgers from CSV or JSON files. The CSV layout is the
//! Foresight export format: a header row with `Date,Kind,Category,Amount`
//! columns in any order, plus an optional `Id` column. JSON files hold an
//! array of wire-format transactions.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use async_trait::async_trait;
use chrono::NaiveDate;
use csv::ReaderBuilder;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{Transaction, TransactionKind};
use crate::source::TransactionSource;

/// Locate a header column by name, case-insensitive
fn column_index(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
}

/// Parse CSV ledger data into transactions
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<Transaction>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let date_col = column_index(&headers, "Date")
        .ok_or_else(|| Error::InvalidData("Missing 'Date' column".into()))?;
    let kind_col = column_index(&headers, "Kind")
        .ok_or_else(|| Error::InvalidData("Missing 'Kind' column".into()))?;
    let category_col = column_index(&headers, "Category")
        .ok_or_else(|| Error::InvalidData("Missing 'Category' column".into()))?;
    let amount_col = column_index(&headers, "Amount")
        .ok_or_else(|| Error::InvalidData("Missing 'Amount' column".into()))?;
    let id_col = column_index(&headers, "Id");

    let mut transactions = Vec::new();

    for (row, record) in rdr.records().enumerate() {
        let record = record?;
        let field = |i: usize| record.get(i).unwrap_or("").to_string();

        let occurred_on = NaiveDate::parse_from_str(&field(date_col), "%Y-%m-%d")
            .map_err(|e| {
                Error::InvalidData(format!("Row {}: bad date '{}': {}", row + 1, field(date_col), e))
            })?;
        let kind = TransactionKind::from_str(&field(kind_col))
            .map_err(|e| Error::InvalidData(format!("Row {}: {}", row + 1, e)))?;
        let amount: f64 = field(amount_col).parse().map_err(|_| {
            Error::InvalidData(format!("Row {}: bad amount '{}'", row + 1, field(amount_col)))
        })?;
        if amount < 0.0 {
            return Err(Error::InvalidData(format!(
                "Row {}: negative amount; sign belongs in the Kind column",
                row + 1
            )));
        }

        let id = id_col
            .map(|i| field(i))
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| format!("row-{}", row + 1));

        transactions.push(Transaction {
            id,
            amount,
            kind,
            category: field(category_col),
            occurred_on,
        });
    }

    debug!(count = transactions.len(), "Parsed transaction CSV");
    Ok(transactions)
}

/// Parse a JSON array of wire-format transactions
pub fn parse_json<R: Read>(reader: R) -> Result<Vec<Transaction>> {
    let transactions: Vec<Transaction> = serde_json::from_reader(reader)?;
    debug!(count = transactions.len(), "Parsed transaction JSON");
    Ok(transactions)
}

/// Load a transaction file, choosing the parser by extension
///
/// `.json` files are parsed as a wire-format array; everything else as CSV.
pub fn load_file(path: &Path) -> Result<Vec<Transaction>> {
    let file = std::fs::File::open(path)?;
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => parse_json(file),
        _ => parse_csv(file),
    }
}

/// File-backed transaction source
///
/// Re-reads the file on every fetch so a refreshed export is picked up
/// without restarting the caller.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl TransactionSource for FileSource {
    async fn fetch(&self, since: NaiveDate) -> Result<Vec<Transaction>> {
        let transactions = load_file(&self.path)?;
        Ok(transactions
            .into_iter()
            .filter(|tx| tx.occurred_on >= since)
            .collect())
    }
}
