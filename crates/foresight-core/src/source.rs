//! Transaction source collaborator interface

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::Result;
use crate::models::Transaction;

/// Supplier of transaction records for the forecast engine
///
/// Implementations should return every transaction on or after `since`.
/// The engine treats any error as "zero transactions available" and does
/// not retry; implementations own their own transport concerns.
#[async_trait]
pub trait TransactionSource: Send + Sync {
    async fn fetch(&self, since: NaiveDate) -> Result<Vec<Transaction>>;
}

/// In-memory source over a fixed transaction list
///
/// Useful for tests and for callers that already hold the records.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    transactions: Vec<Transaction>,
}

impl StaticSource {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }
}

#[async_trait]
impl TransactionSource for StaticSource {
    async fn fetch(&self, since: NaiveDate) -> Result<Vec<Transaction>> {
        Ok(self
            .transactions
            .iter()
            .filter(|tx| tx.occurred_on >= since)
            .cloned()
            .collect())
    }
}
