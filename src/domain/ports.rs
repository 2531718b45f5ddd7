use super::amount::Amount;
use super::fraud::Verdict;
use super::transaction::{Transaction, TransactionStatus};
use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Persistence port for transaction records.
///
/// Implementations assign `id` and `timestamp` on `create` and must tolerate
/// concurrent callers without external locking. List queries return records
/// newest first.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    async fn create(&self, account_id: &str, amount: Amount) -> Result<Transaction>;
    /// Fails with `PaymentError::NotFound` when `id` was never created.
    async fn update(&self, id: Uuid, status: TransactionStatus) -> Result<Transaction>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Transaction>>;
    async fn find_by_account(&self, account_id: &str) -> Result<Vec<Transaction>>;
    async fn find_by_status(&self, status: TransactionStatus) -> Result<Vec<Transaction>>;
    async fn find_by_account_and_status(
        &self,
        account_id: &str,
        status: TransactionStatus,
    ) -> Result<Vec<Transaction>>;
    async fn find_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Transaction>>;
    async fn find_all(&self) -> Result<Vec<Transaction>>;
    async fn exists_by_account(&self, account_id: &str) -> Result<bool>;
}

/// Port to the external risk system consulted before a verdict is issued.
#[async_trait]
pub trait RiskService: Send + Sync {
    async fn assess(&self, amount: Amount) -> Result<Verdict>;
}

pub type TransactionStoreBox = Box<dyn TransactionStore>;
pub type RiskServiceBox = Box<dyn RiskService>;
