use crate::domain::amount::Amount;
use crate::domain::ports::TransactionStore;
use crate::domain::transaction::{Transaction, TransactionStatus, sort_newest_first};
use crate::error::{PaymentError, Result};
use crate::infrastructure::clock::MonotonicClock;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, DB, IteratorMode, Options};
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

/// Column Family for storing transaction records.
pub const CF_TRANSACTIONS: &str = "transactions";

/// A persistent store implementation using RocksDB.
///
/// Records are keyed by the 16 bytes of their UUID and stored as JSON in the
/// `transactions` column family. Secondary lookups scan the column family,
/// which is acceptable for the volumes this service handles.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<DB>,
    clock: MonotonicClock,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Ensures that the `transactions` column family exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_transactions = ColumnFamilyDescriptor::new(CF_TRANSACTIONS, Options::default());
        let db = DB::open_cf_descriptors(&opts, path, vec![cf_transactions])?;

        Ok(Self {
            db: Arc::new(db),
            clock: MonotonicClock::new(),
        })
    }

    fn put(&self, tx: &Transaction) -> Result<()> {
        let cf = self.cf()?;
        let value = serde_json::to_vec(tx)
            .map_err(|e| PaymentError::Storage(format!("Serialization error: {}", e)))?;
        self.db.put_cf(cf, tx.id.as_bytes(), value)?;
        Ok(())
    }

    fn cf(&self) -> Result<&ColumnFamily> {
        self.db
            .cf_handle(CF_TRANSACTIONS)
            .ok_or_else(|| PaymentError::Storage("Transactions column family not found".into()))
    }

    fn scan<F>(&self, filter: F) -> Result<Vec<Transaction>>
    where
        F: Fn(&Transaction) -> bool,
    {
        let cf = self.cf()?;
        let mut found = Vec::new();
        for item in self.db.iterator_cf(cf, IteratorMode::Start) {
            let (_key, value) = item?;
            let tx: Transaction = serde_json::from_slice(&value).map_err(|e| {
                PaymentError::Storage(format!("Failed to deserialize transaction: {}", e))
            })?;
            if filter(&tx) {
                found.push(tx);
            }
        }
        sort_newest_first(&mut found);
        Ok(found)
    }
}

#[async_trait]
impl TransactionStore for RocksDBStore {
    async fn create(&self, account_id: &str, amount: Amount) -> Result<Transaction> {
        let tx = Transaction::new(account_id.to_string(), amount, self.clock.now());
        self.put(&tx)?;
        Ok(tx)
    }

    async fn update(&self, id: Uuid, status: TransactionStatus) -> Result<Transaction> {
        let mut tx = self
            .find_by_id(id)
            .await?
            .ok_or(PaymentError::NotFound(id))?;
        if !tx.can_transition_to(status) {
            return Err(PaymentError::InvalidTransition {
                id,
                from: tx.status,
                to: status,
            });
        }
        tx.status = status;
        self.put(&tx)?;
        Ok(tx)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Transaction>> {
        let cf = self.cf()?;
        match self.db.get_cf(cf, id.as_bytes())? {
            Some(bytes) => {
                let tx = serde_json::from_slice(&bytes).map_err(|e| {
                    PaymentError::Storage(format!("Deserialization error: {}", e))
                })?;
                Ok(Some(tx))
            }
            None => Ok(None),
        }
    }

    async fn find_by_account(&self, account_id: &str) -> Result<Vec<Transaction>> {
        self.scan(|tx| tx.account_id == account_id)
    }

    async fn find_by_status(&self, status: TransactionStatus) -> Result<Vec<Transaction>> {
        self.scan(|tx| tx.status == status)
    }

    async fn find_by_account_and_status(
        &self,
        account_id: &str,
        status: TransactionStatus,
    ) -> Result<Vec<Transaction>> {
        self.scan(|tx| tx.account_id == account_id && tx.status == status)
    }

    async fn find_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Transaction>> {
        self.scan(|tx| tx.timestamp >= start && tx.timestamp <= end)
    }

    async fn find_all(&self) -> Result<Vec<Transaction>> {
        self.scan(|_| true)
    }

    async fn exists_by_account(&self, account_id: &str) -> Result<bool> {
        Ok(!self.scan(|tx| tx.account_id == account_id)?.is_empty())
    }
}
