use crate::domain::amount::Amount;
use crate::domain::ports::TransactionStore;
use crate::domain::transaction::{Transaction, TransactionStatus, sort_newest_first};
use crate::error::{PaymentError, Result};
use crate::infrastructure::clock::MonotonicClock;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
struct State {
    transactions: HashMap<Uuid, Transaction>,
}

impl State {
    fn collect<F>(&self, filter: F) -> Vec<Transaction>
    where
        F: Fn(&Transaction) -> bool,
    {
        let mut found: Vec<Transaction> = self
            .transactions
            .values()
            .filter(|&tx| filter(tx))
            .cloned()
            .collect();
        sort_newest_first(&mut found);
        found
    }
}

/// A thread-safe in-memory store for transactions.
///
/// Uses `Arc<RwLock<..>>` for shared concurrent access. Clones share the
/// same records. Ideal for tests and single-process deployments where
/// persistence is not required.
#[derive(Default, Clone)]
pub struct InMemoryTransactionStore {
    state: Arc<RwLock<State>>,
    clock: MonotonicClock,
}

impl InMemoryTransactionStore {
    /// Creates a new, empty in-memory transaction store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TransactionStore for InMemoryTransactionStore {
    async fn create(&self, account_id: &str, amount: Amount) -> Result<Transaction> {
        let mut state = self.state.write().await;
        let tx = Transaction::new(account_id.to_string(), amount, self.clock.now());
        state.transactions.insert(tx.id, tx.clone());
        Ok(tx)
    }

    async fn update(&self, id: Uuid, status: TransactionStatus) -> Result<Transaction> {
        let mut state = self.state.write().await;
        let tx = state
            .transactions
            .get_mut(&id)
            .ok_or(PaymentError::NotFound(id))?;
        if !tx.can_transition_to(status) {
            return Err(PaymentError::InvalidTransition {
                id,
                from: tx.status,
                to: status,
            });
        }
        tx.status = status;
        Ok(tx.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Transaction>> {
        let state = self.state.read().await;
        Ok(state.transactions.get(&id).cloned())
    }

    async fn find_by_account(&self, account_id: &str) -> Result<Vec<Transaction>> {
        let state = self.state.read().await;
        Ok(state.collect(|tx| tx.account_id == account_id))
    }

    async fn find_by_status(&self, status: TransactionStatus) -> Result<Vec<Transaction>> {
        let state = self.state.read().await;
        Ok(state.collect(|tx| tx.status == status))
    }

    async fn find_by_account_and_status(
        &self,
        account_id: &str,
        status: TransactionStatus,
    ) -> Result<Vec<Transaction>> {
        let state = self.state.read().await;
        Ok(state.collect(|tx| tx.account_id == account_id && tx.status == status))
    }

    async fn find_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Transaction>> {
        let state = self.state.read().await;
        Ok(state.collect(|tx| tx.timestamp >= start && tx.timestamp <= end))
    }

    async fn find_all(&self) -> Result<Vec<Transaction>> {
        let state = self.state.read().await;
        Ok(state.collect(|_| true))
    }

    async fn exists_by_account(&self, account_id: &str) -> Result<bool> {
        let state = self.state.read().await;
        Ok(state
            .transactions
            .values()
            .any(|tx| tx.account_id == account_id))
    }
}
