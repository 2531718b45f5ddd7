use crate::application::fraud::FraudEvaluator;
use crate::domain::ports::TransactionStoreBox;
use crate::domain::transaction::{Transaction, TransactionStatus};
use crate::domain::validation::{TransactionLimits, validate};
use crate::error::{PaymentError, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// The main entry point for transaction processing.
///
/// `TransactionOrchestrator` runs validation, persists a pending record,
/// waits for the fraud verdict and records the outcome. It holds no mutable
/// state of its own, so a single instance is shared (behind an `Arc`) by
/// every concurrent request.
pub struct TransactionOrchestrator {
    store: TransactionStoreBox,
    evaluator: FraudEvaluator,
    limits: TransactionLimits,
}

impl TransactionOrchestrator {
    /// Creates a new `TransactionOrchestrator`.
    ///
    /// # Arguments
    ///
    /// * `store` - The transaction record store.
    /// * `evaluator` - The fraud check run before a record is finalized.
    /// * `limits` - Admission limits applied by the validator.
    pub fn new(
        store: TransactionStoreBox,
        evaluator: FraudEvaluator,
        limits: TransactionLimits,
    ) -> Self {
        Self {
            store,
            evaluator,
            limits,
        }
    }

    /// Validates, records and fraud-checks a request, returning the final record.
    ///
    /// The pending record is written before the fraud check starts. When the
    /// check is interrupted or the risk service errors, the record is closed
    /// as `Failed` and the evaluator's error is returned.
    pub async fn process_transaction(
        &self,
        account_id: &str,
        amount: Option<Decimal>,
        cancel: &CancellationToken,
    ) -> Result<Transaction> {
        info!(
            "Starting transaction processing for account: {}, amount: {:?}",
            account_id, amount
        );

        let request = validate(&self.limits, account_id, amount)?;

        let pending = self
            .store
            .create(&request.account_id, request.amount)
            .await?;
        info!("Transaction created with ID: {}", pending.id);

        let verdict = match self
            .evaluator
            .evaluate(pending.id, pending.amount, cancel)
            .await
        {
            Ok(verdict) => verdict,
            Err(err) => {
                if !matches!(err, PaymentError::FraudCheckInterrupted(_)) {
                    error!("Fraud check failed for transaction {}: {}", pending.id, err);
                }
                // A record never stays pending once its check has ended.
                if let Err(update_err) = self
                    .store
                    .update(pending.id, TransactionStatus::Failed)
                    .await
                {
                    error!(
                        "Could not mark transaction {} as failed: {}",
                        pending.id, update_err
                    );
                }
                return Err(err);
            }
        };

        let status = TransactionStatus::from(verdict);
        match status {
            TransactionStatus::Rejected => {
                warn!("Transaction {} rejected by fraud check", pending.id)
            }
            _ => info!("Transaction {} approved after fraud check", pending.id),
        }

        let finalized = self.store.update(pending.id, status).await?;
        info!(
            "Transaction processing completed for ID: {}, final status: {}",
            finalized.id, finalized.status
        );
        Ok(finalized)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Transaction> {
        debug!("Retrieving transaction by ID: {}", id);
        self.store
            .find_by_id(id)
            .await?
            .ok_or(PaymentError::NotFound(id))
    }

    pub async fn get_by_account(&self, account_id: &str) -> Result<Vec<Transaction>> {
        debug!("Retrieving transactions for account: {}", account_id);
        self.store.find_by_account(account_id).await
    }

    pub async fn get_by_status(&self, status: TransactionStatus) -> Result<Vec<Transaction>> {
        debug!("Retrieving transactions by status: {}", status);
        self.store.find_by_status(status).await
    }

    pub async fn get_by_account_and_status(
        &self,
        account_id: &str,
        status: TransactionStatus,
    ) -> Result<Vec<Transaction>> {
        debug!(
            "Retrieving transactions for account: {} with status: {}",
            account_id, status
        );
        self.store
            .find_by_account_and_status(account_id, status)
            .await
    }

    /// Records created within `[start, end]`, newest first.
    pub async fn get_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Transaction>> {
        debug!("Retrieving transactions between {} and {}", start, end);
        self.store.find_between(start, end).await
    }

    pub async fn get_all(&self) -> Result<Vec<Transaction>> {
        debug!("Retrieving all transactions");
        self.store.find_all().await
    }

    /// Sum of amounts for an account's records in `status`; zero when there are none.
    pub async fn total_by_account_and_status(
        &self,
        account_id: &str,
        status: TransactionStatus,
    ) -> Result<Decimal> {
        let records = self
            .store
            .find_by_account_and_status(account_id, status)
            .await?;
        Ok(records.iter().map(|tx| tx.amount.value()).sum())
    }

    pub async fn account_exists(&self, account_id: &str) -> Result<bool> {
        self.store.exists_by_account(account_id).await
    }
}
