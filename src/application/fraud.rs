use crate::domain::amount::Amount;
use crate::domain::fraud::Verdict;
use crate::domain::ports::RiskServiceBox;
use crate::error::{PaymentError, Result};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use uuid::Uuid;

/// Runs the fraud check for a single transaction.
///
/// The wait on the risk service is a future, so any number of evaluations
/// can be in flight without a thread each. Every call is raced against the
/// caller's cancellation token and the optional timeout.
pub struct FraudEvaluator {
    risk_service: RiskServiceBox,
    timeout: Option<Duration>,
}

impl FraudEvaluator {
    pub fn new(risk_service: RiskServiceBox) -> Self {
        Self {
            risk_service,
            timeout: None,
        }
    }

    /// Gives up on the risk service after `timeout`, reported as an interruption.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Obtains a verdict for `amount`.
    ///
    /// If `cancel` fires (or the timeout elapses) before the risk service
    /// answers, returns `PaymentError::FraudCheckInterrupted`. The token is
    /// left cancelled so enclosing supervisors observe the interruption too.
    pub async fn evaluate(
        &self,
        transaction_id: Uuid,
        amount: Amount,
        cancel: &CancellationToken,
    ) -> Result<Verdict> {
        info!("Initiating fraud check for transaction: {}", transaction_id);

        let assessment = self.risk_service.assess(amount);
        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            _ = sleep_or_forever(self.timeout) => {
                error!(
                    "Fraud check timed out for transaction: {} after {:?}",
                    transaction_id, self.timeout
                );
                None
            }
            verdict = assessment => Some(verdict?),
        };

        match outcome {
            Some(verdict) => {
                info!(
                    "Fraud check completed for transaction: {}, result: {}",
                    transaction_id,
                    if verdict == Verdict::Approved {
                        "PASSED"
                    } else {
                        "FAILED"
                    }
                );
                Ok(verdict)
            }
            None => {
                error!("Fraud check interrupted for transaction: {}", transaction_id);
                cancel.cancel();
                Err(PaymentError::FraudCheckInterrupted(transaction_id))
            }
        }
    }
}

async fn sleep_or_forever(timeout: Option<Duration>) {
    match timeout {
        Some(duration) => tokio::time::sleep(duration).await,
        None => std::future::pending::<()>().await,
    }
}
