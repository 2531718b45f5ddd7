use crate::application::orchestrator::TransactionOrchestrator;
use crate::domain::transaction::Transaction;
use crate::error::{PaymentError, Result};
use crate::interfaces::dto::TransactionRequest;
use std::sync::Arc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::error;

/// Result of one request in a batch, tagged with its position in the input.
#[derive(Debug)]
pub struct BatchOutcome {
    pub index: usize,
    pub result: Result<Transaction>,
}

/// Submits every request as its own task and waits for all of them.
///
/// Each task gets a child of `shutdown`, so cancelling `shutdown` interrupts
/// every in-flight fraud check while a single task's interruption stays local.
/// Outcomes are returned in input order.
pub async fn submit_all(
    orchestrator: Arc<TransactionOrchestrator>,
    requests: Vec<TransactionRequest>,
    shutdown: &CancellationToken,
) -> Vec<BatchOutcome> {
    let mut tasks = JoinSet::new();
    for (index, request) in requests.into_iter().enumerate() {
        let orchestrator = Arc::clone(&orchestrator);
        let token = shutdown.child_token();
        tasks.spawn(async move {
            let result = orchestrator
                .process_transaction(&request.account_id, request.amount, &token)
                .await;
            BatchOutcome { index, result }
        });
    }

    let mut outcomes = Vec::with_capacity(tasks.len());
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(outcome) => outcomes.push(outcome),
            Err(e) => {
                // The index is lost with a panicked task; report it separately.
                error!("Transaction task failed: {}", e);
                outcomes.push(BatchOutcome {
                    index: usize::MAX,
                    result: Err(PaymentError::Internal(Box::new(e))),
                });
            }
        }
    }
    outcomes.sort_by_key(|outcome| outcome.index);
    outcomes
}
