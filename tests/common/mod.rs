#![allow(dead_code)]

use fincore::application::fraud::FraudEvaluator;
use fincore::application::orchestrator::TransactionOrchestrator;
use fincore::domain::fraud::ThresholdPolicy;
use fincore::domain::validation::TransactionLimits;
use fincore::infrastructure::in_memory::InMemoryTransactionStore;
use fincore::infrastructure::risk::SimulatedRiskService;
use std::io::{Error, Write};
use std::time::Duration;
use tempfile::NamedTempFile;

/// Writes an `account_id, amount` CSV with the given rows.
pub fn requests_csv(rows: &[(&str, &str)]) -> Result<NamedTempFile, Error> {
    let mut file = NamedTempFile::new()?;
    writeln!(file, "account_id, amount")?;
    for (account, amount) in rows {
        writeln!(file, "{}, {}", account, amount)?;
    }
    file.flush()?;
    Ok(file)
}

/// Orchestrator over a fresh in-memory store with the default fraud policy.
pub fn orchestrator(latency: Duration) -> (TransactionOrchestrator, InMemoryTransactionStore) {
    let store = InMemoryTransactionStore::new();
    let risk = SimulatedRiskService::new(latency, Box::new(ThresholdPolicy::default()));
    let orchestrator = TransactionOrchestrator::new(
        Box::new(store.clone()),
        FraudEvaluator::new(Box::new(risk)),
        TransactionLimits::default(),
    );
    (orchestrator, store)
}
