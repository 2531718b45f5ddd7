mod common;

use fincore::domain::ports::TransactionStore;
use fincore::domain::transaction::TransactionStatus;
use fincore::error::ErrorCode;
use rust_decimal_macros::dec;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

#[tokio::test(start_paused = true)]
async fn test_record_is_pending_while_fraud_check_runs() {
    let (orchestrator, store) = common::orchestrator(Duration::from_millis(2000));
    let orchestrator = Arc::new(orchestrator);

    let started = Instant::now();
    let worker = Arc::clone(&orchestrator);
    let handle = tokio::spawn(async move {
        worker
            .process_transaction("ACC4", Some(dec!(100.00)), &CancellationToken::new())
            .await
    });

    tokio::time::sleep(Duration::from_millis(1000)).await;
    let pending = store.find_by_status(TransactionStatus::Pending).await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].account_id, "ACC4");

    let tx = handle.await.unwrap().unwrap();
    assert_eq!(tx.status, TransactionStatus::Approved);
    assert!(started.elapsed() >= Duration::from_millis(2000));
    assert!(store
        .find_by_status(TransactionStatus::Pending)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_suspicious_amounts_rejected_near_configured_rate() {
    let (orchestrator, _store) = common::orchestrator(Duration::ZERO);
    let token = CancellationToken::new();

    let mut rejected = 0;
    for _ in 0..1000 {
        let tx = orchestrator
            .process_transaction("ACC3", Some(dec!(6000.00)), &token)
            .await
            .unwrap();
        match tx.status {
            TransactionStatus::Rejected => rejected += 1,
            TransactionStatus::Approved => {}
            other => panic!("unexpected status {}", other),
        }
    }

    assert!((250..=350).contains(&rejected), "rejected {} of 1000", rejected);
}

#[tokio::test]
async fn test_threshold_amount_is_never_rejected() {
    let (orchestrator, _store) = common::orchestrator(Duration::ZERO);
    let token = CancellationToken::new();

    for _ in 0..200 {
        let tx = orchestrator
            .process_transaction("ACC6", Some(dec!(5000.00)), &token)
            .await
            .unwrap();
        assert_eq!(tx.status, TransactionStatus::Approved);
    }
}

#[tokio::test]
async fn test_limit_boundary() {
    let (orchestrator, store) = common::orchestrator(Duration::ZERO);
    let token = CancellationToken::new();

    let at_limit = orchestrator
        .process_transaction("ACC7", Some(dec!(10000.00)), &token)
        .await
        .unwrap();
    assert_ne!(at_limit.status, TransactionStatus::Pending);

    let err = orchestrator
        .process_transaction("ACC7", Some(dec!(10000.01)), &token)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::AmountExceedsLimit);
    assert_eq!(store.find_by_account("ACC7").await.unwrap(), vec![at_limit]);
}
