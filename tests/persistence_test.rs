#![cfg(feature = "storage-rocksdb")]

use fincore::domain::ports::TransactionStore;
use fincore::domain::transaction::TransactionStatus;
use fincore::infrastructure::rocksdb::RocksDBStore;
use rust_decimal_macros::dec;
use tempfile::tempdir;

#[tokio::test]
async fn test_rocksdb_persistence_recovery() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("test_db");

    // First session: create and finalize a record
    let id = {
        let store = RocksDBStore::open(&db_path).unwrap();
        let created = store
            .create("ACC1", dec!(100.00).try_into().unwrap())
            .await
            .unwrap();
        assert_eq!(created.status, TransactionStatus::Pending);
        store
            .update(created.id, TransactionStatus::Approved)
            .await
            .unwrap();
        created.id
    };

    // Second session on the same path sees the final state
    let store = RocksDBStore::open(&db_path).unwrap();
    let recovered = store.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(recovered.status, TransactionStatus::Approved);
    assert_eq!(recovered.amount.value(), dec!(100.00));
    assert!(store.exists_by_account("ACC1").await.unwrap());
}
