use super::amount::Amount;
use super::fraud::Verdict;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Clone, Copy, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    /// Terminal state for a record whose fraud evaluation was interrupted.
    Failed,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "PENDING",
            TransactionStatus::Approved => "APPROVED",
            TransactionStatus::Rejected => "REJECTED",
            TransactionStatus::Failed => "FAILED",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, TransactionStatus::Pending)
    }
}

impl From<Verdict> for TransactionStatus {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Approved => TransactionStatus::Approved,
            Verdict::Rejected => TransactionStatus::Rejected,
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Ok(TransactionStatus::Pending),
            "APPROVED" => Ok(TransactionStatus::Approved),
            "REJECTED" => Ok(TransactionStatus::Rejected),
            "FAILED" => Ok(TransactionStatus::Failed),
            other => Err(format!("Unknown transaction status: {}", other)),
        }
    }
}

/// A single attempted fund movement.
///
/// Everything except `status` is fixed when the store creates the record.
/// `status` leaves `Pending` once and never changes again.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Transaction {
    pub id: Uuid,
    pub account_id: String,
    pub amount: Amount,
    pub status: TransactionStatus,
    pub timestamp: DateTime<Utc>,
}

impl Transaction {
    pub fn new(account_id: String, amount: Amount, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_id,
            amount,
            status: TransactionStatus::Pending,
            timestamp,
        }
    }

    /// Returns whether `next` is a legal successor of the current status.
    pub fn can_transition_to(&self, next: TransactionStatus) -> bool {
        self.status == TransactionStatus::Pending && next.is_terminal()
    }
}

/// Orders records newest first, the order every list read returns.
pub fn sort_newest_first(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rust_decimal_macros::dec;

    fn pending() -> Transaction {
        Transaction::new(
            "ACC1".to_string(),
            Amount::new(dec!(10.00)).unwrap(),
            Utc::now(),
        )
    }

    #[test]
    fn test_new_transaction_is_pending() {
        let tx = pending();
        assert_eq!(tx.status, TransactionStatus::Pending);
        assert_ne!(tx.id, pending().id);
    }

    #[test]
    fn test_status_is_monotone() {
        let mut tx = pending();
        assert!(tx.can_transition_to(TransactionStatus::Approved));
        assert!(tx.can_transition_to(TransactionStatus::Failed));
        assert!(!tx.can_transition_to(TransactionStatus::Pending));

        tx.status = TransactionStatus::Approved;
        assert!(!tx.can_transition_to(TransactionStatus::Rejected));
        assert!(!tx.can_transition_to(TransactionStatus::Pending));
    }

    #[test]
    fn test_status_parsing_is_case_insensitive() {
        assert_eq!(
            "approved".parse::<TransactionStatus>(),
            Ok(TransactionStatus::Approved)
        );
        assert_eq!(
            " Rejected ".parse::<TransactionStatus>(),
            Ok(TransactionStatus::Rejected)
        );
        assert!("settled".parse::<TransactionStatus>().is_err());
    }

    #[test]
    fn test_status_serializes_uppercase() {
        let json = serde_json::to_string(&TransactionStatus::Pending).unwrap();
        assert_eq!(json, "\"PENDING\"");
    }

    #[test]
    fn test_sort_newest_first() {
        let now = Utc::now();
        let mut older = pending();
        older.timestamp = now - Duration::seconds(5);
        let mut newer = pending();
        newer.timestamp = now;

        let mut list = vec![older.clone(), newer.clone()];
        sort_newest_first(&mut list);
        assert_eq!(list, vec![newer, older]);
    }
}
