use crate::domain::transaction::TransactionStatus;
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

pub type Result<T> = std::result::Result<T, PaymentError>;

/// Machine-readable code attached to every error surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    MissingAccount,
    InvalidAmount,
    AmountExceedsLimit,
    TransactionNotFound,
    FraudCheckInterrupted,
    Internal,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::MissingAccount => "MISSING_ACCOUNT",
            ErrorCode::InvalidAmount => "INVALID_AMOUNT",
            ErrorCode::AmountExceedsLimit => "AMOUNT_EXCEEDS_LIMIT",
            ErrorCode::TransactionNotFound => "TRANSACTION_NOT_FOUND",
            ErrorCode::FraudCheckInterrupted => "FRAUD_CHECK_INTERRUPTED",
            ErrorCode::Internal => "INTERNAL_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("{message}")]
    Validation {
        code: ErrorCode,
        field: &'static str,
        message: String,
    },
    #[error("{message}")]
    BusinessRule { code: ErrorCode, message: String },
    #[error("Transaction not found with ID: {0}")]
    NotFound(Uuid),
    #[error("Fraud check process was interrupted for transaction {0}")]
    FraudCheckInterrupted(Uuid),
    #[error("Transaction {id} cannot move from {from} to {to}")]
    InvalidTransition {
        id: Uuid,
        from: TransactionStatus,
        to: TransactionStatus,
    },
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Internal error: {0}")]
    Internal(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl PaymentError {
    pub fn code(&self) -> ErrorCode {
        match self {
            PaymentError::Validation { code, .. } | PaymentError::BusinessRule { code, .. } => {
                *code
            }
            PaymentError::NotFound(_) => ErrorCode::TransactionNotFound,
            PaymentError::FraudCheckInterrupted(_) => ErrorCode::FraudCheckInterrupted,
            PaymentError::InvalidTransition { .. }
            | PaymentError::Storage(_)
            | PaymentError::Csv(_)
            | PaymentError::Io(_)
            | PaymentError::Config(_)
            | PaymentError::Internal(_) => ErrorCode::Internal,
        }
    }

    /// True for failures that carry no caller-facing detail.
    pub fn is_unexpected(&self) -> bool {
        self.code() == ErrorCode::Internal
    }
}

#[cfg(feature = "storage-rocksdb")]
impl From<rocksdb::Error> for PaymentError {
    fn from(err: rocksdb::Error) -> Self {
        PaymentError::Storage(err.to_string())
    }
}
