use super::amount::Amount;
use crate::error::{ErrorCode, PaymentError, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Hard admission ceiling for a single transaction.
pub const MAX_TRANSACTION_AMOUNT: Decimal = dec!(10000.00);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransactionLimits {
    pub max_amount: Decimal,
}

impl Default for TransactionLimits {
    fn default() -> Self {
        Self {
            max_amount: MAX_TRANSACTION_AMOUNT,
        }
    }
}

/// A request that passed admission.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidRequest {
    pub account_id: String,
    pub amount: Amount,
}

/// Checks the admission rules in order; the first failing rule is reported.
pub fn validate(
    limits: &TransactionLimits,
    account_id: &str,
    amount: Option<Decimal>,
) -> Result<ValidRequest> {
    let account_id = account_id.trim();
    if account_id.is_empty() {
        return Err(PaymentError::Validation {
            code: ErrorCode::MissingAccount,
            field: "accountId",
            message: "Account ID is required and cannot be blank".to_string(),
        });
    }

    let amount = match amount {
        Some(value) => Amount::new(value)?,
        None => {
            return Err(PaymentError::Validation {
                code: ErrorCode::InvalidAmount,
                field: "amount",
                message: "Amount is required".to_string(),
            });
        }
    };

    if amount.value() > limits.max_amount {
        return Err(PaymentError::BusinessRule {
            code: ErrorCode::AmountExceedsLimit,
            message: format!(
                "Transaction amount exceeds maximum limit of {}",
                limits.max_amount
            ),
        });
    }

    Ok(ValidRequest {
        account_id: account_id.to_string(),
        amount,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code_of(result: Result<ValidRequest>) -> ErrorCode {
        result.unwrap_err().code()
    }

    #[test]
    fn test_valid_request_passes() {
        let limits = TransactionLimits::default();
        let ok = validate(&limits, " ACC1 ", Some(dec!(100.00))).unwrap();
        assert_eq!(ok.account_id, "ACC1");
        assert_eq!(ok.amount.value(), dec!(100.00));
    }

    #[test]
    fn test_blank_account_is_missing() {
        let limits = TransactionLimits::default();
        assert_eq!(
            code_of(validate(&limits, "", Some(dec!(50.00)))),
            ErrorCode::MissingAccount
        );
        assert_eq!(
            code_of(validate(&limits, "   ", Some(dec!(50.00)))),
            ErrorCode::MissingAccount
        );
    }

    #[test]
    fn test_missing_or_non_positive_amount() {
        let limits = TransactionLimits::default();
        for amount in [None, Some(dec!(0)), Some(dec!(-5.00))] {
            assert_eq!(
                code_of(validate(&limits, "ACC1", amount)),
                ErrorCode::InvalidAmount
            );
        }
    }

    #[test]
    fn test_limit_is_inclusive() {
        let limits = TransactionLimits::default();
        assert!(validate(&limits, "ACC1", Some(dec!(10000.00))).is_ok());
        let err = validate(&limits, "ACC2", Some(dec!(10000.01))).unwrap_err();
        assert!(matches!(
            err,
            PaymentError::BusinessRule {
                code: ErrorCode::AmountExceedsLimit,
                ..
            }
        ));
    }

    #[test]
    fn test_fraction_above_limit_is_rejected() {
        let limits = TransactionLimits::default();
        for amount in [dec!(10000.001), dec!(10000.004)] {
            assert_eq!(
                code_of(validate(&limits, "ACC1", Some(amount))),
                ErrorCode::AmountExceedsLimit
            );
        }
    }

    #[test]
    fn test_first_failure_wins() {
        let limits = TransactionLimits::default();
        // Blank account and oversized amount: the account rule is checked first.
        assert_eq!(
            code_of(validate(&limits, "", Some(dec!(15000.00)))),
            ErrorCode::MissingAccount
        );
        assert_eq!(
            code_of(validate(&limits, "", None)),
            ErrorCode::MissingAccount
        );
    }
}
