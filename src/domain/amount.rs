use crate::error::{ErrorCode, PaymentError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of fractional digits kept for every monetary amount.
pub const AMOUNT_SCALE: u32 = 2;

/// Represents a strictly positive monetary amount.
///
/// Wraps `rust_decimal::Decimal` so that an `Amount` which exists has already
/// passed the positivity rule. Values are never rounded; coarser inputs are
/// padded to two decimal places so `7` reads as `7.00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self, PaymentError> {
        let mut value = value;
        if value.scale() < AMOUNT_SCALE {
            value.rescale(AMOUNT_SCALE);
        }
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(PaymentError::Validation {
                code: ErrorCode::InvalidAmount,
                field: "amount",
                message: "Transaction amount must be positive".to_string(),
            })
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = PaymentError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_amount_validation() {
        assert!(Amount::new(dec!(1.0)).is_ok());
        assert!(matches!(
            Amount::new(dec!(0.0)),
            Err(PaymentError::Validation {
                code: ErrorCode::InvalidAmount,
                ..
            })
        ));
        assert!(matches!(
            Amount::new(dec!(-1.0)),
            Err(PaymentError::Validation { .. })
        ));
    }

    #[test]
    fn test_amount_pads_to_cents() {
        assert_eq!(Amount::new(dec!(7)).unwrap().to_string(), "7.00");
        assert_eq!(Amount::new(dec!(7)).unwrap().value().to_string(), "7.00");
        assert_eq!(Amount::new(dec!(12.5)).unwrap().to_string(), "12.50");
    }

    #[test]
    fn test_extra_precision_is_kept() {
        assert_eq!(Amount::new(dec!(10000.004)).unwrap().value(), dec!(10000.004));
        assert_eq!(Amount::new(dec!(10000.004)).unwrap().to_string(), "10000.004");
        assert!(Amount::new(dec!(0.001)).is_ok());
    }

    #[test]
    fn test_amount_deserialization_enforces_positivity() {
        let ok: Amount = serde_json::from_str("\"12.50\"").unwrap();
        assert_eq!(ok.value(), dec!(12.50));
        assert!(serde_json::from_str::<Amount>("\"-3\"").is_err());
    }
}
