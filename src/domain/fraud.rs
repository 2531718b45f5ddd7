use super::amount::Amount;
use rand::Rng;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Amount above which a transaction may be flagged.
pub const SUSPICIOUS_AMOUNT_THRESHOLD: Decimal = dec!(5000.00);
/// Probability of rejecting a suspicious transaction.
pub const DEFAULT_REJECTION_RATE: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Approved,
    Rejected,
}

/// Decides the outcome of a fraud check once the risk service has answered.
///
/// Kept separate from the latency simulation so tests can plug in a
/// deterministic policy.
pub trait FraudPolicy: Send + Sync {
    fn evaluate(&self, amount: Amount) -> Verdict;
}

pub type FraudPolicyBox = Box<dyn FraudPolicy>;

/// Placeholder policy: amounts at or below the threshold always pass,
/// amounts above it are rejected at random with `rejection_rate`.
#[derive(Debug, Clone)]
pub struct ThresholdPolicy {
    threshold: Decimal,
    rejection_rate: f64,
}

impl ThresholdPolicy {
    pub fn new(threshold: Decimal, rejection_rate: f64) -> Self {
        Self {
            threshold,
            rejection_rate: rejection_rate.clamp(0.0, 1.0),
        }
    }
}

impl Default for ThresholdPolicy {
    fn default() -> Self {
        Self::new(SUSPICIOUS_AMOUNT_THRESHOLD, DEFAULT_REJECTION_RATE)
    }
}

impl FraudPolicy for ThresholdPolicy {
    fn evaluate(&self, amount: Amount) -> Verdict {
        if amount.value() <= self.threshold {
            return Verdict::Approved;
        }
        if rand::thread_rng().gen_bool(self.rejection_rate) {
            Verdict::Rejected
        } else {
            Verdict::Approved
        }
    }
}
