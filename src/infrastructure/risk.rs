use crate::domain::amount::Amount;
use crate::domain::fraud::{FraudPolicyBox, ThresholdPolicy, Verdict};
use crate::domain::ports::RiskService;
use crate::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Round trip to the legacy fraud system.
pub const DEFAULT_RISK_LATENCY: Duration = Duration::from_millis(2000);

/// Stand-in for the legacy risk system: waits for `latency` on the tokio
/// timer, then lets the configured policy decide.
pub struct SimulatedRiskService {
    latency: Duration,
    policy: FraudPolicyBox,
}

impl SimulatedRiskService {
    pub fn new(latency: Duration, policy: FraudPolicyBox) -> Self {
        Self { latency, policy }
    }
}

impl Default for SimulatedRiskService {
    fn default() -> Self {
        Self::new(DEFAULT_RISK_LATENCY, Box::new(ThresholdPolicy::default()))
    }
}

#[async_trait]
impl RiskService for SimulatedRiskService {
    async fn assess(&self, amount: Amount) -> Result<Verdict> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        Ok(self.policy.evaluate(amount))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fraud::FraudPolicy;
    use rust_decimal_macros::dec;
    use tokio::time::Instant;

    struct AlwaysReject;

    impl FraudPolicy for AlwaysReject {
        fn evaluate(&self, _amount: Amount) -> Verdict {
            Verdict::Rejected
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_waits_for_latency_before_answering() {
        let service = SimulatedRiskService::default();
        let start = Instant::now();
        let verdict = service
            .assess(Amount::new(dec!(100.00)).unwrap())
            .await
            .unwrap();
        assert_eq!(verdict, Verdict::Approved);
        assert!(start.elapsed() >= DEFAULT_RISK_LATENCY);
    }

    #[tokio::test]
    async fn test_delegates_to_policy() {
        let service = SimulatedRiskService::new(Duration::ZERO, Box::new(AlwaysReject));
        let verdict = service
            .assess(Amount::new(dec!(1.00)).unwrap())
            .await
            .unwrap();
        assert_eq!(verdict, Verdict::Rejected);
    }
}
