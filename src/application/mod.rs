//! Application layer containing the core business logic orchestration.
//!
//! This module defines the `TransactionOrchestrator`, the primary entry point
//! for processing transactions, and the `FraudEvaluator` it awaits on. Both are
//! stateless apart from their injected ports, so one instance serves every
//! concurrent request.

pub mod fraud;
pub mod orchestrator;
