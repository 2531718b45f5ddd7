//! Domain layer: the transaction entity, admission rules, fraud policy and
//! the ports the application layer depends on.

pub mod amount;
pub mod fraud;
pub mod ports;
pub mod transaction;
pub mod validation;
