use crate::domain::fraud::{DEFAULT_REJECTION_RATE, SUSPICIOUS_AMOUNT_THRESHOLD};
use crate::domain::validation::TransactionLimits;
use crate::error::{PaymentError, Result};
use crate::infrastructure::risk::DEFAULT_RISK_LATENCY;
use dotenvy::dotenv;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, PartialEq)]
pub struct FraudSettings {
    pub suspicious_threshold: Decimal,
    pub rejection_rate: f64,
    pub latency: Duration,
    /// Abandon a fraud check after this long; `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for FraudSettings {
    fn default() -> Self {
        Self {
            suspicious_threshold: SUSPICIOUS_AMOUNT_THRESHOLD,
            rejection_rate: DEFAULT_REJECTION_RATE,
            latency: DEFAULT_RISK_LATENCY,
            timeout: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerSettings {
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self { port: DEFAULT_PORT }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub limits: TransactionLimits,
    pub fraud: FraudSettings,
    pub server: ServerSettings,
    pub db_path: Option<PathBuf>,
}

impl Config {
    /// Loads `.env` if present, then reads `FINCORE_*` variables over the defaults.
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        Self::from_vars(std::env::vars().collect())
    }

    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self> {
        let mut config = Config::default();

        if let Some(max) = parse::<Decimal>(&vars, "FINCORE_MAX_AMOUNT")? {
            config.limits.max_amount = max;
        }
        if let Some(threshold) = parse::<Decimal>(&vars, "FINCORE_SUSPICIOUS_THRESHOLD")? {
            config.fraud.suspicious_threshold = threshold;
        }
        if let Some(rate) = parse::<f64>(&vars, "FINCORE_REJECTION_RATE")? {
            if !(0.0..=1.0).contains(&rate) {
                return Err(PaymentError::Config(format!(
                    "FINCORE_REJECTION_RATE must be between 0 and 1, got {}",
                    rate
                )));
            }
            config.fraud.rejection_rate = rate;
        }
        if let Some(ms) = parse::<u64>(&vars, "FINCORE_FRAUD_LATENCY_MS")? {
            config.fraud.latency = Duration::from_millis(ms);
        }
        if let Some(ms) = parse::<u64>(&vars, "FINCORE_FRAUD_TIMEOUT_MS")? {
            config.fraud.timeout = Some(Duration::from_millis(ms));
        }
        if let Some(port) = parse::<u16>(&vars, "FINCORE_PORT")? {
            config.server.port = port;
        }
        config.db_path = vars.get("FINCORE_DB_PATH").map(PathBuf::from);

        if config.limits.max_amount <= Decimal::ZERO {
            return Err(PaymentError::Config(
                "FINCORE_MAX_AMOUNT must be positive".to_string(),
            ));
        }

        Ok(config)
    }
}

fn parse<T>(vars: &HashMap<String, String>, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match vars.get(key).map(|raw| raw.trim()) {
        None | Some("") => Ok(None),
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|e| PaymentError::Config(format!("{}={:?}: {}", key, raw, e))),
    }
}
