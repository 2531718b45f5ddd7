use clap::{Parser, Subcommand};
use fincore::application::fraud::FraudEvaluator;
use fincore::application::orchestrator::TransactionOrchestrator;
use fincore::config::Config;
use fincore::domain::fraud::ThresholdPolicy;
use fincore::domain::ports::TransactionStoreBox;
use fincore::infrastructure::in_memory::InMemoryTransactionStore;
use fincore::infrastructure::risk::SimulatedRiskService;
use fincore::interfaces::batch::submit_all;
use fincore::interfaces::csv::request_reader::RequestReader;
use fincore::interfaces::csv::snapshot_writer::SnapshotWriter;
use fincore::interfaces::http::{self, AppState};
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Process a CSV file of `account_id, amount` requests and print the final records
    Process {
        /// Input requests CSV file
        input: PathBuf,

        /// Path to persistent database (optional). If provided, uses RocksDB.
        #[arg(long)]
        db_path: Option<PathBuf>,

        /// Override the simulated fraud-check latency
        #[arg(long)]
        fraud_latency_ms: Option<u64>,
    },
    /// Serve the transaction API over HTTP
    Serve {
        #[arg(long)]
        port: Option<u16>,

        /// Path to persistent database (optional). If provided, uses RocksDB.
        #[arg(long)]
        db_path: Option<PathBuf>,

        /// Override the simulated fraud-check latency
        #[arg(long)]
        fraud_latency_ms: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    let mut config = Config::from_env().into_diagnostic()?;
    let shutdown = CancellationToken::new();
    {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Shutdown requested, interrupting in-flight fraud checks");
                shutdown.cancel();
            }
        });
    }

    match cli.command {
        Command::Process {
            input,
            db_path,
            fraud_latency_ms,
        } => {
            apply_overrides(&mut config, db_path, fraud_latency_ms);
            let orchestrator = Arc::new(build_orchestrator(&config)?);
            process_file(orchestrator, &input, &shutdown).await
        }
        Command::Serve {
            port,
            db_path,
            fraud_latency_ms,
        } => {
            apply_overrides(&mut config, db_path, fraud_latency_ms);
            if let Some(port) = port {
                config.server.port = port;
            }
            let state = AppState {
                orchestrator: Arc::new(build_orchestrator(&config)?),
                shutdown,
            };
            http::serve(state, config.server.port)
                .await
                .into_diagnostic()?;
            Ok(())
        }
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init();
    }
}

fn apply_overrides(config: &mut Config, db_path: Option<PathBuf>, fraud_latency_ms: Option<u64>) {
    if db_path.is_some() {
        config.db_path = db_path;
    }
    if let Some(ms) = fraud_latency_ms {
        config.fraud.latency = Duration::from_millis(ms);
    }
}

fn build_orchestrator(config: &Config) -> Result<TransactionOrchestrator> {
    let store = build_store(config.db_path.as_deref())?;
    let policy = ThresholdPolicy::new(
        config.fraud.suspicious_threshold,
        config.fraud.rejection_rate,
    );
    let risk = SimulatedRiskService::new(config.fraud.latency, Box::new(policy));
    let mut evaluator = FraudEvaluator::new(Box::new(risk));
    if let Some(timeout) = config.fraud.timeout {
        evaluator = evaluator.with_timeout(timeout);
    }
    Ok(TransactionOrchestrator::new(store, evaluator, config.limits))
}

#[cfg(feature = "storage-rocksdb")]
fn build_store(db_path: Option<&Path>) -> Result<TransactionStoreBox> {
    use fincore::infrastructure::rocksdb::RocksDBStore;

    match db_path {
        Some(path) => Ok(Box::new(RocksDBStore::open(path).into_diagnostic()?)),
        None => Ok(Box::new(InMemoryTransactionStore::new())),
    }
}

#[cfg(not(feature = "storage-rocksdb"))]
fn build_store(db_path: Option<&Path>) -> Result<TransactionStoreBox> {
    if db_path.is_some() {
        let message = "WARNING: Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage.";
        tracing::warn!("{}", message);
        eprintln!("{}", message);
    }
    Ok(Box::new(InMemoryTransactionStore::new()))
}

async fn process_file(
    orchestrator: Arc<TransactionOrchestrator>,
    input: &Path,
    shutdown: &CancellationToken,
) -> Result<()> {
    let file = File::open(input).into_diagnostic()?;
    let mut requests = Vec::new();
    for request in RequestReader::new(file).requests() {
        match request {
            Ok(request) => requests.push(request),
            Err(e) => eprintln!("Error reading transaction: {}", e),
        }
    }

    let mut processed = Vec::with_capacity(requests.len());
    for outcome in submit_all(orchestrator, requests, shutdown).await {
        match outcome.result {
            Ok(tx) => processed.push(tx),
            Err(e) => eprintln!("Error processing transaction: {}", e),
        }
    }

    let stdout = io::stdout();
    let mut writer = SnapshotWriter::new(stdout.lock());
    writer.write_all(&processed).into_diagnostic()?;
    Ok(())
}
