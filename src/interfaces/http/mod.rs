//! REST surface for the orchestrator, rooted at `/api/v1/transactions`.

pub mod error;
pub mod handlers;

use crate::application::orchestrator::TransactionOrchestrator;
use crate::error::Result;
use axum::{
    Router,
    routing::{get, post},
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<TransactionOrchestrator>,
    /// Parent of every request's cancellation token.
    pub shutdown: CancellationToken,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/v1/transactions",
            post(handlers::create_transaction).get(handlers::list_transactions),
        )
        .route("/api/v1/transactions/:id", get(handlers::get_transaction))
        .route(
            "/api/v1/transactions/account/:account_id",
            get(handlers::list_by_account),
        )
        .route(
            "/api/v1/transactions/account/:account_id/summary",
            get(handlers::account_summary),
        )
        .route(
            "/api/v1/transactions/status/:status",
            get(handlers::list_by_status),
        )
        .with_state(state)
}

/// Serves until `state.shutdown` is cancelled.
pub async fn serve(state: AppState, port: u16) -> Result<()> {
    let shutdown = state.shutdown.clone();
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    info!("listening on {}", addr);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;
    info!("HTTP server stopped");
    Ok(())
}
