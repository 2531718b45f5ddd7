use super::AppState;
use super::error::ApiError;
use crate::domain::transaction::{Transaction, TransactionStatus};
use crate::error::PaymentError;
use crate::interfaces::dto::{TransactionRequest, TransactionResponse};
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, Uri},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct StatusFilter {
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TimeRange {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    pub account_id: String,
    pub exists: bool,
    pub approved_total: Decimal,
    pub rejected_total: Decimal,
    pub pending_total: Decimal,
}

type ApiResult<T> = Result<T, ApiError>;

fn parse_status(raw: &str, path: &str) -> ApiResult<TransactionStatus> {
    raw.parse()
        .map_err(|e: String| ApiError::malformed("status", e, path))
}

fn to_responses(
    result: crate::error::Result<Vec<Transaction>>,
    path: &str,
) -> ApiResult<Json<Vec<TransactionResponse>>> {
    let transactions = result.map_err(|e| ApiError::new(e, path))?;
    Ok(Json(
        transactions
            .into_iter()
            .map(TransactionResponse::from)
            .collect(),
    ))
}

pub async fn create_transaction(
    State(state): State<AppState>,
    uri: Uri,
    payload: Result<Json<TransactionRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<TransactionResponse>)> {
    let path = uri.path().to_string();
    let Json(request) = payload.map_err(|e| ApiError::malformed("body", e.body_text(), &path))?;
    info!(
        "Received transaction request for account: {}, amount: {:?}",
        request.account_id, request.amount
    );

    // Runs detached so a dropped connection cannot abandon a pending record.
    let orchestrator = Arc::clone(&state.orchestrator);
    let token = state.shutdown.child_token();
    let handle = tokio::spawn(async move {
        orchestrator
            .process_transaction(&request.account_id, request.amount, &token)
            .await
    });
    let tx = handle
        .await
        .map_err(|e| ApiError::new(PaymentError::Internal(Box::new(e)), &path))?
        .map_err(|e| ApiError::new(e, &path))?;

    info!("Transaction created successfully with ID: {}", tx.id);
    Ok((StatusCode::CREATED, Json(TransactionResponse::from(tx))))
}

pub async fn get_transaction(
    State(state): State<AppState>,
    uri: Uri,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<TransactionResponse>> {
    let path = uri.path();
    let id = Uuid::parse_str(&raw_id)
        .map_err(|e| ApiError::malformed("transactionId", e.to_string(), path))?;
    let tx = state
        .orchestrator
        .get_by_id(id)
        .await
        .map_err(|e| ApiError::new(e, path))?;
    Ok(Json(TransactionResponse::from(tx)))
}

pub async fn list_by_account(
    State(state): State<AppState>,
    uri: Uri,
    Path(account_id): Path<String>,
    Query(filter): Query<StatusFilter>,
) -> ApiResult<Json<Vec<TransactionResponse>>> {
    let path = uri.path();
    let result = match filter.status {
        Some(raw) => {
            let status = parse_status(&raw, path)?;
            state
                .orchestrator
                .get_by_account_and_status(&account_id, status)
                .await
        }
        None => state.orchestrator.get_by_account(&account_id).await,
    };
    let response = to_responses(result, path)?;
    info!(
        "Found {} transactions for account: {}",
        response.len(),
        account_id
    );
    Ok(response)
}

pub async fn account_summary(
    State(state): State<AppState>,
    uri: Uri,
    Path(account_id): Path<String>,
) -> ApiResult<Json<AccountSummary>> {
    let summary = summarize(&state, &account_id)
        .await
        .map_err(|e| ApiError::new(e, uri.path()))?;
    Ok(Json(summary))
}

async fn summarize(state: &AppState, account_id: &str) -> crate::error::Result<AccountSummary> {
    let orchestrator = &state.orchestrator;
    Ok(AccountSummary {
        account_id: account_id.to_string(),
        exists: orchestrator.account_exists(account_id).await?,
        approved_total: orchestrator
            .total_by_account_and_status(account_id, TransactionStatus::Approved)
            .await?,
        rejected_total: orchestrator
            .total_by_account_and_status(account_id, TransactionStatus::Rejected)
            .await?,
        pending_total: orchestrator
            .total_by_account_and_status(account_id, TransactionStatus::Pending)
            .await?,
    })
}

pub async fn list_by_status(
    State(state): State<AppState>,
    uri: Uri,
    Path(raw_status): Path<String>,
) -> ApiResult<Json<Vec<TransactionResponse>>> {
    let path = uri.path();
    let status = parse_status(&raw_status, path)?;
    let response = to_responses(state.orchestrator.get_by_status(status).await, path)?;
    info!(
        "Found {} transactions with status: {}",
        response.len(),
        status
    );
    Ok(response)
}

pub async fn list_transactions(
    State(state): State<AppState>,
    uri: Uri,
    range: Result<Query<TimeRange>, QueryRejection>,
) -> ApiResult<Json<Vec<TransactionResponse>>> {
    let path = uri.path();
    let Query(range) = range.map_err(|e| ApiError::malformed("query", e.body_text(), path))?;
    let result = match (range.from, range.to) {
        (None, None) => state.orchestrator.get_all().await,
        (from, to) => {
            let start = from.unwrap_or(DateTime::<Utc>::MIN_UTC);
            let end = to.unwrap_or(DateTime::<Utc>::MAX_UTC);
            if start > end {
                return Err(ApiError::malformed(
                    "from",
                    "must not be later than 'to'",
                    path,
                ));
            }
            state.orchestrator.get_between(start, end).await
        }
    };
    let response = to_responses(result, path)?;
    info!("Found {} total transactions", response.len());
    Ok(response)
}
