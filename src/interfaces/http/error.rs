use crate::error::PaymentError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{error, warn};

/// Code used when the request could not be read at all.
pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
const GENERIC_MESSAGE: &str = "An unexpected error occurred. Please try again later.";

/// Body returned for every failed request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub timestamp: DateTime<Utc>,
    pub status: u16,
    pub error: String,
    pub message: String,
    pub error_code: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_errors: Option<BTreeMap<String, String>>,
}

/// Error returned by handlers; carries the request path for the response body.
#[derive(Debug)]
pub enum ApiError {
    Payment { error: PaymentError, path: String },
    MalformedRequest {
        errors: BTreeMap<String, String>,
        path: String,
    },
}

impl ApiError {
    pub fn new(error: PaymentError, path: impl Into<String>) -> Self {
        ApiError::Payment {
            error,
            path: path.into(),
        }
    }

    pub fn malformed(field: &str, detail: impl Into<String>, path: impl Into<String>) -> Self {
        ApiError::MalformedRequest {
            errors: BTreeMap::from([(field.to_string(), detail.into())]),
            path: path.into(),
        }
    }

    /// Maps the error onto a status code and body.
    pub fn to_response(&self) -> (StatusCode, ErrorResponse) {
        match self {
            ApiError::Payment { error, path } => map_payment_error(error, path),
            ApiError::MalformedRequest { errors, path } => {
                warn!("Malformed request on {}: {:?}", path, errors);
                let status = StatusCode::BAD_REQUEST;
                (
                    status,
                    ErrorResponse {
                        timestamp: Utc::now(),
                        status: status.as_u16(),
                        error: "Validation Failed".to_string(),
                        message: "Input validation failed".to_string(),
                        error_code: VALIDATION_ERROR.to_string(),
                        path: path.clone(),
                        validation_errors: Some(errors.clone()),
                    },
                )
            }
        }
    }
}

fn map_payment_error(err: &PaymentError, path: &str) -> (StatusCode, ErrorResponse) {
    let (status, title, message, validation_errors) = match err {
        PaymentError::Validation { field, message, .. } => {
            warn!("Validation failed on {}: {} - {}", path, err.code(), message);
            (
                StatusCode::BAD_REQUEST,
                "Validation Failed",
                message.clone(),
                Some(BTreeMap::from([(field.to_string(), message.clone())])),
            )
        }
        // Not-found and interrupted checks share the business-rule class.
        PaymentError::BusinessRule { .. }
        | PaymentError::NotFound(_)
        | PaymentError::FraudCheckInterrupted(_) => {
            warn!("Business exception occurred: {} - {}", err.code(), err);
            (
                StatusCode::BAD_REQUEST,
                "Business Rule Violation",
                err.to_string(),
                None,
            )
        }
        PaymentError::InvalidTransition { .. }
        | PaymentError::Storage(_)
        | PaymentError::Csv(_)
        | PaymentError::Io(_)
        | PaymentError::Config(_)
        | PaymentError::Internal(_) => {
            error!("Unexpected exception occurred on {}: {:?}", path, err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error",
                GENERIC_MESSAGE.to_string(),
                None,
            )
        }
    };

    (
        status,
        ErrorResponse {
            timestamp: Utc::now(),
            status: status.as_u16(),
            error: title.to_string(),
            message,
            error_code: err.code().as_str().to_string(),
            path: path.to_string(),
            validation_errors,
        },
    )
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = self.to_response();
        (status, Json(body)).into_response()
    }
}
