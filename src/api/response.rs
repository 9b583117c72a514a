//! Response types for the Leave Engine API.
//!
//! This module defines the success bodies, the error response structure and
//! the mapping from [`EngineError`] to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calculation::RequestCheck;
use crate::error::EngineError;
use crate::models::LeaveBalance;

/// Message returned when a worker has no hire date on record.
pub const NO_HIRE_DATE_MESSAGE: &str =
    "No hire date on record for this worker; annual leave cannot be calculated";

/// Body returned by `/leave-balance`.
///
/// When the worker has no hire date, only `workerId` and `message` are
/// present. Otherwise the balance fields are flattened in, and `message` is
/// set for any status other than active.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceResponse {
    /// The worker the balance belongs to.
    pub worker_id: String,
    /// The date the balance was computed on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_date: Option<NaiveDate>,
    /// The computed balance.
    #[serde(flatten)]
    pub balance: Option<LeaveBalance>,
    /// Informational message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl BalanceResponse {
    /// A response for a worker without a hire date.
    pub fn no_hire_date(worker_id: impl Into<String>) -> Self {
        Self {
            worker_id: worker_id.into(),
            reference_date: None,
            balance: None,
            message: Some(NO_HIRE_DATE_MESSAGE.to_string()),
        }
    }

    /// A response carrying a computed balance.
    pub fn calculated(
        worker_id: impl Into<String>,
        reference_date: NaiveDate,
        balance: LeaveBalance,
    ) -> Self {
        let message = (!balance.is_active()).then(|| balance.status.message().to_string());
        Self {
            worker_id: worker_id.into(),
            reference_date: Some(reference_date),
            balance: Some(balance),
            message,
        }
    }
}

/// Body returned by `/vacation-requests/check`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResponse {
    /// The worker the request belongs to.
    pub worker_id: String,
    /// The id of the checked request.
    pub request_id: String,
    /// The check outcome.
    pub check: RequestCheck,
    /// The balance the request was checked against.
    pub balance: LeaveBalance,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates an error for a worker with no hire date on record.
    pub fn no_hire_date(worker_id: &str) -> Self {
        Self::with_details(
            "NO_HIRE_DATE",
            NO_HIRE_DATE_MESSAGE,
            format!("Worker '{}' has no hire date", worker_id),
        )
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Pairs an error body with a status code.
    pub fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::InvalidConfig { field, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Invalid configuration",
                    format!("{}: {}", field, message),
                ),
            },
            EngineError::InvalidDate {
                field,
                value,
                message,
            } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_DATE",
                    format!("Invalid date for '{}': '{}'", field, value),
                    message,
                ),
            },
            EngineError::InvalidUsage { message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_USAGE",
                    format!("Invalid leave usage: {}", message),
                    "Used days must be zero or positive and requests must end on or after they start",
                ),
            },
            EngineError::CalculationError { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CALCULATION_ERROR", "Calculation failed", message),
            },
        }
    }
}
