//! HTTP request handlers for the Leave Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{calculate_leave_balance, check_vacation_request, sum_used_days};
use crate::error::EngineError;
use crate::models::{LeaveBalance, Worker};

use super::request::{BalanceRequest, CheckRequest};
use super::response::{ApiError, ApiErrorResponse, BalanceResponse, CheckResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/leave-balance", post(balance_handler))
        .route("/vacation-requests/check", post(check_handler))
        .with_state(state)
}

/// Handler for POST /leave-balance.
///
/// Workers without a hire date get a 200 with an explanatory message and no
/// balance, so callers can tell them apart from workers who have not started.
async fn balance_handler(
    State(state): State<AppState>,
    payload: Result<Json<BalanceRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing leave balance request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let start_time = Instant::now();
    match resolve_balance(&state, request, correlation_id) {
        Ok(Resolved::NoHireDate(worker)) => {
            info!(
                correlation_id = %correlation_id,
                worker_id = %worker.id,
                "No hire date on record; balance not calculated"
            );
            json_response(StatusCode::OK, BalanceResponse::no_hire_date(worker.id))
        }
        Ok(Resolved::Calculated {
            worker,
            reference_date,
            balance,
        }) => {
            info!(
                correlation_id = %correlation_id,
                worker_id = %worker.id,
                %reference_date,
                total_accrued = balance.total_accrued,
                total_remaining = %balance.total_remaining,
                duration_us = start_time.elapsed().as_micros(),
                "Leave balance calculated"
            );
            json_response(
                StatusCode::OK,
                BalanceResponse::calculated(worker.id, reference_date, balance),
            )
        }
        Err(err) => engine_error_response(err, correlation_id),
    }
}

/// Handler for POST /vacation-requests/check.
async fn check_handler(
    State(state): State<AppState>,
    payload: Result<Json<CheckRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing vacation request check");

    let CheckRequest { context, request } = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    if request.worker_id != context.worker.id {
        warn!(
            correlation_id = %correlation_id,
            worker_id = %context.worker.id,
            request_worker_id = %request.worker_id,
            "Vacation request belongs to another worker"
        );
        return error_response(ApiErrorResponse::new(
            StatusCode::BAD_REQUEST,
            ApiError::validation_error(format!(
                "request '{}' belongs to worker '{}', not '{}'",
                request.id, request.worker_id, context.worker.id
            )),
        ));
    }

    let (worker, balance) = match resolve_balance(&state, context, correlation_id) {
        Ok(Resolved::Calculated {
            worker, balance, ..
        }) => (worker, balance),
        Ok(Resolved::NoHireDate(worker)) => {
            warn!(
                correlation_id = %correlation_id,
                worker_id = %worker.id,
                "Cannot check request without a hire date"
            );
            return error_response(ApiErrorResponse::new(
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiError::no_hire_date(&worker.id),
            ));
        }
        Err(err) => return engine_error_response(err, correlation_id),
    };

    match check_vacation_request(&balance, &request) {
        Ok(check) => {
            info!(
                correlation_id = %correlation_id,
                worker_id = %worker.id,
                request_id = %request.id,
                fits = check.fits,
                requested_days = %check.requested_days,
                "Vacation request checked"
            );
            json_response(
                StatusCode::OK,
                CheckResponse {
                    worker_id: worker.id,
                    request_id: request.id,
                    check,
                    balance,
                },
            )
        }
        Err(err) => engine_error_response(err, correlation_id),
    }
}

/// Outcome of resolving a request into a balance.
enum Resolved {
    /// The worker has no hire date; the calculator was not invoked.
    NoHireDate(Worker),
    /// The balance was calculated.
    Calculated {
        worker: Worker,
        reference_date: NaiveDate,
        balance: LeaveBalance,
    },
}

/// Parses dates, works out used days and runs the calculator.
fn resolve_balance(
    state: &AppState,
    request: BalanceRequest,
    correlation_id: Uuid,
) -> Result<Resolved, EngineError> {
    let clock = state.clock();
    let worker = request.worker.into_worker(clock)?;

    let Some(hire_date) = worker.hire_date else {
        return Ok(Resolved::NoHireDate(worker));
    };

    let reference_date = match request.reference_date.as_deref() {
        Some(value) => clock.parse_date("referenceDate", value)?,
        None => clock.today(),
    };

    let used_days = match request.used_days {
        Some(days) => days,
        None => {
            let (own, foreign): (Vec<_>, Vec<_>) = request
                .vacation_requests
                .iter()
                .partition(|r| r.worker_id == worker.id);
            if !foreign.is_empty() {
                warn!(
                    correlation_id = %correlation_id,
                    worker_id = %worker.id,
                    ignored = foreign.len(),
                    "Ignoring vacation requests for other workers"
                );
            }
            sum_used_days(own)?
        }
    };

    let balance =
        calculate_leave_balance(hire_date, reference_date, used_days, state.config().rules())?;

    Ok(Resolved::Calculated {
        worker,
        reference_date,
        balance,
    })
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(api_error: ApiErrorResponse) -> Response {
    json_response(api_error.status, api_error.error)
}

fn engine_error_response(err: EngineError, correlation_id: Uuid) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Leave calculation failed"
    );
    error_response(err.into())
}

fn rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };

    json_response(StatusCode::BAD_REQUEST, error)
}
