//! Checks a vacation request against a leave balance.
//!
//! Approval itself belongs to the attendance system; this only answers
//! whether the request fits in what is left.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{LeaveBalance, VacationRequest};

/// Outcome of checking a request against a balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestCheck {
    /// True if the request can be approved without overdrawing the balance.
    pub fits: bool,
    /// Annual-leave days the request would consume.
    #[serde(with = "rust_decimal::serde::float")]
    pub requested_days: Decimal,
    /// Remaining days before the request.
    #[serde(with = "rust_decimal::serde::float")]
    pub remaining_before: Decimal,
    /// Remaining days if the request is approved (unchanged when it does not fit).
    #[serde(with = "rust_decimal::serde::float")]
    pub remaining_after: Decimal,
    /// Days missing when the request does not fit.
    #[serde(with = "rust_decimal::serde::float")]
    pub shortfall: Decimal,
    /// Human-readable explanation.
    pub reason: String,
}

/// Checks whether `request` fits in `balance.total_remaining`.
///
/// Leave types that are not drawn from annual leave always fit. Nothing fits
/// for a worker who has not started yet. A request whose end date precedes
/// its start date, or with negative days, is an
/// [`EngineError::InvalidUsage`].
///
/// # Examples
///
/// ```
/// use leave_engine::calculation::{calculate_leave_balance, check_vacation_request};
/// use leave_engine::config::AccrualRules;
/// use leave_engine::models::{LeaveType, RequestStatus, VacationRequest};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let hire = NaiveDate::from_ymd_opt(2023, 1, 15).unwrap();
/// let today = NaiveDate::from_ymd_opt(2024, 6, 20).unwrap();
/// let balance = calculate_leave_balance(hire, today, Decimal::ZERO, &AccrualRules::default())?;
///
/// let request = VacationRequest {
///     id: "vr_1".to_string(),
///     worker_id: "w_001".to_string(),
///     start_date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2024, 7, 3).unwrap(),
///     leave_type: LeaveType::Annual,
///     days: Decimal::new(3, 0),
///     status: RequestStatus::Pending,
/// };
///
/// let check = check_vacation_request(&balance, &request)?;
/// assert!(check.fits);
/// assert_eq!(check.remaining_after, Decimal::new(12, 0));
/// # Ok::<(), leave_engine::error::EngineError>(())
/// ```
pub fn check_vacation_request(
    balance: &LeaveBalance,
    request: &VacationRequest,
) -> EngineResult<RequestCheck> {
    if request.end_date < request.start_date {
        return Err(EngineError::InvalidUsage {
            message: format!(
                "request '{}' ends ({}) before it starts ({})",
                request.id, request.end_date, request.start_date
            ),
        });
    }
    if request.days.is_sign_negative() && !request.days.is_zero() {
        return Err(EngineError::InvalidUsage {
            message: format!(
                "request '{}' has negative days ({})",
                request.id,
                request.days.normalize()
            ),
        });
    }

    let remaining_before = balance.total_remaining;
    let requested_days = request.annual_days();

    if !request.leave_type.consumes_annual_leave() {
        return Ok(RequestCheck {
            fits: true,
            requested_days,
            remaining_before,
            remaining_after: remaining_before,
            shortfall: Decimal::ZERO,
            reason: "Leave type is not drawn from annual leave".to_string(),
        });
    }

    if !balance.is_active() {
        return Ok(RequestCheck {
            fits: false,
            requested_days,
            remaining_before,
            remaining_after: remaining_before,
            shortfall: requested_days,
            reason: balance.status.message().to_string(),
        });
    }

    if requested_days <= remaining_before {
        Ok(RequestCheck {
            fits: true,
            requested_days,
            remaining_before,
            remaining_after: remaining_before - requested_days,
            shortfall: Decimal::ZERO,
            reason: format!(
                "{} day(s) requested, {} remaining",
                requested_days.normalize(),
                remaining_before.normalize()
            ),
        })
    } else {
        let shortfall = requested_days - remaining_before;
        Ok(RequestCheck {
            fits: false,
            requested_days,
            remaining_before,
            remaining_after: remaining_before,
            shortfall,
            reason: format!(
                "{} day(s) requested but only {} remaining ({} short)",
                requested_days.normalize(),
                remaining_before.normalize(),
                shortfall.normalize()
            ),
        })
    }
}
