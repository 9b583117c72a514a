//! Aggregation of approved vacation requests into used days.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::VacationRequest;

/// Sums the annual-leave days of every approved request.
///
/// Pending, rejected and cancelled requests are ignored, as are leave types
/// that are not drawn from annual leave. An approved annual-leave request
/// with negative `days`, or a total too large to represent, is an
/// [`EngineError::InvalidUsage`].
///
/// # Examples
///
/// ```
/// use leave_engine::calculation::sum_used_days;
/// use leave_engine::models::{LeaveType, RequestStatus, VacationRequest};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let day = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
/// let requests = vec![
///     VacationRequest {
///         id: "vr_1".to_string(),
///         worker_id: "w_001".to_string(),
///         start_date: day,
///         end_date: day,
///         leave_type: LeaveType::HalfDayAm,
///         days: Decimal::new(5, 1),
///         status: RequestStatus::Approved,
///     },
/// ];
/// assert_eq!(sum_used_days(&requests)?, Decimal::new(5, 1));
/// # Ok::<(), leave_engine::error::EngineError>(())
/// ```
pub fn sum_used_days<'a, I>(requests: I) -> EngineResult<Decimal>
where
    I: IntoIterator<Item = &'a VacationRequest>,
{
    let mut total = Decimal::ZERO;

    for request in requests.into_iter().filter(|r| r.is_approved()) {
        if !request.leave_type.consumes_annual_leave() {
            continue;
        }
        if request.days.is_sign_negative() && !request.days.is_zero() {
            return Err(EngineError::InvalidUsage {
                message: format!(
                    "approved request '{}' has negative days ({})",
                    request.id,
                    request.days.normalize()
                ),
            });
        }

        total = total
            .checked_add(request.annual_days())
            .ok_or_else(|| EngineError::InvalidUsage {
                message: format!(
                    "used days overflow when adding request '{}'",
                    request.id
                ),
            })?;
    }

    Ok(total)
}
