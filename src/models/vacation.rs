//! Vacation request model and related types.
//!
//! Requests are owned by the surrounding attendance system. The engine only
//! reads them to work out how many annual-leave days have been used.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The kind of leave a request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveType {
    /// Full days of annual leave.
    Annual,
    /// Morning half day, drawn from annual leave.
    HalfDayAm,
    /// Afternoon half day, drawn from annual leave.
    HalfDayPm,
    /// Sick leave.
    Sick,
    /// Special leave (bereavement, family events).
    Special,
}

impl LeaveType {
    /// Returns true if this type is drawn from the annual-leave balance.
    pub fn consumes_annual_leave(&self) -> bool {
        matches!(self, Self::Annual | Self::HalfDayAm | Self::HalfDayPm)
    }

    /// Returns true for the half-day variants.
    pub fn is_half_day(&self) -> bool {
        matches!(self, Self::HalfDayAm | Self::HalfDayPm)
    }
}

/// Approval state of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    /// Awaiting an administrator.
    Pending,
    /// Approved; counts against the balance.
    Approved,
    /// Rejected by an administrator.
    Rejected,
    /// Withdrawn by the worker.
    Cancelled,
}

/// A worker's request for time off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VacationRequest {
    /// Unique identifier for the request.
    pub id: String,
    /// The requesting worker.
    pub worker_id: String,
    /// First day of leave (inclusive).
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// The kind of leave.
    pub leave_type: LeaveType,
    /// Days the request consumes, as recorded by the caller.
    pub days: Decimal,
    /// Approval state.
    pub status: RequestStatus,
}

impl VacationRequest {
    /// The number of annual-leave days this request draws down.
    ///
    /// Half-day types always count 0.5 regardless of the recorded `days`.
    /// Types that do not consume annual leave count zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use leave_engine::models::{LeaveType, RequestStatus, VacationRequest};
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let request = VacationRequest {
    ///     id: "vr_001".to_string(),
    ///     worker_id: "w_001".to_string(),
    ///     start_date: NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
    ///     end_date: NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
    ///     leave_type: LeaveType::HalfDayAm,
    ///     days: Decimal::ONE,
    ///     status: RequestStatus::Approved,
    /// };
    /// assert_eq!(request.annual_days(), Decimal::new(5, 1));
    /// ```
    pub fn annual_days(&self) -> Decimal {
        if self.leave_type.is_half_day() {
            Decimal::new(5, 1)
        } else if self.leave_type.consumes_annual_leave() {
            self.days
        } else {
            Decimal::ZERO
        }
    }

    /// Returns true if the request is approved.
    pub fn is_approved(&self) -> bool {
        self.status == RequestStatus::Approved
    }
}
