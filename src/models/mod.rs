//! Core data models for the Leave Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod leave_balance;
mod vacation;
mod worker;

pub use leave_balance::{
    AccrualKind, AccrualPeriod, AuditStep, AuditTrace, BalanceStatus, LeaveBalance, Tenure,
};
pub use vacation::{LeaveType, RequestStatus, VacationRequest};
pub use worker::Worker;
