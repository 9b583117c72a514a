//! Leave balance models for the Leave Engine.
//!
//! This module contains the [`LeaveBalance`] type and its associated
//! structures: tenure, accrual periods, balance status and the audit trace
//! recording every rule applied while building a balance.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whole units of service between a hire date and a reference date.
///
/// `months` counts all completed months, so `months >= years * 12` always
/// holds.
///
/// # Example
///
/// ```
/// use leave_engine::models::Tenure;
///
/// let tenure = Tenure { years: 1, months: 17 };
/// assert_eq!(tenure.months_into_year(), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Tenure {
    /// Completed years of service.
    pub years: u32,
    /// Completed months of service.
    pub months: u32,
}

impl Tenure {
    /// Completed months since the last anniversary.
    pub fn months_into_year(&self) -> u32 {
        self.months - self.years * 12
    }
}

/// Which accrual tier produced a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccrualKind {
    /// A first-year grant for one completed month.
    Monthly,
    /// The entitlement for a full service year.
    Annual,
}

/// One bucket of leave entitlement with its own validity window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccrualPeriod {
    /// Human-readable label (e.g., "Month 3", "Year 4").
    pub label: String,
    /// Which tier produced this period.
    pub kind: AccrualKind,
    /// Days granted.
    pub accrued: u32,
    /// Days drawn down against this period.
    #[serde(with = "rust_decimal::serde::float")]
    pub used: Decimal,
    /// Days left (`accrued - used`, never negative).
    #[serde(with = "rust_decimal::serde::float")]
    pub remaining: Decimal,
    /// First date the days can be taken.
    pub valid_from: NaiveDate,
    /// Date the days lapse (exclusive end of the validity window).
    pub expires_on: NaiveDate,
    /// True if the reference date has reached `expires_on`.
    pub is_expired: bool,
}

impl AccrualPeriod {
    /// Creates an unused period.
    pub fn new(
        label: impl Into<String>,
        kind: AccrualKind,
        accrued: u32,
        valid_from: NaiveDate,
        expires_on: NaiveDate,
        is_expired: bool,
    ) -> Self {
        Self {
            label: label.into(),
            kind,
            accrued,
            used: Decimal::ZERO,
            remaining: Decimal::from(accrued),
            valid_from,
            expires_on,
            is_expired,
        }
    }
}

/// Distinguishes a normal balance from one computed before the hire date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceStatus {
    /// The worker is employed on the reference date.
    Active,
    /// The hire date is after the reference date.
    NotYetEmployed,
}

impl BalanceStatus {
    /// A human-readable description of the status.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Active => "Leave balance calculated",
            Self::NotYetEmployed => "Worker has not started yet; no leave has accrued",
        }
    }
}

/// A single step in the audit trace recording a calculation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// Reference to the statutory clause for this rule.
    pub clause_ref: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The audit trace for a balance calculation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
}

/// The complete leave balance for a worker on a reference date.
///
/// # Example
///
/// ```
/// use leave_engine::models::{BalanceStatus, LeaveBalance};
///
/// let balance = LeaveBalance::not_yet_employed();
/// assert_eq!(balance.status, BalanceStatus::NotYetEmployed);
/// assert_eq!(balance.total_accrued, 0);
/// assert!(balance.accruals.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveBalance {
    /// Whether the worker was employed on the reference date.
    pub status: BalanceStatus,
    /// Sum of all non-expired accruals.
    pub total_accrued: u32,
    /// Days used, echoed from the input.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_used: Decimal,
    /// `max(0, total_accrued - total_used)`.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_remaining: Decimal,
    /// Accrual periods in chronological order.
    pub accruals: Vec<AccrualPeriod>,
    /// Completed years of service.
    pub years_of_service: u32,
    /// Completed months of service.
    pub months_of_service: u32,
    /// Rules applied while building this balance.
    pub audit_trace: AuditTrace,
}

impl LeaveBalance {
    /// The degenerate balance for a worker whose hire date has not arrived.
    ///
    /// Used days are zeroed along with everything else.
    pub fn not_yet_employed() -> Self {
        Self {
            status: BalanceStatus::NotYetEmployed,
            total_accrued: 0,
            total_used: Decimal::ZERO,
            total_remaining: Decimal::ZERO,
            accruals: Vec::new(),
            years_of_service: 0,
            months_of_service: 0,
            audit_trace: AuditTrace::default(),
        }
    }

    /// Returns true if the worker was employed on the reference date.
    pub fn is_active(&self) -> bool {
        self.status == BalanceStatus::Active
    }

    /// Accrual periods still valid on the reference date.
    pub fn active_accruals(&self) -> impl Iterator<Item = &AccrualPeriod> {
        self.accruals.iter().filter(|p| !p.is_expired)
    }
}
