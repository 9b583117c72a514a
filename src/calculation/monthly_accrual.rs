//! First-year monthly accrual.
//!
//! During the first year of service a worker earns leave for each completed
//! month. Every first-year grant lapses on the first anniversary of the hire
//! date, not twelve months after the month it was earned in.

use chrono::NaiveDate;

use crate::config::AccrualRules;
use crate::error::EngineResult;
use crate::models::{AccrualKind, AccrualPeriod, AuditStep, Tenure};

use super::tenure::{add_months, anniversary};

/// Statutory clause for first-year monthly grants.
pub const MONTHLY_ACCRUAL_CLAUSE: &str = "60(2)";

/// Completed months that can earn a first-year grant.
const FIRST_YEAR_GRANT_MONTHS: u32 = 11;

/// The result of calculating first-year monthly grants.
#[derive(Debug, Clone)]
pub struct MonthlyAccrualResult {
    /// Grants in chronological order. Expired grants appear only when the
    /// rules ask for them to be retained.
    pub periods: Vec<AccrualPeriod>,
    /// Days from non-expired grants.
    pub total_accrued: u32,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the first-year monthly grants for a worker.
///
/// One grant of `monthly_grant_days` is made for each completed month from
/// month 1 through month 11, and the running total never exceeds
/// `monthly_cap`. All grants expire on `hire_date + 1 year`; a grant is
/// expired once `reference_date` reaches that date. Expired grants never
/// count towards `total_accrued`.
///
/// # Examples
///
/// ```
/// use leave_engine::calculation::{calculate_monthly_accrual, calculate_tenure};
/// use leave_engine::config::AccrualRules;
/// use chrono::NaiveDate;
///
/// let hire = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
/// let reference = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();
/// let tenure = calculate_tenure(hire, reference, 1).unwrap().tenure;
///
/// let result = calculate_monthly_accrual(hire, reference, tenure, &AccrualRules::default(), 2).unwrap();
/// assert_eq!(result.total_accrued, 4);
/// assert_eq!(result.periods.len(), 4);
/// ```
pub fn calculate_monthly_accrual(
    hire_date: NaiveDate,
    reference_date: NaiveDate,
    tenure: Tenure,
    rules: &AccrualRules,
    step_number: u32,
) -> EngineResult<MonthlyAccrualResult> {
    let expires_on = anniversary(hire_date, 1)?;
    let is_expired = reference_date >= expires_on;
    let completed = tenure.months.min(FIRST_YEAR_GRANT_MONTHS);

    let mut periods = Vec::new();
    let mut granted = 0u32;
    let mut total_accrued = 0u32;

    if !is_expired || rules.retain_expired_grants {
        for month in 1..=completed {
            let days = rules
                .monthly_grant_days
                .min(rules.monthly_cap.saturating_sub(granted));
            if days == 0 {
                break;
            }
            granted += days;

            let valid_from = add_months(hire_date, month)?;
            periods.push(AccrualPeriod::new(
                format!("Month {}", month),
                AccrualKind::Monthly,
                days,
                valid_from,
                expires_on,
                is_expired,
            ));
        }

        if !is_expired {
            total_accrued = granted;
        }
    }

    let reasoning = if is_expired {
        format!(
            "First-year grants lapsed on {}; {} grant(s) listed, none counted",
            expires_on,
            periods.len()
        )
    } else {
        format!(
            "{} completed month(s) x {} day(s), capped at {} = {} day(s), valid until {}",
            completed, rules.monthly_grant_days, rules.monthly_cap, total_accrued, expires_on
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "monthly_accrual".to_string(),
        rule_name: "First-Year Monthly Leave".to_string(),
        clause_ref: MONTHLY_ACCRUAL_CLAUSE.to_string(),
        input: serde_json::json!({
            "hire_date": hire_date.to_string(),
            "reference_date": reference_date.to_string(),
            "months_of_service": tenure.months
        }),
        output: serde_json::json!({
            "grants": periods.len(),
            "total_accrued": total_accrued,
            "expires_on": expires_on.to_string(),
            "expired": is_expired
        }),
        reasoning,
    };

    Ok(MonthlyAccrualResult {
        periods,
        total_accrued,
        audit_step,
    })
}
