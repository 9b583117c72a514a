//! Leave balance assembly.
//!
//! Runs the tenure, monthly accrual, annual accrual and usage allocation
//! rules in order and gathers their results into a [`LeaveBalance`].

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use crate::config::AccrualRules;
use crate::error::EngineResult;
use crate::models::{AuditStep, AuditTrace, BalanceStatus, LeaveBalance};

use super::annual_accrual::calculate_annual_accrual;
use super::monthly_accrual::calculate_monthly_accrual;
use super::tenure::calculate_tenure;
use super::usage_allocation::{allocate_usage, validate_used_days};

/// Calculates a worker's leave balance on `reference_date`.
///
/// `reference_date` must already be resolved in the business timezone; this
/// function never reads the clock. `used_days` may carry half days.
///
/// A hire date after the reference date is not an error: the result has
/// status [`BalanceStatus::NotYetEmployed`] and is zero throughout. A negative
/// `used_days` is rejected with [`crate::error::EngineError::InvalidUsage`].
///
/// # Examples
///
/// ```
/// use leave_engine::calculation::calculate_leave_balance;
/// use leave_engine::config::AccrualRules;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let hire = NaiveDate::from_ymd_opt(2023, 1, 15).unwrap();
/// let reference = NaiveDate::from_ymd_opt(2024, 6, 20).unwrap();
///
/// let balance = calculate_leave_balance(hire, reference, Decimal::new(5, 1), &AccrualRules::default())?;
/// assert_eq!(balance.years_of_service, 1);
/// assert_eq!(balance.total_accrued, 15);
/// assert_eq!(balance.total_remaining, Decimal::new(145, 1));
/// # Ok::<(), leave_engine::error::EngineError>(())
/// ```
pub fn calculate_leave_balance(
    hire_date: NaiveDate,
    reference_date: NaiveDate,
    used_days: Decimal,
    rules: &AccrualRules,
) -> EngineResult<LeaveBalance> {
    validate_used_days(used_days)?;

    let mut step_number: u32 = 1;

    if hire_date > reference_date {
        debug!(%hire_date, %reference_date, "Hire date is after reference date");

        let mut balance = LeaveBalance::not_yet_employed();
        balance.audit_trace.steps.push(AuditStep {
            step_number,
            rule_id: "employment_status".to_string(),
            rule_name: "Employment Status".to_string(),
            clause_ref: "60".to_string(),
            input: serde_json::json!({
                "hire_date": hire_date.to_string(),
                "reference_date": reference_date.to_string()
            }),
            output: serde_json::json!({ "status": "not_yet_employed" }),
            reasoning: format!(
                "Hire date {} is after reference date {}; nothing has accrued",
                hire_date, reference_date
            ),
        });
        return Ok(balance);
    }

    let mut steps = Vec::with_capacity(4);

    let tenure_result = calculate_tenure(hire_date, reference_date, step_number)?;
    let tenure = tenure_result.tenure;
    steps.push(tenure_result.audit_step);
    step_number += 1;

    let monthly = calculate_monthly_accrual(hire_date, reference_date, tenure, rules, step_number)?;
    steps.push(monthly.audit_step);
    step_number += 1;

    let annual = calculate_annual_accrual(hire_date, reference_date, tenure, rules, step_number)?;
    let annual_accrued = annual.total_accrued();
    steps.push(annual.audit_step);
    step_number += 1;

    let total_accrued = monthly.total_accrued + annual_accrued;

    // Monthly grants start before the first anniversary, so this stays chronological.
    let mut periods = monthly.periods;
    periods.extend(annual.period);

    let allocation = allocate_usage(periods, used_days, step_number)?;
    steps.push(allocation.audit_step);

    let total_remaining = (Decimal::from(total_accrued) - used_days).max(Decimal::ZERO);

    debug!(
        %hire_date,
        %reference_date,
        years = tenure.years,
        months = tenure.months,
        total_accrued,
        used = %used_days,
        remaining = %total_remaining,
        "Leave balance calculated"
    );

    Ok(LeaveBalance {
        status: BalanceStatus::Active,
        total_accrued,
        total_used: used_days,
        total_remaining,
        accruals: allocation.periods,
        years_of_service: tenure.years,
        months_of_service: tenure.months,
        audit_trace: AuditTrace { steps },
    })
}
