//! Tenure calculation functionality.
//!
//! Month arithmetic clamps to the end of the target month, so a worker hired
//! on January 31st completes their first month on the last day of February.

use chrono::{Datelike, Months, NaiveDate};

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, Tenure};

/// The result of a tenure calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct TenureResult {
    /// Completed years and months of service.
    pub tenure: Tenure,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Adds whole months to a date, clamping to the end of the target month.
///
/// # Examples
///
/// ```
/// use leave_engine::calculation::add_months;
/// use chrono::NaiveDate;
///
/// let hire = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
/// assert_eq!(add_months(hire, 1).unwrap(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
/// ```
pub fn add_months(date: NaiveDate, months: u32) -> EngineResult<NaiveDate> {
    date.checked_add_months(Months::new(months))
        .ok_or_else(|| EngineError::CalculationError {
            message: format!("{} plus {} months is out of range", date, months),
        })
}

/// Returns the `years`-th anniversary of `hire_date`.
///
/// A February 29th hire date has its anniversaries on February 28th in
/// non-leap years.
pub fn anniversary(hire_date: NaiveDate, years: u32) -> EngineResult<NaiveDate> {
    let months = years
        .checked_mul(12)
        .ok_or_else(|| EngineError::CalculationError {
            message: format!("anniversary {} is out of range", years),
        })?;
    add_months(hire_date, months)
}

/// Counts completed months and years between a hire date and a reference date.
///
/// Month `n` is complete once `hire_date + n months <= reference_date`.
/// A reference date on or before the hire date yields zero tenure.
///
/// # Examples
///
/// ```
/// use leave_engine::calculation::calculate_tenure;
/// use chrono::NaiveDate;
///
/// let hire = NaiveDate::from_ymd_opt(2023, 1, 15).unwrap();
/// let reference = NaiveDate::from_ymd_opt(2024, 6, 20).unwrap();
///
/// let result = calculate_tenure(hire, reference, 1).unwrap();
/// assert_eq!(result.tenure.years, 1);
/// assert_eq!(result.tenure.months, 17);
/// ```
pub fn calculate_tenure(
    hire_date: NaiveDate,
    reference_date: NaiveDate,
    step_number: u32,
) -> EngineResult<TenureResult> {
    let mut months = 0u32;

    if reference_date > hire_date {
        let estimate = (reference_date.year() - hire_date.year()) * 12
            + (reference_date.month() as i32 - hire_date.month() as i32);
        months = estimate.max(0) as u32;

        // Overshoots by one when the day of month has not been reached yet.
        while months > 0 && add_months(hire_date, months)? > reference_date {
            months -= 1;
        }
    }

    let tenure = Tenure {
        years: months / 12,
        months,
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "tenure".to_string(),
        rule_name: "Length of Service".to_string(),
        clause_ref: "60".to_string(),
        input: serde_json::json!({
            "hire_date": hire_date.to_string(),
            "reference_date": reference_date.to_string()
        }),
        output: serde_json::json!({
            "years": tenure.years,
            "months": tenure.months
        }),
        reasoning: format!(
            "{} to {}: {} completed month(s), {} completed year(s)",
            hire_date, reference_date, tenure.months, tenure.years
        ),
    };

    Ok(TenureResult { tenure, audit_step })
}
