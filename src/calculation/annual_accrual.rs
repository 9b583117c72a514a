//! Annual accrual from the first anniversary onwards.
//!
//! Each completed year of service grants the base entitlement for the
//! following service year, plus one bonus day for every full bonus interval
//! served beyond the first year, up to the bonus cap.

use chrono::NaiveDate;

use crate::config::AccrualRules;
use crate::error::{EngineError, EngineResult};
use crate::models::{AccrualKind, AccrualPeriod, AuditStep, Tenure};

use super::tenure::anniversary;

/// Statutory clauses for the base entitlement and the seniority bonus.
pub const ANNUAL_ACCRUAL_CLAUSE: &str = "60(1), 60(4)";

/// The result of calculating the current service-year entitlement.
#[derive(Debug, Clone)]
pub struct AnnualAccrualResult {
    /// The current service-year period, if the worker has reached a
    /// first anniversary and the window has begun.
    pub period: Option<AccrualPeriod>,
    /// Base days for the current year.
    pub base_days: u32,
    /// Bonus days for the current year.
    pub bonus_days: u32,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

impl AnnualAccrualResult {
    /// Days this bucket contributes to the balance.
    pub fn total_accrued(&self) -> u32 {
        self.period
            .as_ref()
            .filter(|p| !p.is_expired)
            .map_or(0, |p| p.accrued)
    }
}

/// Bonus days earned after `years_of_service` completed years.
///
/// `floor((years - 1) / bonus_interval_years)`, capped at `bonus_cap`.
///
/// # Examples
///
/// ```
/// use leave_engine::calculation::annual_bonus_days;
/// use leave_engine::config::AccrualRules;
///
/// let rules = AccrualRules::default();
/// assert_eq!(annual_bonus_days(1, &rules), 0);
/// assert_eq!(annual_bonus_days(3, &rules), 1);
/// assert_eq!(annual_bonus_days(21, &rules), 10);
/// assert_eq!(annual_bonus_days(40, &rules), 10);
/// ```
pub fn annual_bonus_days(years_of_service: u32, rules: &AccrualRules) -> u32 {
    if years_of_service == 0 || rules.bonus_interval_years == 0 {
        return 0;
    }
    ((years_of_service - 1) / rules.bonus_interval_years).min(rules.bonus_cap)
}

/// Total days granted for the service year following `years_of_service`
/// completed years. Zero before the first anniversary.
pub fn annual_entitlement(years_of_service: u32, rules: &AccrualRules) -> u32 {
    if years_of_service == 0 {
        return 0;
    }
    rules
        .base_annual_days
        .saturating_add(annual_bonus_days(years_of_service, rules))
}

/// Calculates the entitlement bucket for the current service year.
///
/// The bucket covers `[hire + years, hire + years + 1)`. It contributes
/// nothing if the reference date has not reached the window start, and is
/// flagged expired once the reference date reaches the window end.
///
/// # Examples
///
/// ```
/// use leave_engine::calculation::{calculate_annual_accrual, calculate_tenure};
/// use leave_engine::config::AccrualRules;
/// use chrono::NaiveDate;
///
/// let hire = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
/// let reference = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
/// let tenure = calculate_tenure(hire, reference, 1).unwrap().tenure;
///
/// let result = calculate_annual_accrual(hire, reference, tenure, &AccrualRules::default(), 3).unwrap();
/// assert_eq!(result.base_days, 15);
/// assert_eq!(result.bonus_days, 1);
/// assert_eq!(result.total_accrued(), 16);
/// ```
pub fn calculate_annual_accrual(
    hire_date: NaiveDate,
    reference_date: NaiveDate,
    tenure: Tenure,
    rules: &AccrualRules,
    step_number: u32,
) -> EngineResult<AnnualAccrualResult> {
    let years = tenure.years;

    if years == 0 {
        return Ok(AnnualAccrualResult {
            period: None,
            base_days: 0,
            bonus_days: 0,
            audit_step: annual_step(
                step_number,
                hire_date,
                reference_date,
                years,
                serde_json::json!({ "total_accrued": 0 }),
                "First anniversary not yet reached".to_string(),
            ),
        });
    }

    let window_start = anniversary(hire_date, years)?;
    let window_end = anniversary(hire_date, years + 1)?;

    if reference_date < window_start {
        return Ok(AnnualAccrualResult {
            period: None,
            base_days: 0,
            bonus_days: 0,
            audit_step: annual_step(
                step_number,
                hire_date,
                reference_date,
                years,
                serde_json::json!({
                    "total_accrued": 0,
                    "valid_from": window_start.to_string()
                }),
                format!("Service year {} has not begun (starts {})", years + 1, window_start),
            ),
        });
    }

    let base_days = rules.base_annual_days;
    let bonus_days = annual_bonus_days(years, rules);
    let accrued = base_days
        .checked_add(bonus_days)
        .ok_or_else(|| EngineError::InvalidConfig {
            field: "base_annual_days".to_string(),
            message: format!("{} base plus {} bonus days is too large", base_days, bonus_days),
        })?;
    let is_expired = reference_date >= window_end;
    let counted = if is_expired { 0 } else { accrued };

    let period = AccrualPeriod::new(
        format!("Service year {}", years + 1),
        AccrualKind::Annual,
        accrued,
        window_start,
        window_end,
        is_expired,
    );

    let audit_step = annual_step(
        step_number,
        hire_date,
        reference_date,
        years,
        serde_json::json!({
            "base_days": base_days,
            "bonus_days": bonus_days,
            "total_accrued": counted,
            "valid_from": window_start.to_string(),
            "expires_on": window_end.to_string(),
            "expired": is_expired
        }),
        format!(
            "{} year(s) of service: {} base + min({}, floor(({} - 1) / {})) bonus = {} day(s), valid {} to {}",
            years,
            base_days,
            rules.bonus_cap,
            years,
            rules.bonus_interval_years,
            accrued,
            window_start,
            window_end
        ),
    );

    Ok(AnnualAccrualResult {
        period: Some(period),
        base_days,
        bonus_days,
        audit_step,
    })
}

fn annual_step(
    step_number: u32,
    hire_date: NaiveDate,
    reference_date: NaiveDate,
    years: u32,
    output: serde_json::Value,
    reasoning: String,
) -> AuditStep {
    AuditStep {
        step_number,
        rule_id: "annual_accrual".to_string(),
        rule_name: "Annual Leave Entitlement".to_string(),
        clause_ref: ANNUAL_ACCRUAL_CLAUSE.to_string(),
        input: serde_json::json!({
            "hire_date": hire_date.to_string(),
            "reference_date": reference_date.to_string(),
            "years_of_service": years
        }),
        output,
        reasoning,
    }
}
