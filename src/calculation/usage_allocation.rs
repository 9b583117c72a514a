//! Usage allocation across accrual periods.
//!
//! Used days are drawn down oldest period first. Usage beyond the total of
//! all valid periods is not carried anywhere.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{AccrualPeriod, AuditStep};

/// The result of allocating used days to accrual periods.
#[derive(Debug, Clone)]
pub struct UsageAllocationResult {
    /// The periods with `used` and `remaining` filled in.
    pub periods: Vec<AccrualPeriod>,
    /// Days that were drawn from some period.
    pub allocated: Decimal,
    /// Days left over once every valid period was exhausted.
    pub unallocated: Decimal,
    /// The audit step recording this allocation.
    pub audit_step: AuditStep,
}

/// Checks that a used-days figure is usable.
pub fn validate_used_days(used_days: Decimal) -> EngineResult<()> {
    if used_days.is_sign_negative() && !used_days.is_zero() {
        return Err(EngineError::InvalidUsage {
            message: format!("used days cannot be negative ({})", used_days.normalize()),
        });
    }
    Ok(())
}

/// Draws `used_days` down against `periods` in order.
///
/// Expired periods are skipped. Each valid period gives up to its
/// `accrued` days; `remaining` becomes `accrued - used`.
///
/// # Examples
///
/// ```
/// use leave_engine::calculation::allocate_usage;
/// use leave_engine::models::{AccrualKind, AccrualPeriod};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let period = AccrualPeriod::new(
///     "Service year 2",
///     AccrualKind::Annual,
///     15,
///     NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
///     false,
/// );
///
/// let result = allocate_usage(vec![period], Decimal::new(5, 1), 4).unwrap();
/// assert_eq!(result.periods[0].used, Decimal::new(5, 1));
/// assert_eq!(result.periods[0].remaining, Decimal::new(145, 1));
/// ```
pub fn allocate_usage(
    mut periods: Vec<AccrualPeriod>,
    used_days: Decimal,
    step_number: u32,
) -> EngineResult<UsageAllocationResult> {
    validate_used_days(used_days)?;

    let mut left = used_days;
    let mut drawn = Vec::new();

    for period in periods.iter_mut() {
        let accrued = Decimal::from(period.accrued);

        if period.is_expired {
            period.used = Decimal::ZERO;
            period.remaining = accrued;
            continue;
        }

        let take = left.min(accrued);
        period.used = take;
        period.remaining = accrued - take;
        left -= take;

        if take > Decimal::ZERO {
            drawn.push(serde_json::json!({
                "label": period.label,
                "used": take.normalize().to_string()
            }));
        }
    }

    let allocated = used_days - left;

    let audit_step = AuditStep {
        step_number,
        rule_id: "usage_allocation".to_string(),
        rule_name: "Leave Usage Allocation".to_string(),
        clause_ref: "60(5)".to_string(),
        input: serde_json::json!({
            "used_days": used_days.normalize().to_string(),
            "periods": periods.len()
        }),
        output: serde_json::json!({
            "allocated": allocated.normalize().to_string(),
            "unallocated": left.normalize().to_string(),
            "drawn": drawn
        }),
        reasoning: format!(
            "{} day(s) used: {} drawn from {} period(s) oldest first, {} not allocated",
            used_days.normalize(),
            allocated.normalize(),
            drawn.len(),
            left.normalize()
        ),
    };

    Ok(UsageAllocationResult {
        periods,
        allocated,
        unallocated: left,
        audit_step,
    })
}
