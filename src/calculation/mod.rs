//! Calculation logic for the Leave Engine.
//!
//! This module contains the accrual rules, one per file: tenure, first-year
//! monthly grants, the annual entitlement with its seniority bonus, usage
//! allocation, and the balance assembly that runs them in order. It also
//! holds the usage aggregation and request check used by the service layer.

mod annual_accrual;
mod leave_balance;
mod monthly_accrual;
mod request_check;
mod tenure;
mod usage;
mod usage_allocation;

pub use annual_accrual::{
    ANNUAL_ACCRUAL_CLAUSE, AnnualAccrualResult, annual_bonus_days, annual_entitlement,
    calculate_annual_accrual,
};
pub use leave_balance::calculate_leave_balance;
pub use monthly_accrual::{MONTHLY_ACCRUAL_CLAUSE, MonthlyAccrualResult, calculate_monthly_accrual};
pub use request_check::{RequestCheck, check_vacation_request};
pub use tenure::{TenureResult, add_months, anniversary, calculate_tenure};
pub use usage::sum_used_days;
pub use usage_allocation::{UsageAllocationResult, allocate_usage, validate_used_days};
