//! Configuration types for leave accrual.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::FixedOffset;
use serde::Deserialize;

/// The fixed timezone all business dates are resolved in.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BusinessTimezone {
    /// Display name (e.g., "KST").
    pub name: String,
    /// Offset from UTC in whole hours.
    pub utc_offset_hours: i32,
}

impl BusinessTimezone {
    /// Returns the offset as a chrono [`FixedOffset`], if it is in range.
    pub fn offset(&self) -> Option<FixedOffset> {
        FixedOffset::east_opt(self.utc_offset_hours.checked_mul(3600)?)
    }
}

impl Default for BusinessTimezone {
    fn default() -> Self {
        Self {
            name: "KST".to_string(),
            utc_offset_hours: 9,
        }
    }
}

/// Metadata about the leave policy.
///
/// Identifies the statute the accrual rules implement and the timezone the
/// surrounding system works in.
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyMetadata {
    /// Short policy code (e.g., "KR-LSA-60").
    pub code: String,
    /// The human-readable name of the policy.
    pub name: String,
    /// The version or effective date of the policy.
    pub version: String,
    /// Jurisdiction code (e.g., "KR").
    pub jurisdiction: String,
    /// URL to the official source of the rules.
    pub source_url: String,
    /// Timezone used to resolve "today".
    #[serde(default)]
    pub business_timezone: BusinessTimezone,
}

/// Accrual rule parameters loaded from `accrual.yaml`.
///
/// The [`Default`] implementation carries the statutory values, so callers
/// without a configuration directory still compute the legal entitlement.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AccrualRules {
    /// Days granted for each completed month in the first service year.
    pub monthly_grant_days: u32,
    /// Maximum total of first-year monthly grants.
    pub monthly_cap: u32,
    /// Base days granted each service year from the first anniversary.
    pub base_annual_days: u32,
    /// Years of service per additional bonus day, counted after the first year.
    pub bonus_interval_years: u32,
    /// Maximum number of bonus days.
    pub bonus_cap: u32,
    /// Whether expired first-year grants are listed (flagged expired) in the balance.
    #[serde(default)]
    pub retain_expired_grants: bool,
}

impl Default for AccrualRules {
    fn default() -> Self {
        Self {
            monthly_grant_days: 1,
            monthly_cap: 11,
            base_annual_days: 15,
            bonus_interval_years: 2,
            bonus_cap: 10,
            retain_expired_grants: false,
        }
    }
}

impl AccrualRules {
    /// The most days a single service year can ever accrue.
    pub fn max_annual_days(&self) -> u32 {
        self.base_annual_days.saturating_add(self.bonus_cap)
    }
}

/// The complete leave policy loaded from YAML files.
#[derive(Debug, Clone)]
pub struct LeavePolicy {
    /// Policy metadata.
    metadata: PolicyMetadata,
    /// Accrual rule parameters.
    rules: AccrualRules,
}

impl LeavePolicy {
    /// Creates a new LeavePolicy from its component parts.
    pub fn new(metadata: PolicyMetadata, rules: AccrualRules) -> Self {
        Self { metadata, rules }
    }

    /// The built-in statutory policy, used when no configuration is supplied.
    pub fn statutory() -> Self {
        Self {
            metadata: PolicyMetadata {
                code: "KR-LSA-60".to_string(),
                name: "Annual Paid Leave (Labor Standards Act, Article 60)".to_string(),
                version: "2018-05-29".to_string(),
                jurisdiction: "KR".to_string(),
                source_url: "https://www.law.go.kr/LSW/lsInfoP.do?lsiSeq=218303".to_string(),
                business_timezone: BusinessTimezone::default(),
            },
            rules: AccrualRules::default(),
        }
    }

    /// Returns the policy metadata.
    pub fn metadata(&self) -> &PolicyMetadata {
        &self.metadata
    }

    /// Returns the accrual rules.
    pub fn rules(&self) -> &AccrualRules {
        &self.rules
    }
}
