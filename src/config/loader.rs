//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading leave
//! policies from YAML files.

use chrono::FixedOffset;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{AccrualRules, LeavePolicy, PolicyMetadata};

/// Loads and provides access to a leave policy.
///
/// # Directory Structure
///
/// ```text
/// config/kr_annual_leave/
/// ├── policy.yaml   # Policy metadata and business timezone
/// └── accrual.yaml  # Accrual rule parameters
/// ```
///
/// # Example
///
/// ```no_run
/// use leave_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/kr_annual_leave")?;
/// println!("Policy: {}", loader.metadata().name);
/// println!("Base days: {}", loader.rules().base_annual_days);
/// # Ok::<(), leave_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    policy: LeavePolicy,
    offset: FixedOffset,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if a file is missing, contains invalid YAML, or
    /// holds values that fail validation (see [`ConfigLoader::from_policy`]).
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<PolicyMetadata>(&path.join("policy.yaml"))?;
        let rules = Self::load_yaml::<AccrualRules>(&path.join("accrual.yaml"))?;

        debug!(
            path = %path.display(),
            code = %metadata.code,
            version = %metadata.version,
            "Loaded leave policy"
        );

        Self::from_policy(LeavePolicy::new(metadata, rules))
    }

    /// Wraps an already-built policy after validating it.
    pub fn from_policy(policy: LeavePolicy) -> EngineResult<Self> {
        let offset = Self::validate(&policy)?;
        Ok(Self { policy, offset })
    }

    /// A loader for the built-in statutory policy.
    pub fn statutory() -> Self {
        Self::from_policy(LeavePolicy::statutory()).expect("built-in statutory policy is valid")
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn validate(policy: &LeavePolicy) -> EngineResult<FixedOffset> {
        let rules = policy.rules();

        if rules.base_annual_days == 0 {
            return Err(EngineError::InvalidConfig {
                field: "base_annual_days".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }

        if rules.bonus_interval_years == 0 {
            return Err(EngineError::InvalidConfig {
                field: "bonus_interval_years".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }

        // Only months 1..=11 can be completed inside the first year.
        let first_year_max = rules.monthly_grant_days.checked_mul(11).ok_or_else(|| {
            EngineError::InvalidConfig {
                field: "monthly_grant_days".to_string(),
                message: format!("{} is too large", rules.monthly_grant_days),
            }
        })?;
        if rules.monthly_cap > first_year_max {
            return Err(EngineError::InvalidConfig {
                field: "monthly_cap".to_string(),
                message: format!(
                    "cannot exceed 11 monthly grants of {} day(s)",
                    rules.monthly_grant_days
                ),
            });
        }

        if rules.base_annual_days.checked_add(rules.bonus_cap).is_none() {
            return Err(EngineError::InvalidConfig {
                field: "bonus_cap".to_string(),
                message: format!(
                    "base_annual_days ({}) plus bonus_cap ({}) is too large",
                    rules.base_annual_days, rules.bonus_cap
                ),
            });
        }

        let tz = &policy.metadata().business_timezone;
        match tz.offset() {
            Some(offset) if (-14..=14).contains(&tz.utc_offset_hours) => Ok(offset),
            _ => Err(EngineError::InvalidConfig {
                field: "business_timezone.utc_offset_hours".to_string(),
                message: format!("{} is outside -14..=14", tz.utc_offset_hours),
            }),
        }
    }

    /// Returns the underlying policy.
    pub fn policy(&self) -> &LeavePolicy {
        &self.policy
    }

    /// Returns the policy metadata.
    pub fn metadata(&self) -> &PolicyMetadata {
        self.policy.metadata()
    }

    /// Returns the accrual rules.
    pub fn rules(&self) -> &AccrualRules {
        self.policy.rules()
    }

    /// Returns the business timezone offset.
    pub fn business_offset(&self) -> FixedOffset {
        self.offset
    }
}
