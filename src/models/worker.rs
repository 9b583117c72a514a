//! Worker model.
//!
//! This module defines the [`Worker`] struct for guards and other staff
//! whose leave entitlement is calculated.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Represents a worker assigned to a company site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Worker {
    /// Unique identifier for the worker.
    pub id: String,
    /// The worker's display name.
    pub name: String,
    /// The employing company.
    #[serde(default)]
    pub company: Option<String>,
    /// The site the worker is assigned to.
    #[serde(default)]
    pub site: Option<String>,
    /// The date the worker was hired, if on record.
    #[serde(default)]
    pub hire_date: Option<NaiveDate>,
}

impl Worker {
    /// Returns true if a hire date is on record.
    ///
    /// # Examples
    ///
    /// ```
    /// use leave_engine::models::Worker;
    /// use chrono::NaiveDate;
    ///
    /// let worker = Worker {
    ///     id: "w_001".to_string(),
    ///     name: "Kim Minsu".to_string(),
    ///     company: None,
    ///     site: None,
    ///     hire_date: NaiveDate::from_ymd_opt(2023, 1, 15),
    /// };
    /// assert!(worker.has_hire_date());
    /// ```
    pub fn has_hire_date(&self) -> bool {
        self.hire_date.is_some()
    }
}
