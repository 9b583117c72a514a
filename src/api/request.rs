//! Request types for the Leave Engine API.
//!
//! Dates arrive as strings so that malformed values surface as typed
//! `INVALID_DATE` errors naming the offending field.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::clock::BusinessClock;
use crate::error::EngineResult;
use crate::models::{VacationRequest, Worker};

/// Request body for the `/leave-balance` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceRequest {
    /// The worker whose balance is requested.
    pub worker: WorkerRequest,
    /// Date to compute the balance on; defaults to today in the business timezone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_date: Option<String>,
    /// Days already used. Overrides aggregation of `vacation_requests`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub used_days: Option<Decimal>,
    /// The worker's vacation history; approved annual requests count as used.
    #[serde(default)]
    pub vacation_requests: Vec<VacationRequest>,
}

/// Request body for the `/vacation-requests/check` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckRequest {
    /// The balance context for the check.
    #[serde(flatten)]
    pub context: BalanceRequest,
    /// The request being checked.
    pub request: VacationRequest,
}

/// Worker information in a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerRequest {
    /// Unique identifier for the worker.
    pub id: String,
    /// The worker's display name.
    #[serde(default)]
    pub name: String,
    /// The employing company.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    /// The assigned site.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
    /// Hire date as `YYYY-MM-DD`; absent or null when not on record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hire_date: Option<String>,
}

impl WorkerRequest {
    /// Converts into a [`Worker`], parsing the hire date.
    pub fn into_worker(self, clock: &BusinessClock) -> EngineResult<Worker> {
        let hire_date = self
            .hire_date
            .as_deref()
            .map(|value| clock.parse_date("worker.hireDate", value))
            .transpose()?;

        Ok(Worker {
            id: self.id,
            name: self.name,
            company: self.company,
            site: self.site,
            hire_date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use chrono::NaiveDate;

    #[test]
    fn test_minimal_balance_request() {
        let json = r#"{ "worker": { "id": "w_001", "hireDate": "2023-01-15" } }"#;
        let request: BalanceRequest = serde_json::from_str(json).unwrap();

        assert!(request.reference_date.is_none());
        assert!(request.used_days.is_none());
        assert!(request.vacation_requests.is_empty());
        assert_eq!(request.worker.hire_date.as_deref(), Some("2023-01-15"));
    }

    #[test]
    fn test_into_worker_parses_hire_date() {
        let request = WorkerRequest {
            id: "w_001".to_string(),
            name: "Kim".to_string(),
            company: None,
            site: Some("Gangnam Tower".to_string()),
            hire_date: Some("2023-01-15".to_string()),
        };
        let worker = request.into_worker(&BusinessClock::kst()).unwrap();

        assert_eq!(worker.hire_date, NaiveDate::from_ymd_opt(2023, 1, 15));
        assert_eq!(worker.site.as_deref(), Some("Gangnam Tower"));
    }

    #[test]
    fn test_into_worker_without_hire_date() {
        let json = r#"{ "id": "w_002", "name": "Lee", "hireDate": null }"#;
        let request: WorkerRequest = serde_json::from_str(json).unwrap();
        let worker = request.into_worker(&BusinessClock::kst()).unwrap();

        assert!(worker.hire_date.is_none());
    }

    #[test]
    fn test_into_worker_rejects_malformed_hire_date() {
        let request = WorkerRequest {
            id: "w_003".to_string(),
            name: String::new(),
            company: None,
            site: None,
            hire_date: Some("15/01/2023".to_string()),
        };

        match request.into_worker(&BusinessClock::kst()) {
            Err(EngineError::InvalidDate { field, .. }) => assert_eq!(field, "worker.hireDate"),
            other => panic!("Expected InvalidDate, got {:?}", other),
        }
    }

    #[test]
    fn test_check_request_flattens_context() {
        let json = r#"{
            "worker": { "id": "w_001", "hireDate": "2023-01-15" },
            "referenceDate": "2024-06-20",
            "request": {
                "id": "vr_9",
                "workerId": "w_001",
                "startDate": "2024-07-01",
                "endDate": "2024-07-01",
                "leaveType": "annual",
                "days": "1",
                "status": "pending"
            }
        }"#;
        let request: CheckRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.context.reference_date.as_deref(), Some("2024-06-20"));
        assert_eq!(request.request.id, "vr_9");
    }
}
