//! Integration tests for the Leave Engine HTTP API.
//!
//! This test suite covers:
//! - First-year monthly grants and their expiry at the first anniversary
//! - The annual entitlement and its seniority bonus
//! - Usage allocation, including half days and overdrawn usage
//! - Workers who have not started yet, and workers with no hire date
//! - Vacation request checks
//! - Error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use tower::ServiceExt;

use leave_engine::api::{AppState, NO_HIRE_DATE_MESSAGE, create_router};
use leave_engine::config::ConfigLoader;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/kr_annual_leave").expect("Failed to load config");
    AppState::new(config)
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

async fn post(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

async fn balance(hire_date: &str, reference_date: &str) -> Value {
    balance_with(json!({
        "worker": { "id": "w_001", "name": "Kim Minsu", "hireDate": hire_date },
        "referenceDate": reference_date
    }))
    .await
}

async fn balance_with(body: Value) -> Value {
    let (status, json) = post(create_router_for_test(), "/leave-balance", body).await;
    assert_eq!(status, StatusCode::OK, "unexpected body: {}", json);
    json
}

fn num(value: &Value) -> f64 {
    value
        .as_f64()
        .unwrap_or_else(|| panic!("expected a JSON number, got {}", value))
}

fn annual_request(id: &str, days: f64, status: &str) -> Value {
    json!({
        "id": id,
        "workerId": "w_001",
        "startDate": "2024-03-04",
        "endDate": "2024-03-05",
        "leaveType": "annual",
        "days": days,
        "status": status
    })
}

// =============================================================================
// Tenure and first-year grants
// =============================================================================

#[tokio::test]
async fn test_reference_on_hire_date_accrues_nothing() {
    let result = balance("2024-03-01", "2024-03-01").await;

    assert_eq!(result["status"], "active");
    assert_eq!(result["totalAccrued"], 0);
    assert_eq!(result["yearsOfService"], 0);
    assert_eq!(result["monthsOfService"], 0);
    assert_eq!(result["accruals"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_eleven_months_grants_eleven_days() {
    let result = balance("2023-03-10", "2024-02-10").await;

    assert_eq!(result["totalAccrued"], 11);
    assert_eq!(result["monthsOfService"], 11);
    assert_eq!(num(&result["totalRemaining"]), 11.0);

    let accruals = result["accruals"].as_array().unwrap();
    assert_eq!(accruals.len(), 11);
    assert!(accruals.iter().all(|a| a["kind"] == "monthly"));
    assert!(accruals.iter().all(|a| a["expiresOn"] == "2024-03-10"));
    assert_eq!(accruals[0]["label"], "Month 1");
    assert_eq!(accruals[0]["validFrom"], "2023-04-10");
}

#[tokio::test]
async fn test_monthly_grants_expire_after_first_year() {
    let result = balance("2023-03-10", "2024-03-11").await;

    assert_eq!(result["yearsOfService"], 1);
    assert_eq!(result["totalAccrued"], 15);

    let accruals = result["accruals"].as_array().unwrap();
    assert_eq!(accruals.len(), 1);
    assert_eq!(accruals[0]["kind"], "annual");
    assert_eq!(accruals[0]["accrued"], 15);
}

#[tokio::test]
async fn test_month_end_hire_clamps_grant_dates() {
    let result = balance("2024-01-31", "2024-03-31").await;

    assert_eq!(result["monthsOfService"], 2);
    let accruals = result["accruals"].as_array().unwrap();
    assert_eq!(accruals[0]["validFrom"], "2024-02-29");
    assert_eq!(accruals[1]["validFrom"], "2024-03-31");
}

// =============================================================================
// Annual entitlement
// =============================================================================

#[tokio::test]
async fn test_one_year_scenario() {
    let result = balance("2023-01-15", "2024-06-20").await;

    assert_eq!(result["yearsOfService"], 1);
    assert_eq!(result["monthsOfService"], 17);
    assert_eq!(result["totalAccrued"], 15);
    assert_eq!(result["referenceDate"], "2024-06-20");
}

#[tokio::test]
async fn test_four_year_scenario_includes_bonus() {
    let result = balance("2020-01-01", "2024-01-02").await;

    assert_eq!(result["yearsOfService"], 4);
    assert_eq!(result["totalAccrued"], 16);

    let accruals = result["accruals"].as_array().unwrap();
    assert_eq!(accruals[0]["validFrom"], "2024-01-01");
    assert_eq!(accruals[0]["expiresOn"], "2025-01-01");
}

#[tokio::test]
async fn test_three_years_grants_one_bonus_day() {
    let result = balance("2021-05-01", "2024-05-01").await;

    assert_eq!(result["yearsOfService"], 3);
    assert_eq!(result["totalAccrued"], 16);
}

#[tokio::test]
async fn test_entitlement_caps_at_twenty_five() {
    let at_cap = balance("2003-05-01", "2024-05-01").await;
    let long_service = balance("1999-05-01", "2024-05-01").await;

    assert_eq!(at_cap["yearsOfService"], 21);
    assert_eq!(at_cap["totalAccrued"], 25);
    assert_eq!(long_service["yearsOfService"], 25);
    assert_eq!(long_service["totalAccrued"], 25);
}

// =============================================================================
// Usage
// =============================================================================

#[tokio::test]
async fn test_half_day_usage() {
    let result = balance_with(json!({
        "worker": { "id": "w_001", "hireDate": "2023-01-15" },
        "referenceDate": "2024-06-20",
        "usedDays": 0.5
    }))
    .await;

    assert_eq!(num(&result["totalUsed"]), 0.5);
    assert_eq!(num(&result["totalRemaining"]), 14.5);
    assert_eq!(num(&result["accruals"][0]["used"]), 0.5);
    assert_eq!(num(&result["accruals"][0]["remaining"]), 14.5);
}

#[tokio::test]
async fn test_overdrawn_usage_floors_remaining_at_zero() {
    let result = balance_with(json!({
        "worker": { "id": "w_001", "hireDate": "2023-01-15" },
        "referenceDate": "2024-06-20",
        "usedDays": 20
    }))
    .await;

    assert_eq!(num(&result["totalUsed"]), 20.0);
    assert_eq!(num(&result["totalRemaining"]), 0.0);
    assert_eq!(num(&result["accruals"][0]["used"]), 15.0);
}

#[tokio::test]
async fn test_only_approved_annual_requests_count_as_used() {
    let result = balance_with(json!({
        "worker": { "id": "w_001", "hireDate": "2023-01-15" },
        "referenceDate": "2024-06-20",
        "vacationRequests": [
            annual_request("vr_1", 2.0, "approved"),
            annual_request("vr_2", 3.0, "pending"),
            annual_request("vr_3", 1.0, "rejected"),
            {
                "id": "vr_4",
                "workerId": "w_001",
                "startDate": "2024-04-01",
                "endDate": "2024-04-01",
                "leaveType": "half_day_pm",
                "days": 1,
                "status": "approved"
            },
            {
                "id": "vr_5",
                "workerId": "w_001",
                "startDate": "2024-05-01",
                "endDate": "2024-05-03",
                "leaveType": "sick",
                "days": 3,
                "status": "approved"
            }
        ]
    }))
    .await;

    assert_eq!(num(&result["totalUsed"]), 2.5);
    assert_eq!(num(&result["totalRemaining"]), 12.5);
}

#[tokio::test]
async fn test_used_days_override_request_history() {
    let result = balance_with(json!({
        "worker": { "id": "w_001", "hireDate": "2023-01-15" },
        "referenceDate": "2024-06-20",
        "usedDays": 1,
        "vacationRequests": [annual_request("vr_1", 5.0, "approved")]
    }))
    .await;

    assert_eq!(num(&result["totalUsed"]), 1.0);
}

#[tokio::test]
async fn test_requests_for_other_workers_are_ignored() {
    let mut foreign = annual_request("vr_9", 4.0, "approved");
    foreign["workerId"] = json!("w_002");

    let result = balance_with(json!({
        "worker": { "id": "w_001", "hireDate": "2023-01-15" },
        "referenceDate": "2024-06-20",
        "vacationRequests": [annual_request("vr_1", 1.0, "approved"), foreign]
    }))
    .await;

    assert_eq!(num(&result["totalUsed"]), 1.0);
}

// =============================================================================
// Employment status
// =============================================================================

#[tokio::test]
async fn test_future_hire_date_is_not_yet_employed() {
    let result = balance("2025-01-01", "2024-06-20").await;

    assert_eq!(result["status"], "not_yet_employed");
    assert_eq!(result["totalAccrued"], 0);
    assert_eq!(num(&result["totalRemaining"]), 0.0);
    assert_eq!(result["yearsOfService"], 0);
    assert!(result["message"].as_str().unwrap().contains("not started"));
}

#[tokio::test]
async fn test_missing_hire_date_returns_message_only() {
    let result = balance_with(json!({
        "worker": { "id": "w_404", "name": "Park" },
        "referenceDate": "2024-06-20"
    }))
    .await;

    assert_eq!(result["workerId"], "w_404");
    assert_eq!(result["message"], NO_HIRE_DATE_MESSAGE);
    assert!(result.get("totalAccrued").is_none());
}

// =============================================================================
// Audit trace
// =============================================================================

#[tokio::test]
async fn test_audit_trace_names_each_clause() {
    let result = balance("2020-01-01", "2024-01-02").await;
    let steps = result["auditTrace"]["steps"].as_array().unwrap();

    let rule_ids: Vec<&str> = steps.iter().map(|s| s["ruleId"].as_str().unwrap()).collect();
    assert_eq!(
        rule_ids,
        vec!["tenure", "monthly_accrual", "annual_accrual", "usage_allocation"]
    );
    assert_eq!(steps[2]["clauseRef"], "60(1), 60(4)");
    assert_eq!(steps[0]["stepNumber"], 1);
}

// =============================================================================
// Vacation request checks
// =============================================================================

#[tokio::test]
async fn test_check_request_that_fits() {
    let (status, result) = post(
        create_router_for_test(),
        "/vacation-requests/check",
        json!({
            "worker": { "id": "w_001", "hireDate": "2023-01-15" },
            "referenceDate": "2024-06-20",
            "usedDays": 10,
            "request": annual_request("vr_10", 3.0, "pending")
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["requestId"], "vr_10");
    assert_eq!(result["check"]["fits"], true);
    assert_eq!(num(&result["check"]["remainingAfter"]), 2.0);
    assert_eq!(num(&result["balance"]["totalRemaining"]), 5.0);
}

#[tokio::test]
async fn test_check_request_with_shortfall() {
    let (status, result) = post(
        create_router_for_test(),
        "/vacation-requests/check",
        json!({
            "worker": { "id": "w_001", "hireDate": "2023-01-15" },
            "referenceDate": "2024-06-20",
            "usedDays": 14,
            "request": annual_request("vr_11", 3.0, "pending")
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["check"]["fits"], false);
    assert_eq!(num(&result["check"]["shortfall"]), 2.0);
}

#[tokio::test]
async fn test_check_without_hire_date_is_unprocessable() {
    let (status, result) = post(
        create_router_for_test(),
        "/vacation-requests/check",
        json!({
            "worker": { "id": "w_001" },
            "request": annual_request("vr_12", 1.0, "pending")
        }),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(result["code"], "NO_HIRE_DATE");
}

// =============================================================================
// Error cases
// =============================================================================

#[tokio::test]
async fn test_negative_used_days_rejected() {
    let (status, result) = post(
        create_router_for_test(),
        "/leave-balance",
        json!({
            "worker": { "id": "w_001", "hireDate": "2023-01-15" },
            "referenceDate": "2024-06-20",
            "usedDays": -1
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "INVALID_USAGE");
}

#[tokio::test]
async fn test_negative_history_days_rejected() {
    let (status, result) = post(
        create_router_for_test(),
        "/leave-balance",
        json!({
            "worker": { "id": "w_001", "hireDate": "2023-01-15" },
            "referenceDate": "2024-06-20",
            "vacationRequests": [
                annual_request("vr_1", 5.0, "approved"),
                annual_request("vr_2", -3.0, "approved")
            ]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "INVALID_USAGE");
    assert!(result["message"].as_str().unwrap().contains("vr_2"));
}

#[tokio::test]
async fn test_overflowing_history_rejected() {
    let mut first = annual_request("vr_1", 1.0, "approved");
    first["days"] = json!("79228162514264337593543950335");
    let mut second = annual_request("vr_2", 1.0, "approved");
    second["days"] = json!("79228162514264337593543950335");

    let (status, result) = post(
        create_router_for_test(),
        "/leave-balance",
        json!({
            "worker": { "id": "w_001", "hireDate": "2023-01-15" },
            "referenceDate": "2024-06-20",
            "vacationRequests": [first, second]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "INVALID_USAGE");
}

#[tokio::test]
async fn test_malformed_reference_date_rejected() {
    let (status, result) = post(
        create_router_for_test(),
        "/leave-balance",
        json!({
            "worker": { "id": "w_001", "hireDate": "2023-01-15" },
            "referenceDate": "20/06/2024"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "INVALID_DATE");
    assert!(result["message"].as_str().unwrap().contains("referenceDate"));
}

#[tokio::test]
async fn test_rfc3339_reference_date_uses_business_timezone() {
    // 20:00 UTC on the 19th is already the 20th in Seoul.
    let result = balance("2023-06-20", "2024-06-19T20:00:00Z").await;

    assert_eq!(result["referenceDate"], "2024-06-20");
    assert_eq!(result["yearsOfService"], 1);
}

#[tokio::test]
async fn test_missing_content_type_rejected() {
    let response = create_router_for_test()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/leave-balance")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_route_returns_404() {
    let (status, _) = post(create_router_for_test(), "/calculate", json!({})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
