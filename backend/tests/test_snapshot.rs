//! Snapshot Tests - Save/Verify Allocation Runs
//!
//! Critical invariants tested:
//! - Round trip through JSON preserves the run
//! - Snapshot verifies only against its originating request
//! - Integrity checks catch tampered state

use budget_allocator_core_rs::allocator::{validate_snapshot, RunSnapshot};
use budget_allocator_core_rs::{
    AllocationError, AllocationRequest, Allocator, AllocatorConfig, DepartmentConfig, GrantEvent,
    ItemConfig,
};

// ============================================================================
// Test Helpers
// ============================================================================

fn item(name: &str, price: i64) -> ItemConfig {
    ItemConfig {
        name: name.to_string(),
        price,
    }
}

fn create_test_request() -> AllocationRequest {
    AllocationRequest {
        config: AllocatorConfig::new(60_000),
        departments: vec![
            DepartmentConfig {
                name: "Computer Science".to_string(),
                items: vec![item("Laptop", 120_000), item("Textbook", 20_000)],
            },
            DepartmentConfig {
                name: "Mathematics".to_string(),
                items: vec![item("Graphpaper", 15_000), item("Coffee", 30_000)],
            },
        ],
    }
}

fn capture(request: &AllocationRequest) -> RunSnapshot {
    let result = Allocator::from_request(request).unwrap().run().unwrap();
    RunSnapshot::capture(&result, request).unwrap()
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn test_snapshot_json_round_trip() {
    let snapshot = capture(&create_test_request());

    let restored = RunSnapshot::from_json(&snapshot.to_json().unwrap()).unwrap();

    assert_eq!(restored, snapshot);
    assert_eq!(restored.departments[0].rejected()[0].name(), "Laptop");
    assert_eq!(restored.fallback_cap, 100_000);
}

#[test]
fn test_snapshot_verifies_against_same_request() {
    let request = create_test_request();
    let snapshot = capture(&request);

    assert!(snapshot.verify_inputs(&request).is_ok());
    assert!(validate_snapshot(&snapshot).is_ok());
}

#[test]
fn test_snapshot_rejects_different_request() {
    let request = create_test_request();
    let snapshot = capture(&request);

    let mut other = request.clone();
    other.departments[1].items.push(item("Chalk", 500));

    let err = snapshot.verify_inputs(&other).unwrap_err();
    assert!(matches!(err, AllocationError::InputMismatch { .. }));
}

#[test]
fn test_same_request_produces_same_snapshot() {
    let request = create_test_request();

    assert_eq!(capture(&request), capture(&request));
}

#[test]
fn test_validate_detects_conservation_violation() {
    let mut snapshot = capture(&create_test_request());
    snapshot.remaining_budget = 5_000;

    let err = validate_snapshot(&snapshot).unwrap_err();
    assert!(matches!(err, AllocationError::StateValidationError(_)));
}

#[test]
fn test_validate_detects_log_department_disagreement() {
    let mut snapshot = capture(&create_test_request());
    snapshot.initial_budget += 1_000;
    snapshot
        .log
        .log(GrantEvent::scholarship("Mathematics", 1_000));

    let err = validate_snapshot(&snapshot).unwrap_err();
    assert!(err.to_string().contains("Departments spent 60000 but log records 61000"));
}

#[test]
fn test_validate_detects_grant_kinds_out_of_step_with_granted() {
    let snapshot = capture(&create_test_request());
    let mut value: serde_json::Value = serde_json::from_str(&snapshot.to_json().unwrap()).unwrap();
    value["departments"][1]["grant_kinds"]
        .as_array_mut()
        .unwrap()
        .pop();

    let tampered = RunSnapshot::from_json(&value.to_string()).unwrap();

    let err = validate_snapshot(&tampered).unwrap_err();
    assert!(err
        .to_string()
        .contains("Department Mathematics has 2 granted items but 1 grant kinds"));
}

#[test]
fn test_validate_detects_scholarship_totals_mismatch() {
    let snapshot = capture(&create_test_request());
    let mut value: serde_json::Value = serde_json::from_str(&snapshot.to_json().unwrap()).unwrap();
    value["departments"][1]["scholarship_total"] = serde_json::json!(0);

    let tampered = RunSnapshot::from_json(&value.to_string()).unwrap();

    let err = validate_snapshot(&tampered).unwrap_err();
    assert!(matches!(err, AllocationError::StateValidationError(_)));
    assert!(err.to_string().contains("records 1 scholarships totalling 0"));
}
