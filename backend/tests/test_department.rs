//! Tests for Department model
//!
//! CRITICAL: All money values are i64 (cents)

use budget_allocator_core_rs::{Department, DepartmentError, Item};

fn item(name: &str, price: i64) -> Item {
    Item::new(name.to_string(), price)
}

#[test]
fn test_department_new() {
    let dept = Department::new("Computer Science".to_string());

    assert_eq!(dept.name(), "Computer Science");
    assert_eq!(dept.spent(), 0);
    assert!(!dept.has_desired());
    assert!(dept.granted().is_empty());
    assert!(dept.rejected().is_empty());
}

#[test]
fn test_desired_queue_is_fifo() {
    let mut dept = Department::new("Computer Science".to_string());
    dept.add_desired(item("Laptop", 120_000));
    dept.add_desired(item("Textbook", 20_000));

    assert_eq!(dept.peek_desired().unwrap().name(), "Laptop");
    assert_eq!(dept.pop_desired().unwrap().name(), "Laptop");
    assert_eq!(dept.pop_desired().unwrap().name(), "Textbook");
    assert!(!dept.has_desired());
}

#[test]
fn test_peek_does_not_remove() {
    let mut dept = Department::new("Mathematics".to_string());
    dept.add_desired(item("Graphpaper", 15_000));

    dept.peek_desired().unwrap();
    dept.peek_desired().unwrap();

    assert_eq!(dept.desired().len(), 1);
}

#[test]
fn test_peek_empty_is_precondition_error() {
    let dept = Department::new("Mathematics".to_string());

    assert_eq!(
        dept.peek_desired(),
        Err(DepartmentError::NoDesiredItems {
            department: "Mathematics".to_string()
        })
    );
}

#[test]
fn test_pop_empty_is_precondition_error() {
    let mut dept = Department::new("Mathematics".to_string());

    let err = dept.pop_desired().unwrap_err();
    assert_eq!(err.to_string(), "Department 'Mathematics' has no desired items");
}

#[test]
fn test_grant_adds_price_to_spent() {
    let mut dept = Department::new("Mathematics".to_string());

    dept.grant(item("Graphpaper", 15_000)).unwrap();
    dept.grant(item("Coffee", 30_000)).unwrap();

    assert_eq!(dept.spent(), 45_000);
    assert_eq!(dept.granted().len(), 2);
    assert_eq!(dept.granted()[1].name(), "Coffee");
}

#[test]
fn test_reject_does_not_touch_spent() {
    let mut dept = Department::new("Computer Science".to_string());

    dept.reject(item("Laptop", 120_000));

    assert_eq!(dept.spent(), 0);
    assert_eq!(dept.rejected().len(), 1);
    assert!(dept.granted().is_empty());
}

#[test]
fn test_grant_fallback_records_scholarship_item() {
    let mut dept = Department::new("Chemistry".to_string());

    dept.grant_fallback(100_000).unwrap();
    dept.grant_fallback(50_000).unwrap();

    assert_eq!(dept.spent(), 150_000);
    assert_eq!(dept.granted().len(), 2);
    assert_eq!(dept.granted()[0].name(), "Scholarship");
    assert_eq!(dept.granted()[1].price(), 50_000);
    assert_eq!(dept.scholarship_count(), 2);
    assert_eq!(dept.scholarship_total(), 150_000);
    assert_eq!(dept.granted_items().count(), 0);
}

#[test]
fn test_negative_price_grant_lowers_spent() {
    let mut dept = Department::new("Chemistry".to_string());

    dept.grant(item("Beaker", 2_500)).unwrap();
    dept.grant(item("Refund", -1_000)).unwrap();

    assert_eq!(dept.spent(), 1_500);
}

#[test]
fn test_grant_overflow_is_error_and_records_nothing() {
    let mut dept = Department::new("Chemistry".to_string());
    dept.grant(item("Rebate", i64::MIN)).unwrap();

    let err = dept.grant(item("Refund", -1)).unwrap_err();

    assert_eq!(
        err,
        DepartmentError::SpendOverflow {
            department: "Chemistry".to_string(),
            spent: i64::MIN,
            amount: -1,
        }
    );
    assert_eq!(dept.spent(), i64::MIN);
    assert_eq!(dept.granted().len(), 1);
}
