//! Allocator Engine
//!
//! Greedy least-served-first allocation of a shared budget across departments.
//!
//! # Algorithm
//!
//! ```text
//! While departments are queued and remaining budget > 0:
//! 1. Pop the department with the lowest `spent` (registration order on ties)
//! 2. Reject head-of-queue items priced above the remaining budget
//!    (stop at the first affordable head; items behind it are not inspected)
//! 3. Grant exactly one unit of progress:
//!    - the head desired item at its price, or
//!    - a scholarship of min(fallback_cap, remaining budget) if nothing is desired
//! 4. Deduct the grant from the remaining budget and log it
//! 5. Push the department back keyed by its new `spent`
//! ```
//!
//! # Example
//!
//! ```rust
//! use budget_allocator_core_rs::{Allocator, AllocatorConfig, Department, Item};
//!
//! let departments = vec![
//!     Department::with_items(
//!         "Computer Science".to_string(),
//!         vec![Item::new("Laptop".to_string(), 120_000), Item::new("Textbook".to_string(), 20_000)],
//!     ),
//!     Department::with_items(
//!         "Mathematics".to_string(),
//!         vec![Item::new("Graphpaper".to_string(), 15_000), Item::new("Coffee".to_string(), 30_000)],
//!     ),
//! ];
//!
//! let allocator = Allocator::new(AllocatorConfig::new(60_000), departments).unwrap();
//! let result = allocator.run().unwrap();
//!
//! assert_eq!(result.remaining_budget, 0);
//! assert_eq!(result.log.total_granted(), 60_000);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::allocator::queue::SpendQueue;
use crate::models::department::{Department, DepartmentError};
use crate::models::event::{GrantEvent, GrantLog};
use crate::models::item::Item;

/// Default cap on a single fallback grant: $1,000.00 in cents
pub const DEFAULT_FALLBACK_CAP: i64 = 100_000;

// ============================================================================
// Configuration Types
// ============================================================================

/// Allocation run configuration
///
/// All monetary values in cents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocatorConfig {
    /// Total budget shared by all departments
    pub initial_budget: i64,

    /// Upper bound on a single scholarship grant
    #[serde(default = "default_fallback_cap")]
    pub fallback_cap: i64,
}

fn default_fallback_cap() -> i64 {
    DEFAULT_FALLBACK_CAP
}

impl AllocatorConfig {
    /// Config with the given budget and the default fallback cap
    pub fn new(initial_budget: i64) -> Self {
        Self {
            initial_budget,
            fallback_cap: DEFAULT_FALLBACK_CAP,
        }
    }

    pub fn with_fallback_cap(mut self, fallback_cap: i64) -> Self {
        self.fallback_cap = fallback_cap;
        self
    }

    /// Reject non-positive budget or fallback cap
    pub fn validate(&self) -> Result<(), AllocationError> {
        if self.initial_budget <= 0 {
            return Err(AllocationError::InvalidConfig(format!(
                "initial_budget must be positive, got {}",
                self.initial_budget
            )));
        }
        if self.fallback_cap <= 0 {
            return Err(AllocationError::InvalidConfig(format!(
                "fallback_cap must be positive, got {}",
                self.fallback_cap
            )));
        }
        Ok(())
    }
}

/// Desired item as supplied by the ingestion layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemConfig {
    pub name: String,
    /// Price in cents
    pub price: i64,
}

/// Department as supplied by the ingestion layer
///
/// `items` order becomes the department's evaluation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentConfig {
    pub name: String,
    #[serde(default)]
    pub items: Vec<ItemConfig>,
}

impl From<&DepartmentConfig> for Department {
    fn from(config: &DepartmentConfig) -> Self {
        Department::with_items(
            config.name.clone(),
            config
                .items
                .iter()
                .map(|item| Item::new(item.name.clone(), item.price)),
        )
    }
}

/// Complete input for one allocation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationRequest {
    pub config: AllocatorConfig,
    /// Departments in registration order
    pub departments: Vec<DepartmentConfig>,
}

impl AllocationRequest {
    /// Parse a request from JSON
    ///
    /// # Example
    ///
    /// ```rust
    /// use budget_allocator_core_rs::AllocationRequest;
    ///
    /// let request = AllocationRequest::from_json(r#"{
    ///     "config": { "initial_budget": 60000 },
    ///     "departments": [
    ///         { "name": "Mathematics", "items": [{ "name": "Graphpaper", "price": 15000 }] }
    ///     ]
    /// }"#).unwrap();
    ///
    /// assert_eq!(request.config.fallback_cap, 100_000);
    /// assert_eq!(request.departments[0].items.len(), 1);
    /// ```
    pub fn from_json(json: &str) -> Result<Self, AllocationError> {
        serde_json::from_str(json)
            .map_err(|e| AllocationError::InvalidConfig(format!("Request parsing failed: {}", e)))
    }

    pub fn to_json(&self) -> Result<String, AllocationError> {
        serde_json::to_string(self).map_err(|e| {
            AllocationError::SerializationError(format!("Request serialization failed: {}", e))
        })
    }

    /// Build fresh department states in registration order
    pub fn build_departments(&self) -> Vec<Department> {
        self.departments.iter().map(Department::from).collect()
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Errors that can occur while setting up or running an allocation
#[derive(Debug, Error, PartialEq)]
pub enum AllocationError {
    /// Configuration validation error
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Department precondition or spend overflow during a run
    #[error(transparent)]
    Department(#[from] DepartmentError),

    /// Serialization of a request or snapshot failed
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Snapshot was taken from different inputs
    #[error("Input hash mismatch: expected {expected}, got {actual}")]
    InputMismatch { expected: String, actual: String },

    /// Deducting a grant would overflow the remaining budget
    #[error("Budget overflow granting {amount} to '{department}' with {remaining} remaining")]
    AmountOverflow {
        department: String,
        remaining: i64,
        amount: i64,
    },

    /// Snapshot failed an integrity check
    #[error("Snapshot validation error: {0}")]
    StateValidationError(String),
}

// ============================================================================
// Core Loop
// ============================================================================

/// Grant log and leftover budget from [`allocate`]
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    pub log: GrantLog,
    pub remaining_budget: i64,
}

/// Run the allocation loop over `departments` in place
///
/// No configuration validation happens here: a non-positive `budget`
/// produces an empty log and leaves every department untouched.
/// [`Allocator::new`] is the validating entry point.
pub fn allocate(
    budget: i64,
    fallback_cap: i64,
    departments: &mut [Department],
) -> Result<Allocation, AllocationError> {
    let mut queue = SpendQueue::from_spends(departments.iter().map(Department::spent));
    let mut remaining_budget = budget;
    let mut log = GrantLog::new();

    while step_once(
        &mut queue,
        departments,
        &mut remaining_budget,
        fallback_cap,
        &mut log,
    )?
    .is_some()
    {}

    Ok(Allocation {
        log,
        remaining_budget,
    })
}

/// One iteration of the loop. Returns `None` once the run has terminated.
fn step_once<'a>(
    queue: &mut SpendQueue,
    departments: &mut [Department],
    remaining_budget: &mut i64,
    fallback_cap: i64,
    log: &'a mut GrantLog,
) -> Result<Option<&'a GrantEvent>, AllocationError> {
    if *remaining_budget <= 0 {
        return Ok(None);
    }
    let Some(index) = queue.pop_min() else {
        return Ok(None);
    };

    let dept = &mut departments[index];
    reject_unaffordable(dept, *remaining_budget)?;
    let served = serve_once(dept, *remaining_budget, fallback_cap);
    // Requeued even on failure so a caller driving `step` keeps every department
    queue.push(index, dept.spent());
    let (event, remaining_after) = served?;

    *remaining_budget = remaining_after;
    debug!(
        department = %event.department,
        item = %event.item,
        amount = event.amount,
        remaining = *remaining_budget,
        "granted"
    );

    log.log(event);
    Ok(log.events().last())
}

/// Reject head items priced above `remaining`, stopping at the first affordable one
fn reject_unaffordable(dept: &mut Department, remaining: i64) -> Result<(), DepartmentError> {
    while dept.has_desired() && dept.peek_desired()?.price() > remaining {
        let item = dept.pop_desired()?;
        debug!(
            department = %dept.name(),
            item = %item.name(),
            price = item.price(),
            remaining,
            "rejected unaffordable item"
        );
        dept.reject(item);
    }
    Ok(())
}

/// Grant the head desired item, or a capped scholarship if nothing is desired
///
/// Returns the grant and the budget left after it. Both the budget and the
/// department's spend are checked for overflow before anything is mutated.
fn serve_once(
    dept: &mut Department,
    remaining: i64,
    fallback_cap: i64,
) -> Result<(GrantEvent, i64), AllocationError> {
    let amount = if dept.has_desired() {
        dept.peek_desired()?.price()
    } else {
        fallback_cap.min(remaining)
    };
    let remaining_after =
        remaining
            .checked_sub(amount)
            .ok_or_else(|| AllocationError::AmountOverflow {
                department: dept.name().to_string(),
                remaining,
                amount,
            })?;
    dept.checked_spent_after(amount)?;

    let event = if dept.has_desired() {
        let item = dept.pop_desired()?;
        let event = GrantEvent::item(dept.name(), item.name(), item.price());
        dept.grant(item)?;
        event
    } else {
        dept.grant_fallback(amount)?;
        GrantEvent::scholarship(dept.name(), amount)
    };
    Ok((event, remaining_after))
}

// ============================================================================
// Allocator
// ============================================================================

/// Owns one allocation run from configuration to result
#[derive(Debug, Clone)]
pub struct Allocator {
    config: AllocatorConfig,
    departments: Vec<Department>,
    queue: SpendQueue,
    remaining_budget: i64,
    log: GrantLog,
}

impl Allocator {
    /// Create an allocator over departments in registration order
    ///
    /// # Errors
    ///
    /// * `AllocationError::InvalidConfig` - non-positive budget or fallback cap
    pub fn new(
        config: AllocatorConfig,
        departments: Vec<Department>,
    ) -> Result<Self, AllocationError> {
        config.validate()?;

        let queue = SpendQueue::from_spends(departments.iter().map(Department::spent));
        Ok(Self {
            remaining_budget: config.initial_budget,
            config,
            departments,
            queue,
            log: GrantLog::new(),
        })
    }

    /// Create an allocator from an ingested request
    pub fn from_request(request: &AllocationRequest) -> Result<Self, AllocationError> {
        Self::new(request.config.clone(), request.build_departments())
    }

    /// Run a single iteration
    ///
    /// Returns the grant made, or `None` if the run had already terminated.
    pub fn step(&mut self) -> Result<Option<GrantEvent>, AllocationError> {
        let event = step_once(
            &mut self.queue,
            &mut self.departments,
            &mut self.remaining_budget,
            self.config.fallback_cap,
            &mut self.log,
        )?;
        Ok(event.cloned())
    }

    /// True once no further grant can be made
    pub fn is_finished(&self) -> bool {
        self.remaining_budget <= 0 || self.queue.is_empty()
    }

    /// Run to completion
    pub fn run(mut self) -> Result<RunResult, AllocationError> {
        while self.step()?.is_some() {}

        info!(
            departments = self.departments.len(),
            grants = self.log.len(),
            initial_budget = self.config.initial_budget,
            remaining_budget = self.remaining_budget,
            "allocation run complete"
        );

        Ok(RunResult {
            initial_budget: self.config.initial_budget,
            remaining_budget: self.remaining_budget,
            log: self.log,
            departments: self.departments,
        })
    }

    pub fn config(&self) -> &AllocatorConfig {
        &self.config
    }

    pub fn remaining_budget(&self) -> i64 {
        self.remaining_budget
    }

    pub fn log(&self) -> &GrantLog {
        &self.log
    }

    /// Departments in registration order
    pub fn departments(&self) -> &[Department] {
        &self.departments
    }
}

/// Outcome of a completed run
#[derive(Debug, Clone, PartialEq)]
pub struct RunResult {
    pub initial_budget: i64,
    pub remaining_budget: i64,
    pub log: GrantLog,
    /// Final department states in registration order
    pub departments: Vec<Department>,
}

impl RunResult {
    /// Budget handed out over the run (cents)
    pub fn total_granted(&self) -> i64 {
        self.initial_budget - self.remaining_budget
    }
}
