//! Per-department summaries of a finished run
//!
//! Structured data only; display formatting belongs to the caller.

use serde::{Deserialize, Serialize};

use crate::allocator::engine::RunResult;
use crate::models::department::Department;
use crate::models::item::Item;

/// What one department ended up with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentSummary {
    pub name: String,

    /// Total received, scholarships included (cents)
    pub spent: i64,

    /// `spent` as a percentage of the initial budget
    pub share_of_budget: f64,

    /// Granted items in grant order, scholarships included
    pub received: Vec<Item>,

    /// Items rejected as unaffordable
    pub not_received: Vec<Item>,

    /// Items never reached before the run ended
    pub still_desired: Vec<Item>,
}

impl DepartmentSummary {
    pub fn from_department(dept: &Department, initial_budget: i64) -> Self {
        let share_of_budget = if initial_budget > 0 {
            dept.spent() as f64 / initial_budget as f64 * 100.0
        } else {
            0.0
        };

        Self {
            name: dept.name().to_string(),
            spent: dept.spent(),
            share_of_budget,
            received: dept.granted().to_vec(),
            not_received: dept.rejected().to_vec(),
            still_desired: dept.desired().iter().cloned().collect(),
        }
    }
}

impl RunResult {
    /// One summary per department, in registration order
    pub fn summaries(&self) -> Vec<DepartmentSummary> {
        self.departments
            .iter()
            .map(|dept| DepartmentSummary::from_department(dept, self.initial_budget))
            .collect()
    }
}
