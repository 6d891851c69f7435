//! Grant log for allocation replay and auditing.
//!
//! Every grant made by the allocator is recorded as a [`GrantEvent`], in the
//! exact order the grants occur. The log is append-only.
//!
//! # Example
//!
//! ```rust
//! use budget_allocator_core_rs::models::{GrantEvent, GrantLog};
//!
//! let mut log = GrantLog::new();
//! log.log(GrantEvent::item("Mathematics", "Graphpaper", 15_000));
//! log.log(GrantEvent::scholarship("Mathematics", 25_000));
//!
//! assert_eq!(log.len(), 2);
//! assert_eq!(log.total_granted(), 40_000);
//! ```

use serde::{Deserialize, Serialize};

use crate::models::item::SCHOLARSHIP_ITEM_NAME;

/// Whether a grant was a desired item or a fallback cash grant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrantKind {
    Item,
    Scholarship,
}

/// A single grant, in the order it happened
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantEvent {
    pub department: String,
    pub item: String,
    /// Amount granted (cents)
    pub amount: i64,
    pub kind: GrantKind,
}

impl GrantEvent {
    /// Event for a desired item granted at its price
    pub fn item(department: &str, item: &str, amount: i64) -> Self {
        Self {
            department: department.to_string(),
            item: item.to_string(),
            amount,
            kind: GrantKind::Item,
        }
    }

    /// Event for a fallback cash grant
    pub fn scholarship(department: &str, amount: i64) -> Self {
        Self {
            department: department.to_string(),
            item: SCHOLARSHIP_ITEM_NAME.to_string(),
            amount,
            kind: GrantKind::Scholarship,
        }
    }

    pub fn is_scholarship(&self) -> bool {
        self.kind == GrantKind::Scholarship
    }
}

/// Append-only grant log
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GrantLog {
    events: Vec<GrantEvent>,
}

impl GrantLog {
    /// Create a new empty grant log
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Add an event to the log
    pub fn log(&mut self, event: GrantEvent) {
        self.events.push(event);
    }

    /// Get the number of events logged
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if the log is empty
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Get all events
    pub fn events(&self) -> &[GrantEvent] {
        &self.events
    }

    /// Get events for a specific department
    pub fn events_for_department(&self, department: &str) -> Vec<&GrantEvent> {
        self.events
            .iter()
            .filter(|e| e.department == department)
            .collect()
    }

    /// Get all fallback grants
    pub fn scholarships(&self) -> Vec<&GrantEvent> {
        self.events.iter().filter(|e| e.is_scholarship()).collect()
    }

    /// Sum of every grant amount (cents)
    pub fn total_granted(&self) -> i64 {
        self.events.iter().map(|e| e.amount).sum()
    }
}
