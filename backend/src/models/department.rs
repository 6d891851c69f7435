//! Department (consumer) model
//!
//! A department competes for the shared budget. Each department has:
//! - A FIFO queue of desired items (evaluated head first)
//! - Granted items (append-only, includes scholarship grants)
//! - Rejected items (append-only, pruned as unaffordable)
//! - A running `spent` total
//!
//! Every item that leaves `desired` lands in exactly one of `granted` or
//! `rejected`, and never re-enters `desired`.
//!
//! CRITICAL: All money values are i64 (cents)

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::event::GrantKind;
use crate::models::item::Item;

/// Errors that can occur during department operations
#[derive(Debug, Error, PartialEq)]
pub enum DepartmentError {
    /// Peek or pop on an empty desired queue. Callers must check
    /// `has_desired()` first.
    #[error("Department '{department}' has no desired items")]
    NoDesiredItems { department: String },

    /// Adding a grant would overflow the department's running totals
    #[error("Department '{department}' spend overflow: spent {spent}, grant {amount}")]
    SpendOverflow {
        department: String,
        spent: i64,
        amount: i64,
    },
}

/// A consumer of the shared budget
///
/// # Example
/// ```
/// use budget_allocator_core_rs::{Department, Item};
///
/// let mut dept = Department::new("Mathematics".to_string());
/// dept.add_desired(Item::new("Graphpaper".to_string(), 15_000));
///
/// let item = dept.pop_desired().unwrap();
/// dept.grant(item).unwrap();
/// assert_eq!(dept.spent(), 15_000);
/// assert!(!dept.has_desired());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    name: String,

    /// Sum of prices of everything in `granted` (cents)
    spent: i64,

    /// Items still wanted, in evaluation order
    desired: VecDeque<Item>,

    /// Items received, in grant order
    granted: Vec<Item>,

    /// Kind of each entry in `granted`, index-aligned
    grant_kinds: Vec<GrantKind>,

    /// Items pruned because they could not be afforded
    rejected: Vec<Item>,

    /// Number of fallback grants among `granted`
    scholarship_count: usize,

    /// Total value of fallback grants among `granted` (cents)
    scholarship_total: i64,
}

impl Department {
    /// Create a department with nothing desired, granted, or rejected
    pub fn new(name: String) -> Self {
        Self {
            name,
            spent: 0,
            desired: VecDeque::new(),
            granted: Vec::new(),
            grant_kinds: Vec::new(),
            rejected: Vec::new(),
            scholarship_count: 0,
            scholarship_total: 0,
        }
    }

    /// Create a department whose desired queue holds `items` in the given order
    pub fn with_items(name: String, items: impl IntoIterator<Item = Item>) -> Self {
        let mut dept = Self::new(name);
        dept.desired.extend(items);
        dept
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn spent(&self) -> i64 {
        self.spent
    }

    pub fn desired(&self) -> &VecDeque<Item> {
        &self.desired
    }

    pub fn granted(&self) -> &[Item] {
        &self.granted
    }

    pub fn rejected(&self) -> &[Item] {
        &self.rejected
    }

    pub fn scholarship_count(&self) -> usize {
        self.scholarship_count
    }

    pub fn scholarship_total(&self) -> i64 {
        self.scholarship_total
    }

    /// Kind of each entry in `granted`, index-aligned
    pub fn grant_kinds(&self) -> &[GrantKind] {
        &self.grant_kinds
    }

    /// Granted items excluding scholarship grants
    pub fn granted_items(&self) -> impl Iterator<Item = &Item> {
        self.granted
            .iter()
            .zip(&self.grant_kinds)
            .filter(|(_, kind)| **kind == GrantKind::Item)
            .map(|(item, _)| item)
    }

    /// Append an item to the back of the desired queue
    pub fn add_desired(&mut self, item: Item) {
        self.desired.push_back(item);
    }

    pub fn has_desired(&self) -> bool {
        !self.desired.is_empty()
    }

    /// Head of the desired queue, without removing it
    pub fn peek_desired(&self) -> Result<&Item, DepartmentError> {
        self.desired.front().ok_or_else(|| self.no_desired_items())
    }

    /// Remove and return the head of the desired queue
    pub fn pop_desired(&mut self) -> Result<Item, DepartmentError> {
        match self.desired.pop_front() {
            Some(item) => Ok(item),
            None => Err(self.no_desired_items()),
        }
    }

    /// Record an item as rejected. Does not touch `spent`.
    pub fn reject(&mut self, item: Item) {
        self.rejected.push(item);
    }

    /// Record an item as received and add its price to `spent`
    ///
    /// This is the only mutator of `spent`. On overflow nothing is recorded.
    pub fn grant(&mut self, item: Item) -> Result<(), DepartmentError> {
        self.spent = self.checked_spent_after(item.price())?;
        self.granted.push(item);
        self.grant_kinds.push(GrantKind::Item);
        Ok(())
    }

    /// Grant a fallback cash amount, recorded as a "Scholarship" item
    pub fn grant_fallback(&mut self, amount: i64) -> Result<(), DepartmentError> {
        let spent = self.checked_spent_after(amount)?;
        let scholarship_total = self
            .scholarship_total
            .checked_add(amount)
            .ok_or_else(|| self.spend_overflow(amount))?;

        self.spent = spent;
        self.scholarship_total = scholarship_total;
        self.scholarship_count += 1;
        self.granted.push(Item::scholarship(amount));
        self.grant_kinds.push(GrantKind::Scholarship);
        Ok(())
    }

    /// `spent` after a grant of `amount`, or an overflow error
    pub fn checked_spent_after(&self, amount: i64) -> Result<i64, DepartmentError> {
        self.spent
            .checked_add(amount)
            .ok_or_else(|| self.spend_overflow(amount))
    }

    fn spend_overflow(&self, amount: i64) -> DepartmentError {
        DepartmentError::SpendOverflow {
            department: self.name.clone(),
            spent: self.spent,
            amount,
        }
    }

    fn no_desired_items(&self) -> DepartmentError {
        DepartmentError::NoDesiredItems {
            department: self.name.clone(),
        }
    }
}
