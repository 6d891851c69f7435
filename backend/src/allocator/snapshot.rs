//! Snapshot - Save/Verify Allocation Runs
//!
//! Captures the final state of a run together with a fingerprint of the
//! inputs that produced it, for auditing and reproducibility.
//!
//! # Critical Invariants
//!
//! - **Determinism**: Same request produces an identical grant log
//! - **Budget Conservation**: initial - remaining == sum of logged grants
//! - **Spend Integrity**: each department's `spent` equals its granted total
//! - **Input Matching**: A snapshot only verifies against the request it came from

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::allocator::engine::{AllocationError, AllocationRequest, RunResult};
use crate::models::department::Department;
use crate::models::event::{GrantKind, GrantLog};

/// Final state of an allocation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSnapshot {
    pub initial_budget: i64,
    pub remaining_budget: i64,
    pub fallback_cap: i64,

    /// Final department states in registration order
    pub departments: Vec<Department>,

    pub log: GrantLog,

    /// SHA256 hash of the originating request (for verification)
    pub input_hash: String,
}

impl RunSnapshot {
    /// Snapshot a finished run
    pub fn capture(
        result: &RunResult,
        request: &AllocationRequest,
    ) -> Result<Self, AllocationError> {
        Ok(Self {
            initial_budget: result.initial_budget,
            remaining_budget: result.remaining_budget,
            fallback_cap: request.config.fallback_cap,
            departments: result.departments.clone(),
            log: result.log.clone(),
            input_hash: request.input_hash()?,
        })
    }

    pub fn to_json(&self) -> Result<String, AllocationError> {
        serde_json::to_string(self).map_err(|e| {
            AllocationError::SerializationError(format!("Snapshot serialization failed: {}", e))
        })
    }

    pub fn from_json(json: &str) -> Result<Self, AllocationError> {
        serde_json::from_str(json).map_err(|e| {
            AllocationError::SerializationError(format!("Snapshot deserialization failed: {}", e))
        })
    }

    /// Check that this snapshot was produced from `request`
    pub fn verify_inputs(&self, request: &AllocationRequest) -> Result<(), AllocationError> {
        let actual = request.input_hash()?;
        if actual != self.input_hash {
            return Err(AllocationError::InputMismatch {
                expected: self.input_hash.clone(),
                actual,
            });
        }
        Ok(())
    }
}

// ============================================================================
// Input Fingerprint
// ============================================================================

impl AllocationRequest {
    /// Hex SHA256 of the request's JSON encoding
    ///
    /// Hashes the parsed request, so whitespace and key order in the source
    /// JSON do not affect the fingerprint; item order does.
    pub fn input_hash(&self) -> Result<String, AllocationError> {
        let encoded = serde_json::to_vec(self).map_err(|e| {
            AllocationError::SerializationError(format!("Request serialization failed: {}", e))
        })?;
        Ok(format!("{:x}", Sha256::digest(&encoded)))
    }
}

// ============================================================================
// Validation
// ============================================================================

/// Validate snapshot integrity
///
/// Checks:
/// - Budget conservation against the grant log
/// - Each department's `spent` against its granted items
/// - Each department's grant kinds and scholarship totals against `granted`
/// - Grant log total against department spend
pub fn validate_snapshot(snapshot: &RunSnapshot) -> Result<(), AllocationError> {
    // 1. Budget conservation
    let logged = snapshot.log.total_granted();
    let consumed = snapshot
        .initial_budget
        .saturating_sub(snapshot.remaining_budget);
    if logged != consumed {
        return Err(AllocationError::StateValidationError(format!(
            "Budget conservation violated: consumed {}, logged {}",
            consumed, logged
        )));
    }

    // 2. Per-department spend integrity
    for dept in &snapshot.departments {
        let granted = dept
            .granted()
            .iter()
            .fold(0i64, |total, item| total.saturating_add(item.price()));
        if granted != dept.spent() {
            return Err(AllocationError::StateValidationError(format!(
                "Department {} spent {} but granted items total {}",
                dept.name(),
                dept.spent(),
                granted
            )));
        }
    }

    // 3. Grant kinds line up with granted items
    for dept in &snapshot.departments {
        if dept.grant_kinds().len() != dept.granted().len() {
            return Err(AllocationError::StateValidationError(format!(
                "Department {} has {} granted items but {} grant kinds",
                dept.name(),
                dept.granted().len(),
                dept.grant_kinds().len()
            )));
        }

        let (count, total) = dept
            .granted()
            .iter()
            .zip(dept.grant_kinds())
            .filter(|(_, kind)| **kind == GrantKind::Scholarship)
            .fold((0usize, 0i64), |(count, total), (item, _)| {
                (count + 1, total.saturating_add(item.price()))
            });
        if count != dept.scholarship_count() || total != dept.scholarship_total() {
            return Err(AllocationError::StateValidationError(format!(
                "Department {} records {} scholarships totalling {} but granted holds {} totalling {}",
                dept.name(),
                dept.scholarship_count(),
                dept.scholarship_total(),
                count,
                total
            )));
        }
    }

    // 4. Log agrees with departments
    let spent = snapshot
        .departments
        .iter()
        .map(Department::spent)
        .fold(0i64, i64::saturating_add);
    if spent != logged {
        return Err(AllocationError::StateValidationError(format!(
            "Departments spent {} but log records {}",
            spent, logged
        )));
    }

    Ok(())
}
