//! Budget Allocator Core - Rust Engine
//!
//! Greedy allocation of a shared budget across competing departments, with
//! deterministic execution.
//!
//! # Architecture
//!
//! - **models**: Domain types (Item, Department, GrantLog)
//! - **allocator**: Priority queue, allocation loop, reports, snapshots
//!
//! # Critical Invariants
//!
//! 1. All money values are i64 (cents)
//! 2. The least-spent department is always served next (registration order on ties)
//! 3. Budget is conserved: initial - remaining == sum of logged grants

// Module declarations
pub mod allocator;
pub mod models;

// Re-exports for convenience
pub use allocator::{
    allocate, Allocation, AllocationError, AllocationRequest, Allocator, AllocatorConfig,
    DepartmentConfig, DepartmentSummary, ItemConfig, RunResult, RunSnapshot, DEFAULT_FALLBACK_CAP,
};
pub use models::{
    department::{Department, DepartmentError},
    event::{GrantEvent, GrantKind, GrantLog},
    item::Item,
};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn budget_allocator_core_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ffi::allocator::PyAllocator>()?;
    Ok(())
}
