//! Allocator - greedy least-served-first budget allocation
//!
//! See `engine.rs` for the allocation loop.

pub mod engine;
pub mod queue;
pub mod report;
pub mod snapshot;

// Re-export main types for convenience
pub use engine::{
    allocate, Allocation, AllocationError, AllocationRequest, Allocator, AllocatorConfig,
    DepartmentConfig, ItemConfig, RunResult, DEFAULT_FALLBACK_CAP,
};
pub use queue::SpendQueue;
pub use report::DepartmentSummary;
pub use snapshot::{validate_snapshot, RunSnapshot};
