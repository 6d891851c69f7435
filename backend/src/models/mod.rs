//! Domain models for the budget allocator

pub mod department;
pub mod event;
pub mod item;

// Re-exports
pub use department::{Department, DepartmentError};
pub use event::{GrantEvent, GrantKind, GrantLog};
pub use item::{Item, SCHOLARSHIP_ITEM_NAME};
