//! FFI (Foreign Function Interface) module
//!
//! PyO3 bindings for exposing the Rust allocator to Python.
//!
//! # Design Principles
//!
//! 1. **Minimal boundary**: Only expose what's needed
//! 2. **Simple types**: Use primitives, strings, dicts at boundary
//! 3. **Safe errors**: Convert all Rust errors to Python exceptions
//! 4. **No references**: Python gets copies, never references to Rust state

pub mod allocator;
pub mod types;
