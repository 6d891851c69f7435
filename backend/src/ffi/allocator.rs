//! PyO3 wrapper for Allocator
//!
//! This module provides the Python interface to the Rust allocator.

use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use super::types::{grant_event_to_py, parse_allocator_config, parse_department_configs, run_result_to_py};
use crate::allocator::{AllocationRequest, Allocator as RustAllocator};

/// Python wrapper for Rust Allocator
///
/// # Example (from Python)
///
/// ```python
/// from budget_allocator._core import Allocator
///
/// alloc = Allocator(
///     {"initial_budget": 60_000, "fallback_cap": 100_000},
///     [
///         {"name": "Computer Science", "items": [{"name": "Laptop", "price": 120_000}]},
///         {"name": "Mathematics", "items": [{"name": "Graphpaper", "price": 15_000}]},
///     ],
/// )
/// result = alloc.run()
/// print(result["remaining_budget"])
/// ```
#[pyclass(name = "Allocator")]
pub struct PyAllocator {
    // Taken by `run`, which consumes the allocator
    inner: Option<RustAllocator>,
}

#[pymethods]
impl PyAllocator {
    /// Create a new allocator
    ///
    /// # Errors
    ///
    /// Raises ValueError if required fields are missing or the budget or
    /// fallback cap is not positive.
    #[new]
    fn new(config: &Bound<'_, PyDict>, departments: &Bound<'_, PyList>) -> PyResult<Self> {
        let request = AllocationRequest {
            config: parse_allocator_config(config)?,
            departments: parse_department_configs(departments)?,
        };

        let inner = RustAllocator::from_request(&request).map_err(|e| {
            PyErr::new::<pyo3::exceptions::PyValueError, _>(format!(
                "Failed to create allocator: {}",
                e
            ))
        })?;

        Ok(PyAllocator { inner: Some(inner) })
    }

    /// Run a single iteration; returns the grant dict or None once finished
    fn step(&mut self, py: Python) -> PyResult<Option<Py<PyDict>>> {
        let event = self.inner_mut()?.step().map_err(|e| {
            PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(format!("Step failed: {}", e))
        })?;

        event
            .map(|event| grant_event_to_py(py, &event).map(Bound::unbind))
            .transpose()
    }

    /// Remaining budget (cents)
    fn remaining_budget(&self) -> PyResult<i64> {
        Ok(self.inner_ref()?.remaining_budget())
    }

    fn is_finished(&self) -> PyResult<bool> {
        Ok(self.inner_ref()?.is_finished())
    }

    /// Run to completion and return the result dict
    ///
    /// The allocator cannot be used after this call.
    fn run(&mut self, py: Python) -> PyResult<Py<PyDict>> {
        let inner = self.inner.take().ok_or_else(already_run)?;
        let result = inner.run().map_err(|e| {
            PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(format!("Run failed: {}", e))
        })?;

        run_result_to_py(py, &result)
    }
}

impl PyAllocator {
    fn inner_ref(&self) -> PyResult<&RustAllocator> {
        self.inner.as_ref().ok_or_else(already_run)
    }

    fn inner_mut(&mut self) -> PyResult<&mut RustAllocator> {
        self.inner.as_mut().ok_or_else(already_run)
    }
}

fn already_run() -> PyErr {
    PyErr::new::<pyo3::exceptions::PyRuntimeError, _>("Allocator has already been run")
}
