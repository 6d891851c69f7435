//! Type conversion utilities for FFI boundary
//!
//! Converts between Rust types and PyO3-compatible types (PyDict, PyList).

use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use crate::allocator::{AllocatorConfig, DepartmentConfig, ItemConfig, RunResult, DEFAULT_FALLBACK_CAP};
use crate::models::{Department, GrantEvent, GrantKind, Item};

// ========================================================================
// PyDict Extraction Helpers
// ========================================================================

/// Field `key` of `dict`, or `None` when absent
fn optional_field<T>(dict: &Bound<'_, PyDict>, key: &str) -> PyResult<Option<T>>
where
    T: for<'py> FromPyObject<'py>,
{
    dict.get_item(key)?.map(|value| value.extract()).transpose()
}

/// Field `key` of `dict`; raises ValueError naming the key when absent
fn required_field<T>(dict: &Bound<'_, PyDict>, key: &str) -> PyResult<T>
where
    T: for<'py> FromPyObject<'py>,
{
    optional_field(dict, key)?.ok_or_else(|| {
        PyErr::new::<pyo3::exceptions::PyValueError, _>(format!("Missing required field '{}'", key))
    })
}

// ========================================================================
// Configuration Parsers
// ========================================================================

/// Convert Python dict to AllocatorConfig
///
/// Expects `initial_budget` (cents) and optionally `fallback_cap` (cents).
/// Range validation is left to `Allocator::new`.
pub fn parse_allocator_config(py_config: &Bound<'_, PyDict>) -> PyResult<AllocatorConfig> {
    let initial_budget: i64 = required_field(py_config, "initial_budget")?;
    let fallback_cap: i64 =
        optional_field(py_config, "fallback_cap")?.unwrap_or(DEFAULT_FALLBACK_CAP);

    Ok(AllocatorConfig {
        initial_budget,
        fallback_cap,
    })
}

/// Convert Python list of `{"name": str, "items": [{"name": str, "price": int}]}`
/// to department configs, preserving order
pub fn parse_department_configs(py_departments: &Bound<'_, PyList>) -> PyResult<Vec<DepartmentConfig>> {
    let mut departments = Vec::with_capacity(py_departments.len());

    for py_dept in py_departments.iter() {
        let dept_dict: Bound<'_, PyDict> = py_dept.downcast_into()?;
        let name: String = required_field(&dept_dict, "name")?;

        let mut items = Vec::new();
        if let Some(py_items) = dept_dict.get_item("items")? {
            let items_list: Bound<'_, PyList> = py_items.downcast_into()?;
            for py_item in items_list.iter() {
                let item_dict: Bound<'_, PyDict> = py_item.downcast_into()?;
                items.push(ItemConfig {
                    name: required_field(&item_dict, "name")?,
                    price: required_field(&item_dict, "price")?,
                });
            }
        }

        departments.push(DepartmentConfig { name, items });
    }

    Ok(departments)
}

// ========================================================================
// Result Converters
// ========================================================================

fn item_to_py<'py>(py: Python<'py>, item: &Item) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("name", item.name())?;
    dict.set_item("price", item.price())?;
    Ok(dict)
}

fn items_to_py<'py, 'a>(
    py: Python<'py>,
    items: impl IntoIterator<Item = &'a Item>,
) -> PyResult<Bound<'py, PyList>> {
    let list = PyList::empty(py);
    for item in items {
        list.append(item_to_py(py, item)?)?;
    }
    Ok(list)
}

/// Convert GrantEvent to Python dict
pub fn grant_event_to_py<'py>(py: Python<'py>, event: &GrantEvent) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("department", event.department.as_str())?;
    dict.set_item("item", event.item.as_str())?;
    dict.set_item("amount", event.amount)?;
    dict.set_item(
        "kind",
        match event.kind {
            GrantKind::Item => "item",
            GrantKind::Scholarship => "scholarship",
        },
    )?;
    Ok(dict)
}

/// Convert final Department state to Python dict
pub fn department_to_py<'py>(py: Python<'py>, dept: &Department) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("name", dept.name())?;
    dict.set_item("spent", dept.spent())?;
    dict.set_item("granted", items_to_py(py, dept.granted())?)?;
    dict.set_item("rejected", items_to_py(py, dept.rejected())?)?;
    dict.set_item("desired", items_to_py(py, dept.desired())?)?;
    dict.set_item("scholarship_total", dept.scholarship_total())?;
    Ok(dict)
}

/// Convert RunResult to Python dict
///
/// Keys: `initial_budget`, `remaining_budget`, `log` (list of grant dicts),
/// `departments` (list of department dicts in registration order).
pub fn run_result_to_py(py: Python, result: &RunResult) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("initial_budget", result.initial_budget)?;
    dict.set_item("remaining_budget", result.remaining_budget)?;

    let log = PyList::empty(py);
    for event in result.log.events() {
        log.append(grant_event_to_py(py, event)?)?;
    }
    dict.set_item("log", log)?;

    let departments = PyList::empty(py);
    for dept in &result.departments {
        departments.append(department_to_py(py, dept)?)?;
    }
    dict.set_item("departments", departments)?;

    Ok(dict.unbind())
}
